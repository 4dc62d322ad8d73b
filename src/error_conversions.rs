//! Error conversion glue between the domain value objects and the outer layers.
//!
//! The domain layer must not depend on service or repository error types, so
//! the conversions live here.

use crate::domain::types::TypeConstraintError;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::EmployeeId;

    #[test]
    fn constraint_errors_become_form_errors() {
        let err = EmployeeId::new(0).unwrap_err();
        assert!(matches!(ServiceError::from(err), ServiceError::Form(_)));
    }
}
