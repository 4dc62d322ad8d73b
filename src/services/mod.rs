//! Orchestration between the planning core and the external collaborators.
//!
//! Every function is generic over the repository traits it needs so callers
//! can plug in an HTTP client, a fake or a mock.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::agenda::ValidationError;
use crate::domain::employee::CurrentUser;
use crate::domain::types::EmployeeId;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

pub mod plans;
pub mod progress;
pub mod weeks;

/// Errors surfaced to the planning screens.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    /// Local agenda or week validation failed; nothing was sent.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("invalid form: {0}")]
    Form(String),

    /// The employee already has a plan for that week.
    #[error("this week is already planned: {0}")]
    Conflict(String),

    #[error("week starting {0} is not open for planning")]
    WeekNotAvailable(NaiveDate),

    /// The collaborator could not be reached; the request may be retried.
    #[error("temporary failure: {0}")]
    Transient(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Transient(_))
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict(message) => ServiceError::Conflict(message),
            RepositoryError::Transient(message) => ServiceError::Transient(message),
            RepositoryError::ValidationError(message) => ServiceError::Form(message),
            RepositoryError::Unexpected(message) => ServiceError::Internal(message),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Agenda(err) => ServiceError::Validation(err),
            other => ServiceError::Form(other.to_string()),
        }
    }
}

pub(crate) fn ensure_admin(user: &CurrentUser) -> ServiceResult<()> {
    if user.role.is_admin() {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

pub(crate) fn ensure_can_act_for(user: &CurrentUser, employee_id: EmployeeId) -> ServiceResult<()> {
    if user.can_act_for(employee_id) {
        Ok(())
    } else {
        log::warn!(
            "Employee {} attempted to act for employee {employee_id}",
            user.id
        );
        Err(ServiceError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::employee::Role;

    #[test]
    fn repository_errors_keep_their_meaning() {
        assert!(matches!(
            ServiceError::from(RepositoryError::Conflict("dup".into())),
            ServiceError::Conflict(_)
        ));
        assert!(ServiceError::from(RepositoryError::Transient("timeout".into())).is_retryable());
        assert!(!ServiceError::from(RepositoryError::Conflict("dup".into())).is_retryable());
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
    }

    #[test]
    fn advisors_only_act_for_themselves() {
        let own = EmployeeId::new(3).unwrap();
        let other = EmployeeId::new(4).unwrap();
        let advisor = CurrentUser::new(own, Role::Advisor);
        assert!(ensure_can_act_for(&advisor, own).is_ok());
        assert!(matches!(
            ensure_can_act_for(&advisor, other),
            Err(ServiceError::Unauthorized)
        ));
        assert!(ensure_admin(&advisor).is_err());

        let admin = CurrentUser::new(own, Role::Administrator);
        assert!(ensure_can_act_for(&admin, other).is_ok());
        assert!(ensure_admin(&admin).is_ok());
    }
}
