//! Form definitions backing the planning screens.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::agenda::ValidationError;

pub mod plan;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid employee id")]
    InvalidEmployeeId,

    #[error("goal {0} is out of range")]
    GoalOutOfRange(i64),

    #[error("invalid agenda: {0}")]
    Agenda(#[from] ValidationError),
}
