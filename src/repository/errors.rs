use thiserror::Error;

/// Failures reported by the external persistence and directory collaborators.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found")]
    NotFound,

    /// A plan already exists for the same employee and week.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Network failure or timeout; the request may be retried as is.
    #[error("Temporary failure: {0}")]
    Transient(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Whether retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, RepositoryError::Transient(_))
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            serde_json::error::Category::Io => {
                RepositoryError::Transient(format!("Connection error: {err}"))
            }
            serde_json::error::Category::Eof => {
                RepositoryError::Transient(format!("Truncated response: {err}"))
            }
            serde_json::error::Category::Syntax | serde_json::error::Category::Data => {
                RepositoryError::ValidationError(format!("Deserialization error: {err}"))
            }
        }
    }
}

impl From<std::io::Error> for RepositoryError {
    fn from(err: std::io::Error) -> Self {
        RepositoryError::Transient(format!("Connection error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_payloads_are_validation_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{\"a\": tru}").unwrap_err();
        assert!(matches!(
            RepositoryError::from(err),
            RepositoryError::ValidationError(_)
        ));
    }

    #[test]
    fn truncated_payloads_are_transient() {
        let err = serde_json::from_str::<serde_json::Value>("{\"a\": ").unwrap_err();
        assert!(RepositoryError::from(err).is_transient());
    }
}
