use thiserror::Error;

/// Error types for the remote store layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// Missing or invalid client configuration
    #[error("Invalid store configuration: {reason}")]
    Config { reason: String },

    /// Identity could not be resolved (sign-in rejected, expired session)
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    /// The backend answered with a non-success status
    #[error("Request failed with status {status}: {message}")]
    Request { status: u16, message: String },

    /// Network-level failure before a response was produced
    #[error("Transport error: {0}")]
    Transport(#[source] Box<reqwest::Error>),

    /// Realtime feed connection or protocol failure
    #[error("Realtime feed error: {message}")]
    Realtime { message: String },

    /// A stored checklist column could not be decoded
    #[error("Malformed checklist on task {task_id}: {reason}")]
    MalformedChecklist { task_id: i64, reason: String },
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Transport(Box::new(err))
    }
}

impl StoreError {
    /// Whether this error came from the auth service rather than the data API.
    pub fn is_auth(&self) -> bool {
        matches!(self, StoreError::Auth { .. })
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = StoreError::Config {
            reason: "missing anon key".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid store configuration: missing anon key"
        );
    }

    #[test]
    fn test_auth_error_display() {
        let err = StoreError::Auth {
            message: "Invalid login credentials".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Authentication failed: Invalid login credentials"
        );
        assert!(err.is_auth());
    }

    #[test]
    fn test_request_error_display() {
        let err = StoreError::Request {
            status: 500,
            message: "internal error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status 500: internal error"
        );
        assert!(!err.is_auth());
    }

    #[test]
    fn test_malformed_checklist_display() {
        let err = StoreError::MalformedChecklist {
            task_id: 7,
            reason: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed checklist on task 7: expected value at line 1 column 1"
        );
    }

    #[test]
    fn test_store_error_debug_contains_fields() {
        let err = StoreError::Request {
            status: 404,
            message: "not found".to_string(),
        };
        let debug_str = format!("{:?}", err);
        assert!(
            debug_str.contains("Request")
                && debug_str.contains("404")
                && debug_str.contains("not found"),
            "Debug output should contain Request and its field values"
        );
    }

    #[test]
    fn test_store_result_type_alias() {
        let ok_result: StoreResult<i32> = Ok(42);
        assert_eq!(ok_result.unwrap(), 42);

        let err_result: StoreResult<i32> = Err(StoreError::Realtime {
            message: "socket closed".to_string(),
        });
        assert!(err_result.is_err());
    }
}
