use async_trait::async_trait;
use crate::core::sharing::SharingError;

#[derive(Debug)]
pub enum CommandError {
    Access {
        message: String,
        reason_code: Option<String>,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Other {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<SharingError> for CommandError {
    fn from(other: SharingError) -> Self {
        match other {
            SharingError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            SharingError::AccessDenied { message, reason_code } => {
                CommandError::Access { message, reason_code }
            }
            SharingError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            SharingError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            SharingError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            SharingError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            SharingError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            SharingError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: true }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::command::CommandError;
    use crate::core::sharing::SharingError;

    #[tokio::test]
    async fn test_should_build_command_error() {
        let _ = CommandError::Access { message: "test".to_string(), reason_code: None };
        let _ = CommandError::Database { message: "test".to_string(), reason_code: None, retryable: false };
        let _ = CommandError::Runtime { message: "test".to_string(), reason_code: None, retryable: false };
        let _ = CommandError::Serialization { message: "test".to_string() };
        let _ = CommandError::Validation { message: "test".to_string(), reason_code: None };
        let _ = CommandError::Other { message: "test".to_string(), reason_code: None };
    }

    #[tokio::test]
    async fn test_should_convert_sharing_error() {
        assert!(matches!(CommandError::from(SharingError::not_found("test")),
                         CommandError::NotFound { message: _ }));
        assert!(matches!(CommandError::from(SharingError::access_denied("test", None)),
                         CommandError::Access { message: _, reason_code: _ }));
        assert!(matches!(CommandError::from(SharingError::validation("test", None)),
                         CommandError::Validation { message: _, reason_code: _ }));
    }
}
