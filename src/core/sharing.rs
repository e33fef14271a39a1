use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum SharingError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // This is a retry-able error, which indicates that the underlying store
    // was briefly unable to serve the request; the caller can retry with or
    // without a backoff.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl SharingError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> SharingError {
        SharingError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> SharingError {
        SharingError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> SharingError {
        SharingError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> SharingError {
        SharingError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> SharingError {
        SharingError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> SharingError {
        if retryable {
            SharingError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                SharingError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("400") {
                SharingError::access_denied(
                    format!("access-denied error {:?} {:?}", message, reason).as_str(), reason)
            } else {
                SharingError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            SharingError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> SharingError {
        SharingError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> SharingError {
        SharingError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> SharingError {
        SharingError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            SharingError::Database { retryable, .. } => { *retryable }
            SharingError::AccessDenied { .. } => { false }
            SharingError::DuplicateKey { .. } => { false }
            SharingError::NotFound { .. } => { false }
            SharingError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            SharingError::Validation { .. } => { false }
            SharingError::Serialization { .. } => { false }
            SharingError::Runtime { .. } => { false }
        }
    }
}

impl From<std::io::Error> for SharingError {
    fn from(err: std::io::Error) -> Self {
        SharingError::runtime(
            format!("serde io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for SharingError {
    fn from(err: serde_json::Error) -> Self {
        SharingError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for SharingError {
    fn from(err: String) -> Self {
        SharingError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for SharingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SharingError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            SharingError::AccessDenied { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            SharingError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            SharingError::NotFound { message } => {
                write!(f, "{}", message)
            }
            SharingError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            SharingError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            SharingError::Serialization { message } => {
                write!(f, "{}", message)
            }
            SharingError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

/// A specialized Result type for service and repository calls.
pub type SharingResult<T> = Result<T, SharingError>;

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page number or token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

// BookingStatus tracks the approval lifecycle of a booking: every booking is
// created WAITING and the item owner moves it to APPROVED or REJECTED.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl From<String> for BookingStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "WAITING" => BookingStatus::Waiting,
            "APPROVED" => BookingStatus::Approved,
            "REJECTED" => BookingStatus::Rejected,
            _ => BookingStatus::Waiting,
        }
    }
}

impl Display for BookingStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BookingStatus::Waiting => write!(f, "WAITING"),
            BookingStatus::Approved => write!(f, "APPROVED"),
            BookingStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

// BookingState is the filter bucket used when listing bookings, either by
// time window relative to now or by status. Parsing is the single entry
// point for validating a state token from the outside.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub(crate) enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl BookingState {
    pub fn parse(s: &str) -> SharingResult<BookingState> {
        match s {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            other => Err(SharingError::validation(
                format!("unknown booking state {}", other).as_str(), Some("400".to_string()))),
        }
    }

    pub fn all_states() -> Vec<BookingState> {
        vec![BookingState::All, BookingState::Current, BookingState::Past,
             BookingState::Future, BookingState::Waiting, BookingState::Rejected]
    }
}

impl Display for BookingState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BookingState::All => write!(f, "ALL"),
            BookingState::Current => write!(f, "CURRENT"),
            BookingState::Past => write!(f, "PAST"),
            BookingState::Future => write!(f, "FUTURE"),
            BookingState::Waiting => write!(f, "WAITING"),
            BookingState::Rejected => write!(f, "REJECTED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::sharing::{BookingState, BookingStatus, SharingError};

    #[tokio::test]
    async fn test_should_create_database_error() {
        assert!(matches!(SharingError::database("test", None, false), SharingError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_access_error() {
        assert!(matches!(SharingError::access_denied("test", None), SharingError::AccessDenied{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_duplicate_key_error() {
        assert!(matches!(SharingError::duplicate_key("test"), SharingError::DuplicateKey{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(SharingError::not_found("test"), SharingError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_unavailable_error() {
        assert!(matches!(SharingError::unavailable("test", None, false), SharingError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_validation_error() {
        assert!(matches!(SharingError::validation("test", None), SharingError::Validation{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(SharingError::database_or_unavailable("test", None, true), SharingError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(SharingError::database_or_unavailable("test", Some("404".to_string()), false), SharingError::NotFound{ message: _ }));
        assert!(matches!(SharingError::database_or_unavailable("test", Some("400".to_string()), false), SharingError::AccessDenied{ message: _, reason_code: _ }));
        assert!(matches!(SharingError::database_or_unavailable("test", Some("500".to_string()), false), SharingError::Database{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(SharingError::database_or_unavailable("test", None, false), SharingError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert_eq!(false, SharingError::database("test", None, false).retryable());
        assert_eq!(false, SharingError::access_denied("test", None).retryable());
        assert_eq!(false, SharingError::duplicate_key("test").retryable());
        assert_eq!(false, SharingError::not_found("test").retryable());
        assert_eq!(false, SharingError::unavailable("test", None, false).retryable());
        assert_eq!(true, SharingError::unavailable("test", None, true).retryable());
        assert_eq!(false, SharingError::validation("test", None).retryable());
        assert_eq!(false, SharingError::serialization("test").retryable());
        assert_eq!(false, SharingError::runtime("test", None).retryable());
    }

    #[tokio::test]
    async fn test_should_format_booking_status() {
        let statuses = vec![
            BookingStatus::Waiting,
            BookingStatus::Approved,
            BookingStatus::Rejected,
        ];
        for status in statuses {
            let str = status.to_string();
            let str_status = BookingStatus::from(str);
            assert_eq!(status, str_status);
        }
    }

    #[tokio::test]
    async fn test_should_parse_booking_state() {
        for state in BookingState::all_states() {
            let parsed = BookingState::parse(state.to_string().as_str()).expect("should parse state");
            assert_eq!(state, parsed);
        }
    }

    #[tokio::test]
    async fn test_should_reject_unknown_booking_state() {
        let res = BookingState::parse("BOGUS");
        assert!(matches!(res, Err(SharingError::Validation{ message: _, reason_code: _ })));
    }
}
