use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    /// Rejected input; the message is returned verbatim to the client
    #[error("{0}")]
    Validation(String),

    #[error("Invalid eventId format")]
    InvalidId(String),

    #[error("Event not found.")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type EventResult<T> = Result<T, EventError>;

impl EventError {
    /// Storage failures outside of client mistakes surface as internal errors.
    pub fn into_internal(self) -> Self {
        match self {
            EventError::Validation(msg) | EventError::Database(msg) => EventError::Internal(msg),
            other => other,
        }
    }

    /// Used when a storage call fails during creation: the failure is
    /// reported back as rejected input.
    pub fn into_validation(self) -> Self {
        match self {
            EventError::Validation(msg)
            | EventError::Database(msg)
            | EventError::Internal(msg) => EventError::Validation(msg),
            EventError::InvalidId(id) => EventError::Validation(format!("Invalid id: {}", id)),
            EventError::NotFound(id) => EventError::Validation(format!("Event {} not found", id)),
        }
    }
}

/// Convert EventError to AppError for standardized error responses
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::Validation(msg) => AppError::BadRequest(msg),
            EventError::InvalidId(_) => AppError::InvalidId(err.to_string()),
            EventError::NotFound(_) => AppError::NotFound(err.to_string()),
            EventError::Database(msg) => AppError::InternalServerError(msg),
            EventError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for EventError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for EventError {
    fn from(err: mongodb::error::Error) -> Self {
        EventError::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for EventError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        EventError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_messages_are_client_facing() {
        assert_eq!(
            EventError::InvalidId("abc".into()).to_string(),
            "Invalid eventId format"
        );
        assert_eq!(
            EventError::NotFound("abc".into()).to_string(),
            "Event not found."
        );
        assert_eq!(
            EventError::Validation("Invalid email format.".into()).to_string(),
            "Invalid email format."
        );
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (EventError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (EventError::InvalidId("x".into()), StatusCode::BAD_REQUEST),
            (EventError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (EventError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (EventError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_into_internal_keeps_client_errors() {
        assert!(matches!(
            EventError::InvalidId("x".into()).into_internal(),
            EventError::InvalidId(_)
        ));
        assert!(matches!(
            EventError::Database("x".into()).into_internal(),
            EventError::Internal(_)
        ));
    }

    #[test]
    fn test_into_validation_wraps_storage_failure() {
        match EventError::Database("write failed".into()).into_validation() {
            EventError::Validation(msg) => assert_eq!(msg, "write failed"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
