use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json_str = serde_json::to_string(&self).map_err(|_| fmt::Error)?;
        write!(f, "{}", json_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorMessage {
    TokenNotProvided,
    InvalidToken,
    PermissionDenied,
    PropertyNotFound,
    SlugInvalid,
    SlugTaken,
    ServerError,
}

impl ErrorMessage {
    fn to_str(&self) -> String {
        match self {
            ErrorMessage::TokenNotProvided => {
                "You are not logged in, please provide a token".to_string()
            }
            ErrorMessage::InvalidToken => "Authentication token is invalid or expired".to_string(),
            ErrorMessage::PermissionDenied => {
                "You are not allowed to perform this action".to_string()
            }
            ErrorMessage::PropertyNotFound => "Property not found".to_string(),
            ErrorMessage::SlugInvalid => {
                "Slug must contain only lowercase letters, digits and hyphens".to_string()
            }
            ErrorMessage::SlugTaken => "A property with this slug already exists".to_string(),
            ErrorMessage::ServerError => "Something went wrong, please try again later".to_string(),
        }
    }
}

impl ToString for ErrorMessage {
    fn to_string(&self) -> String {
        self.to_str()
    }
}

#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
    pub status: StatusCode,
}

impl HttpError {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        HttpError {
            message: message.into(),
            status,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        HttpError {
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        HttpError {
            message: message.into(),
            status: StatusCode::UNAUTHORIZED,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        HttpError {
            message: message.into(),
            status: StatusCode::NOT_FOUND,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        HttpError {
            message: message.into(),
            status: StatusCode::CONFLICT,
        }
    }

    pub fn payload_too_large(message: impl Into<String>) -> Self {
        HttpError {
            message: message.into(),
            status: StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        HttpError {
            message: message.into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Single mapping from database errors to HTTP responses. Unique
    /// constraint violations (Postgres 23505) surface as 409 because the
    /// only unique application constraint is the property slug; raw
    /// database messages are logged, never sent to the client.
    pub fn from_db_error(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::RowNotFound => HttpError::not_found(ErrorMessage::PropertyNotFound),
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                HttpError::conflict(ErrorMessage::SlugTaken)
            }
            _ => {
                tracing::error!("database error: {}", e);
                HttpError::server_error(ErrorMessage::ServerError)
            }
        }
    }

    pub fn into_http_response(self) -> axum::response::Response {
        let json_response = Json(ErrorResponse {
            status: "fail".to_string(),
            message: self.message.clone(),
        });

        (self.status, json_response).into_response()
    }
}

impl From<ErrorMessage> for String {
    fn from(msg: ErrorMessage) -> Self {
        msg.to_str()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HttpError: message: {}, status: {}",
            self.message, self.status
        )
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        self.into_http_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_status_codes() {
        assert_eq!(HttpError::bad_request("x").status, StatusCode::BAD_REQUEST);
        assert_eq!(HttpError::unauthorized("x").status, StatusCode::UNAUTHORIZED);
        assert_eq!(HttpError::not_found("x").status, StatusCode::NOT_FOUND);
        assert_eq!(HttpError::conflict("x").status, StatusCode::CONFLICT);
        assert_eq!(
            HttpError::payload_too_large("x").status,
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            HttpError::server_error("x").status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let err = HttpError::from_db_error(sqlx::Error::RowNotFound);
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unclassified_db_error_maps_to_500_with_generic_message() {
        let err = HttpError::from_db_error(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, ErrorMessage::ServerError.to_string());
    }
}
