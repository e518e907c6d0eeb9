use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum UserError {
    #[error("Name must be between 1 and 255 characters")]
    InvalidName,
    #[error("Weight must be between 0 and 100")]
    InvalidWeight,
    #[error("Maximum 100 users allowed")]
    TooManyUsers,
    #[error("user {0} not found")]
    NotFound(String),
    #[error("Invalid JSON format")]
    InvalidImport,
}

#[derive(Debug, Error, PartialEq)]
pub enum HistoryError {
    #[error("Invalid JSON format for history data")]
    InvalidImport,
}

#[derive(Debug, Error, PartialEq)]
pub enum WheelError {
    #[error("wheel has no segments")]
    NoSegments,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => Self::not_found(err.to_string()),
            _ => Self::bad_request(err.to_string()),
        }
    }
}

impl From<HistoryError> for AppError {
    fn from(err: HistoryError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<WheelError> for AppError {
    fn from(err: WheelError) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
