use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};

use crate::api::response;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("API key not found")]
    MissingApiKey,

    #[error("URL is empty")]
    EmptyUrl,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Unsupported transcript language: {0}")]
    UnsupportedLanguage(String),

    #[error("No content could be extracted")]
    NoContent,

    #[error("No transcript available in language '{language}'")]
    TranscriptUnavailable { language: String },

    #[error("Failed to extract content: {0}")]
    Extraction(String),

    #[error("Summarization failed: {0}")]
    Summarization(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Message shown to the user. Only the precondition failures and the
    /// empty extraction get their own wording, everything else shares the
    /// generic exception surface.
    pub fn user_message(&self) -> String {
        match self {
            AppError::MissingApiKey => "API key not found! Please check your .env file.".to_string(),
            AppError::EmptyUrl => "Please enter a URL to proceed.".to_string(),
            AppError::InvalidUrl(_) => "Please enter a valid URL.".to_string(),
            AppError::UnsupportedLanguage(code) => {
                format!("Unsupported transcript language: {}", code)
            }
            AppError::NoContent => "No content could be extracted from the provided URL.".to_string(),
            other => format!("Exception: {}", other),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyUrl | AppError::InvalidUrl(_) | AppError::UnsupportedLanguage(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NoContent | AppError::TranscriptUnavailable { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Extraction(_) => StatusCode::BAD_GATEWAY,
            AppError::MissingApiKey | AppError::Summarization(_) | AppError::ConfigError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        response::error::<()>(self.status_code(), self.user_message()).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Extraction(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
