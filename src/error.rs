use actix_web::HttpResponse;

use serde::Serialize;

use thiserror::Error;

/// Shown whenever an internal failure is caught; internals never leak
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again later.";
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";

/// Uniform `{success, message}` body returned by every form action
#[derive(Debug, Serialize)]
pub struct FormResult {
    pub success: bool,
    pub message: String,
}

impl FormResult {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Everything that can interrupt a form action. Validation and upload
/// rejections carry their user-facing string; the rest collapse to the
/// generic retry-later message at the response boundary.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    UploadRejected(String),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Upload sink error")]
    UploadSink(#[source] anyhow::Error),
}

impl ActionError {
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(message) | Self::UploadRejected(message) => message,
            Self::Database(_) | Self::UploadSink(_) => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// Single conversion point from an interrupted action to the uniform
    /// failure body. Internal failures are logged here; rejected input is
    /// the caller's mistake and only worth a debug line.
    pub fn into_response(self) -> HttpResponse {
        match &self {
            Self::Validation(_) | Self::UploadRejected(_) => {
                tracing::debug!("Rejected form input: {}", self);
            }
            Self::Database(_) | Self::UploadSink(_) => {
                tracing::error!(error.cause_chain = ?self, "Form action failed");
            }
        }
        HttpResponse::Ok().json(FormResult::failure(self.user_message()))
    }
}
