use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::repositories::SheetError;

// Fragments of the remote script's own (Turkish) error messages.
const SHEET_NOT_FOUND: &str = "sayfa bulunamadı";
const USERS_SHEET: &str = "'kullanıcılar'";
const UNKNOWN_GET_ACTION: &str = "bilinmeyen get eylemi";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Unavailable: {0}")]
    Unavailable(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Remote service error: {0}")]
    RemoteError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServiceError {
    /// Turns a failure reported by the sheet script into a service error,
    /// rewriting the known misconfiguration messages into actionable ones.
    pub fn from_remote_message(message: String) -> Self {
        if message.contains(SHEET_NOT_FOUND) {
            if message.to_lowercase().contains(USERS_SHEET) {
                return ServiceError::ConfigurationError(
                    "No sheet named 'Kullanıcılar' was found in the spreadsheet. Please check it."
                        .to_string(),
                );
            }
            return ServiceError::ConfigurationError(format!(
                "A required sheet (e.g. 'SorguLogları' or 'LoginLog') was not found in the spreadsheet. Please check it. Error: {}",
                message
            ));
        }

        if message.to_lowercase().contains(UNKNOWN_GET_ACTION) {
            return ServiceError::ConfigurationError(
                "The sheet script does not recognise the requested action ('getCredentials' or 'getUserActivityStats'). Please check the script."
                    .to_string(),
            );
        }

        ServiceError::RemoteError(message)
    }

    fn message(&self) -> String {
        match self {
            ServiceError::ValidationError(msg)
            | ServiceError::NotFound(msg)
            | ServiceError::AuthenticationError(msg)
            | ServiceError::Forbidden(msg)
            | ServiceError::Unavailable(msg)
            | ServiceError::ConfigurationError(msg)
            | ServiceError::RemoteError(msg) => msg.clone(),
            ServiceError::InternalError(_) => "Internal server error".to_string(),
        }
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServiceError::Unavailable(_) | ServiceError::ConfigurationError(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ServiceError::RemoteError(_) => StatusCode::BAD_GATEWAY,
            ServiceError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::InternalError(msg) => tracing::error!("Internal error: {}", msg),
            ServiceError::RemoteError(msg) => tracing::warn!("Sheet service error: {}", msg),
            ServiceError::ConfigurationError(msg) => tracing::warn!("Configuration error: {}", msg),
            _ => {}
        }

        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "message": self.message()
        }))
    }
}

// Conversion from sheet repository errors
impl From<SheetError> for ServiceError {
    fn from(err: SheetError) -> Self {
        match err {
            SheetError::NotConfigured => ServiceError::ConfigurationError(
                "The application is not configured. Set SCRIPT_URL to the sheet service URL."
                    .to_string(),
            ),
            SheetError::Remote(msg) => ServiceError::from_remote_message(msg),
            other => ServiceError::RemoteError(other.to_string()),
        }
    }
}
