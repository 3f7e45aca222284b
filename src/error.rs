use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// The provider call an `Upstream` error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamOperation {
    Search,
    Details,
    GroceryList,
}

impl std::fmt::Display for UpstreamOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Search => f.write_str("recipe search"),
            Self::Details => f.write_str("recipe details"),
            Self::GroceryList => f.write_str("grocery list"),
        }
    }
}

#[derive(Error, Debug)]
pub enum LarderError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// `detail` is for logs only and never reaches an HTTP caller.
    #[error("Upstream {operation} failed: {detail}")]
    Upstream {
        operation: UpstreamOperation,
        detail: String,
    },

    #[error("Stored value for '{key}' is corrupt: {detail}")]
    PersistenceCorruption { key: &'static str, detail: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LarderError {
    pub fn upstream(operation: UpstreamOperation, detail: impl ToString) -> Self {
        Self::Upstream {
            operation,
            detail: detail.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to a caller or user.
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidRequest(message) => message.clone(),
            Self::Configuration(_) => "API key not configured".to_string(),
            Self::Upstream { operation, .. } => match operation {
                UpstreamOperation::Search => "Failed to search recipes".to_string(),
                UpstreamOperation::Details => "Failed to fetch recipe details".to_string(),
                UpstreamOperation::GroceryList => "Failed to generate grocery list".to_string(),
            },
            Self::PersistenceCorruption { .. } | Self::Database(_) | Self::Io(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for LarderError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.public_message() }));
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, LarderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_is_client_error() {
        let error = LarderError::InvalidRequest("Ingredients parameter is required".to_string());
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.public_message(), "Ingredients parameter is required");
    }

    #[test]
    fn test_upstream_message_hides_detail() {
        let error = LarderError::upstream(
            UpstreamOperation::Details,
            "404 Not Found from api.example.com?apiKey=secret",
        );
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let message = error.public_message();
        assert_eq!(message, "Failed to fetch recipe details");
        assert!(!message.contains("secret"));
    }

    #[test]
    fn test_configuration_error_is_server_error() {
        let error = LarderError::Configuration("SPOONACULAR_API_KEY is not set".to_string());
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.public_message(), "API key not configured");
    }
}
