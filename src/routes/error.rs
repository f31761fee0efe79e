//! API error type and its JSON response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::cfn::TemplateError;
use crate::diagram::RenderError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("No YAML content provided")]
    MissingYaml,
    #[error("{0}")]
    InvalidRequest(String),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingYaml | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Template(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Grepable code for logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingYaml | Self::InvalidRequest(_) => "E_REQUEST_VALIDATION",
            Self::Template(TemplateError::Format(_)) => "E_TEMPLATE_FORMAT",
            Self::Template(TemplateError::Parse(_)) => "E_TEMPLATE_PARSE",
            Self::Render(_) => "E_RENDER",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %message, "diagram request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %message, "diagram request rejected");
        }
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
