//! API error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing url parameter")]
    MissingUrl,

    #[error("Invalid url")]
    InvalidUrl { details: String },

    #[error("Domain not allowed")]
    ForbiddenDomain { host: String },

    #[error("Upstream fetch failed")]
    Upstream { details: String },

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn upstream(err: impl std::fmt::Display) -> Self {
        ApiError::Upstream {
            details: err.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl | ApiError::InvalidUrl { .. } => StatusCode::BAD_REQUEST,
            ApiError::ForbiddenDomain { .. } => StatusCode::FORBIDDEN,
            ApiError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ApiError::MissingUrl => None,
            ApiError::InvalidUrl { details } | ApiError::Upstream { details } => Some(details.clone()),
            ApiError::ForbiddenDomain { host } => Some(host.clone()),
            ApiError::Internal(err) => Some(format!("{:#}", err)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let details = self.details();

        if status.is_server_error() {
            tracing::error!("{}: {}", self, details.as_deref().unwrap_or_default());
        } else {
            tracing::warn!("Rejected request: {}", self);
        }

        let body = match details {
            Some(details) => serde_json::json!({ "error": self.to_string(), "details": details }),
            None => serde_json::json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
