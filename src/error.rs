use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::domain::HsCodeError;
use crate::engine::{CalcError, InputField};
use crate::orchestration::{ResolveError, UpdateError};
use crate::tariffs::TariffSourceError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    Internal(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Invalid {field}: {message}")]
    InvalidField { field: InputField, message: String },
    /// Request body that could not be read into the expected shape.
    #[error("Invalid request body: {message}")]
    InvalidBody {
        field: Option<String>,
        message: String,
    },
    #[error("Unprocessable: {0}")]
    Unprocessable(String),
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl From<CalcError> for AppError {
    fn from(err: CalcError) -> Self {
        match err {
            CalcError::InvalidInput { field, reason } => AppError::InvalidField {
                field,
                message: reason,
            },
            CalcError::InvalidElasticity(_) => AppError::Unprocessable(err.to_string()),
        }
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::InvalidHsCode(e) => AppError::from(e),
            ResolveError::MissingTariffRate => AppError::InvalidField {
                field: InputField::TariffRatePercent,
                message: "is required unless hsCode names a known product".to_string(),
            },
            ResolveError::Calc(e) => AppError::from(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => AppError::InvalidBody {
                field: rejected_field(&message),
                message,
            },
            _ => AppError::BadRequest(message),
        }
    }
}

/// Name of the JSON field a deserialization failure points at, if any.
///
/// Handles both `<path>: <reason>` and serde's ``missing field `<name>` ``.
fn rejected_field(message: &str) -> Option<String> {
    if let Some((_, rest)) = message.split_once("missing field `") {
        return rest.split_once('`').map(|(name, _)| name.to_string());
    }

    let detail = message
        .split_once("target type: ")
        .map_or(message, |(_, detail)| detail);
    let (path, _) = detail.split_once(": ")?;
    let name = path.rsplit('.').next()?;
    let is_key = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    is_key.then(|| name.to_string())
}

impl From<HsCodeError> for AppError {
    fn from(err: HsCodeError) -> Self {
        AppError::BadRequest(format!("Invalid HS code: {}", err))
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::HistoryUnavailable | CatalogError::HistoryNotFound(_) => {
                AppError::NotFound(err.to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<TariffSourceError> for AppError {
    fn from(err: TariffSourceError) -> Self {
        AppError::Upstream(format!("Failed to fetch tariff data: {}", err))
    }
}

impl From<UpdateError> for AppError {
    fn from(err: UpdateError) -> Self {
        match err {
            UpdateError::Source(e) => AppError::from(e),
            UpdateError::Catalog(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::InvalidField { field, message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": format!("{} {}", field, message),
                    "field": field,
                }),
            ),
            AppError::InvalidBody { field, message } => {
                let body = match field {
                    Some(field) => json!({ "error": message, "field": field }),
                    None => json!({ "error": message }),
                };
                (StatusCode::BAD_REQUEST, body)
            }
            AppError::Unprocessable(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "error": msg }))
            }
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, json!({ "error": msg })),
        };

        (status, Json(body)).into_response()
    }
}
