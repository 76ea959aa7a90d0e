use crate::applications::SubmitError;
use crate::board::ApplyError;
use crate::catalog::{CatalogError, ImportError};
use crate::config::ConfigError;
use crate::delivery::DeliveryError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Import(ImportError),
    Catalog(CatalogError),
    Delivery(DeliveryError),
    Apply(ApplyError),
    InvalidRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Import(err) => write!(f, "catalog import error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Delivery(err) => write!(f, "delivery error: {}", err),
            AppError::Apply(err) => write!(f, "application error: {}", err),
            AppError::InvalidRequest(reason) => write!(f, "invalid request: {}", reason),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Delivery(err) => Some(err),
            AppError::Apply(err) => Some(err),
            AppError::InvalidRequest(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Catalog(CatalogError::Validation(_))
            | AppError::Apply(ApplyError::Submit(SubmitError::Invalid(_))) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Apply(ApplyError::UnknownPosting(_)) => StatusCode::NOT_FOUND,
            AppError::Apply(ApplyError::Submit(SubmitError::InFlight)) => StatusCode::CONFLICT,
            AppError::Catalog(CatalogError::Delivery(_))
            | AppError::Delivery(_)
            | AppError::Apply(ApplyError::Submit(SubmitError::Failed { .. })) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Import(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<DeliveryError> for AppError {
    fn from(value: DeliveryError) -> Self {
        Self::Delivery(value)
    }
}

impl From<ApplyError> for AppError {
    fn from(value: ApplyError) -> Self {
        Self::Apply(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PostingId;

    #[test]
    fn maps_failures_to_status_codes() {
        let cases = [
            (
                AppError::InvalidRequest("unknown level 'Lead'".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Apply(ApplyError::UnknownPosting(PostingId("9".to_string()))),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Apply(ApplyError::Submit(SubmitError::InFlight)),
                StatusCode::CONFLICT,
            ),
            (
                AppError::Delivery(DeliveryError::Transport("timed out".to_string())),
                StatusCode::BAD_GATEWAY,
            ),
            (AppError::Config(ConfigError::InvalidPort), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn display_names_the_failing_layer() {
        let error = AppError::from(DeliveryError::NotFound(PostingId("4".to_string())));
        assert!(error.to_string().starts_with("delivery error:"));
        assert!(std::error::Error::source(&error).is_some());
    }
}
