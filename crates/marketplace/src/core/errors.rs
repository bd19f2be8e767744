//! HTTP-facing error type.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use api_models::errors::{ApiErrorBody, FormErrors};
use marketplace_env::logger;

/// Error returned by request handlers. Validation failures carry the
/// structured per-field payload; everything else serializes as
/// `{code, message}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Form validation failed")]
    Validation(FormErrors),
    #[error("Resource not found")]
    NotFound,
    #[error("Missing required header: {0}")]
    MissingHeader(&'static str),
    #[error("Payment provider configuration error: {0}")]
    ProviderConfiguration(String),
    #[error("Payment provider call failed")]
    Provider,
    #[error("Search backend unavailable")]
    SearchBackend,
    #[error("Recommendation service unavailable")]
    RecommendationBackend,
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound => "not_found",
            Self::MissingHeader(_) => "missing_header",
            Self::ProviderConfiguration(_) => "provider_configuration",
            Self::Provider => "provider_error",
            Self::SearchBackend => "search_unavailable",
            Self::RecommendationBackend => "recommendations_unavailable",
        }
    }
}

impl From<FormErrors> for ApiError {
    fn from(errors: FormErrors) -> Self {
        Self::Validation(errors)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MissingHeader(_) | Self::ProviderConfiguration(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Provider => StatusCode::BAD_GATEWAY,
            Self::SearchBackend | Self::RecommendationBackend => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if !matches!(self, Self::Validation(_)) {
            logger::warn!(error = %self, "request failed");
        }
        match self {
            Self::Validation(errors) => HttpResponse::BadRequest().json(errors),
            other => HttpResponse::build(other.status_code()).json(ApiErrorBody {
                code: other.code().to_string(),
                message: other.to_string(),
            }),
        }
    }
}
