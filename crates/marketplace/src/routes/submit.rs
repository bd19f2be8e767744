//! App submission handlers.

use actix_web::{web, HttpResponse};
use api_models::submission::AppSubmitRequest;
use serde::Deserialize;

use super::app::AppState;
use crate::{
    core::{errors::ApiError, submit},
    db::Upload,
};

#[derive(Clone, Debug, Deserialize)]
pub struct UploadRequest {
    /// Manifest URL of the app being submitted.
    pub manifest_url: String,
}

/// Register a validated manifest upload and hand back its reference for the
/// submission step.
pub async fn create_upload(
    state: web::Data<AppState>,
    body: web::Json<UploadRequest>,
) -> Result<HttpResponse, ApiError> {
    let upload = Upload {
        id: uuid::Uuid::new_v4(),
        name: body.manifest_url.clone(),
        valid: true,
    };
    state.stores.uploads.insert(upload.clone());
    Ok(HttpResponse::Created().json(serde_json::json!({ "upload": upload.id })))
}

pub async fn submit_app(
    state: web::Data<AppState>,
    body: web::Json<AppSubmitRequest>,
) -> Result<HttpResponse, ApiError> {
    let response = submit::submit_app(&state.stores, &state.settings.submit, &body)?;
    Ok(HttpResponse::Created().json(response))
}
