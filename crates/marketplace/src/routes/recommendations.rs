//! Recommendation-service proxy handlers.
//!
//! The user's recommendation hash arrives in the `X-User-Hash` header; a
//! request without it is anonymous and gets an empty recommendation list.

use actix_web::{web, HttpRequest, HttpResponse};
use api_models::{
    search::{IndexedApp, Meta, SearchResponse},
    recommendations::RecordInstallRequest,
};
use marketplace_env::logger;

use super::app::{header, AppState};
use crate::core::errors::ApiError;

const USER_HASH_HEADER: &str = "X-User-Hash";

pub async fn recommend(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let app_ids = match header(&req, USER_HASH_HEADER) {
        Some(rec_hash) => state
            .recommendations
            .fetch(rec_hash)
            .await
            .map_err(|err| {
                logger::error!(error = ?err, "recommendation fetch failed");
                ApiError::RecommendationBackend
            })?,
        None => Vec::new(),
    };

    let objects: Vec<IndexedApp> = app_ids
        .iter()
        .filter_map(|id| state.stores.webapps.get(*id))
        .map(|app| IndexedApp {
            id: app.id,
            slug: app.slug,
            name: app.name,
            premium_type: app.premium_type.code(),
            ..Default::default()
        })
        .collect();

    Ok(HttpResponse::Ok().json(SearchResponse {
        meta: Meta {
            total_count: objects.len() as u64,
            limit: objects.len() as u32,
            offset: 0,
        },
        objects,
    }))
}

pub async fn record_install(
    state: web::Data<AppState>,
    body: web::Json<RecordInstallRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let rec_hash =
        header(&req, USER_HASH_HEADER).ok_or(ApiError::MissingHeader(USER_HASH_HEADER))?;

    let relayed = state
        .recommendations
        .record_install(rec_hash, body.app_id)
        .await
        .map_err(|err| {
            logger::error!(error = ?err, "install recording failed");
            ApiError::RecommendationBackend
        })?;

    let status = actix_web::http::StatusCode::from_u16(relayed.status_code)
        .unwrap_or(actix_web::http::StatusCode::BAD_GATEWAY);
    if status.is_success() {
        Ok(HttpResponse::build(status)
            .content_type(mime::APPLICATION_JSON)
            .body(relayed.body))
    } else {
        let error = String::from_utf8_lossy(&relayed.body).to_string();
        logger::error!(%error, "recommendation service rejected the install");
        Ok(HttpResponse::build(status).json(serde_json::json!({ "error": error })))
    }
}
