//! Search, featured, suggestions and rocketbar handlers.

use actix_web::{web, HttpRequest, HttpResponse};
use api_models::search::SearchQueryParams;
use marketplace_env::logger;

use super::app::{header, AppState};
use crate::core::{
    collections, errors::ApiError, search as core_search, search::SearchForm,
};

const SUGGESTIONS_CONTENT_TYPE: &str = "application/x-suggestions+json";
const ROCKETBAR_CONTENT_TYPE: &str = "application/x-rocketbar+json";

async fn run_search(
    state: &AppState,
    form: &SearchForm,
    req: &HttpRequest,
) -> Result<(api_models::search::SearchResponse, Option<String>), ApiError> {
    let region = core_search::resolve_region(form.region.as_deref(), header(req, "X-Region"));
    let query = core_search::build_query(form, region.as_deref());
    let result = state
        .es
        .search(&query)
        .await
        .map_err(|err| {
            logger::error!(error = ?err, "search backend call failed");
            ApiError::SearchBackend
        })?;
    Ok((core_search::to_search_response(form, result), region))
}

pub async fn search(
    state: web::Data<AppState>,
    params: web::Query<SearchQueryParams>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let form = core_search::validate(&params, &state.settings.search)?;
    let (response, _) = run_search(&state, &form, &req).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub async fn featured(
    state: web::Data<AppState>,
    params: web::Query<SearchQueryParams>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let form = core_search::validate(&params, &state.settings.search)?;
    let (base, region) = run_search(&state, &form, &req).await?;

    let carrier = header(&req, "X-Carrier");
    let (response, fallbacks) = collections::add_featured(
        &state.stores.collections,
        base,
        region.as_deref(),
        carrier,
    );

    let mut builder = HttpResponse::Ok();
    for (name, dropped) in fallbacks {
        builder.insert_header((format!("API-Fallback-{name}"), dropped.join(",")));
    }
    Ok(builder.json(response))
}

pub async fn suggestions(
    state: web::Data<AppState>,
    params: web::Query<SearchQueryParams>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let form = core_search::validate(&params, &state.settings.search)?;
    let (response, _) = run_search(&state, &form, &req).await?;

    let payload = core_search::to_suggestions(&form.q, &response);
    let body = serde_json::to_string(&payload).map_err(|_| ApiError::SearchBackend)?;
    Ok(HttpResponse::Ok()
        .content_type(SUGGESTIONS_CONTENT_TYPE)
        .body(body))
}

pub async fn rocketbar(
    state: web::Data<AppState>,
    params: web::Query<SearchQueryParams>,
) -> Result<HttpResponse, ApiError> {
    let limit = core_search::rocketbar_limit(&params, &state.settings.search);
    let q = params.q.as_deref().unwrap_or_default();
    let query = core_search::build_rocketbar_query(q, limit);

    let result = state.es.suggest(&query).await.map_err(|err| {
        logger::error!(error = ?err, "completion suggester call failed");
        ApiError::SearchBackend
    })?;
    let options = result
        .apps
        .into_iter()
        .next()
        .map(|group| group.options)
        .unwrap_or_default();

    let body = serde_json::to_string(&options).map_err(|_| ApiError::SearchBackend)?;
    Ok(HttpResponse::Ok()
        .content_type(ROCKETBAR_CONTENT_TYPE)
        .body(body))
}
