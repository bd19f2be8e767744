//! Payment-account handlers.
//!
//! The acting developer is identified by the `X-User-Id` header; accounts
//! are only visible to their owner.

use actix_web::{web, HttpRequest, HttpResponse};
use api_models::payments::{PaymentAccountForm, ProductCreateRequest};
use payment_providers::types::{PaymentAccount, User, WebappInfo};

use super::app::{header, AppState};
use crate::core::{errors::ApiError, payments};

const USER_ID_HEADER: &str = "X-User-Id";

fn current_user(req: &HttpRequest) -> Result<User, ApiError> {
    header(req, USER_ID_HEADER)
        .and_then(|value| value.parse::<i64>().ok())
        .map(|id| User { id })
        .ok_or(ApiError::MissingHeader(USER_ID_HEADER))
}

fn owned_account(state: &AppState, user: &User, id: i64) -> Result<PaymentAccount, ApiError> {
    state
        .stores
        .accounts
        .get(id)
        .filter(|account| account.user_id == user.id)
        .ok_or(ApiError::NotFound)
}

pub async fn list_providers(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(payments::list_providers(&state.settings.providers)))
}

pub async fn create_account(
    state: web::Data<AppState>,
    body: web::Json<PaymentAccountForm>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let provider = payments::resolve_provider(
        Some(body.provider_name()),
        None,
        &state.settings.providers,
        state.billing.clone(),
    )?;
    let response = payments::create_account(&state.stores, provider.as_ref(), &user, &body).await?;
    Ok(HttpResponse::Created().json(response))
}

pub async fn list_accounts(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let mut responses = Vec::new();
    for account in state.stores.accounts.for_user(user.id) {
        let provider = payments::provider_for_account(
            &account,
            &state.settings.providers,
            state.billing.clone(),
        )?;
        responses.push(payments::account_response(provider.as_ref(), &account));
    }
    Ok(HttpResponse::Ok().json(responses))
}

pub async fn account_details(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let account = owned_account(&state, &user, path.into_inner())?;
    let provider = payments::provider_for_account(
        &account,
        &state.settings.providers,
        state.billing.clone(),
    )?;
    let details = payments::account_details(provider.as_ref(), &account).await?;
    Ok(HttpResponse::Ok().json(details))
}

pub async fn update_account(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<PaymentAccountForm>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let account = owned_account(&state, &user, path.into_inner())?;
    let provider = payments::provider_for_account(
        &account,
        &state.settings.providers,
        state.billing.clone(),
    )?;
    payments::update_account(&state.stores, provider.as_ref(), account, &body).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn terms(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let account = owned_account(&state, &user, path.into_inner())?;
    let provider = payments::provider_for_account(
        &account,
        &state.settings.providers,
        state.billing.clone(),
    )?;
    let terms = payments::terms(provider.as_ref(), &account).await?;
    Ok(HttpResponse::Ok().json(terms))
}

pub async fn agree_terms(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let account = owned_account(&state, &user, path.into_inner())?;
    let provider = payments::provider_for_account(
        &account,
        &state.settings.providers,
        state.billing.clone(),
    )?;
    let terms = payments::agree_terms(&state.stores, provider.as_ref(), account).await?;
    Ok(HttpResponse::Ok().json(terms))
}

pub async fn create_product(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<ProductCreateRequest>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let user = current_user(&req)?;
    let account = owned_account(&state, &user, path.into_inner())?;
    let app = state
        .stores
        .webapps
        .get(body.app_id)
        .ok_or(ApiError::NotFound)?;
    let provider = payments::provider_for_account(
        &account,
        &state.settings.providers,
        state.billing.clone(),
    )?;
    let response = payments::create_product(
        provider.as_ref(),
        &account,
        &WebappInfo {
            id: app.id,
            name: app.name,
            slug: app.slug,
        },
    )
    .await?;
    Ok(HttpResponse::Created().json(response))
}
