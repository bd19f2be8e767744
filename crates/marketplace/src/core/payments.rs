//! Payment-account orchestration between the HTTP layer and the provider
//! abstraction.

use std::sync::Arc;

use api_models::payments::{
    AccountTermsResponse, PaymentAccountForm, PaymentAccountResponse, ProductCreateResponse,
    ProviderInfo,
};
use error_stack::Report;
use marketplace_env::logger;
use payment_providers::{
    client::SolitudeClient,
    errors::ProviderError,
    registry::{self, ProvidersConfig},
    types::{PaymentAccount, User, WebappInfo},
    Provider,
};

use crate::{core::errors::ApiError, db::Stores};

/// Enabled providers as listed by the API, in configuration order.
pub fn list_providers(config: &ProvidersConfig) -> Vec<ProviderInfo> {
    config
        .enabled
        .iter()
        .map(|name| ProviderInfo {
            name: name.to_string(),
            id: name.id(),
            label: name.label().to_string(),
        })
        .collect()
}

/// Resolve a provider through the registry, mapping registry failures to
/// configuration errors.
pub fn resolve_provider(
    name: Option<&str>,
    id: Option<u8>,
    config: &ProvidersConfig,
    client: Arc<SolitudeClient>,
) -> Result<Box<dyn Provider>, ApiError> {
    registry::get_provider(name, id, config, client)
        .map_err(|err| ApiError::ProviderConfiguration(err.current_context().to_string()))
}

/// Provider owning an existing account.
pub fn provider_for_account(
    account: &PaymentAccount,
    config: &ProvidersConfig,
    client: Arc<SolitudeClient>,
) -> Result<Box<dyn Provider>, ApiError> {
    resolve_provider(Some(&account.provider.to_string()), None, config, client)
}

fn provider_error(err: Report<ProviderError>) -> ApiError {
    logger::error!(error = ?err, "provider call failed");
    ApiError::Provider
}

pub fn account_response(provider: &dyn Provider, account: &PaymentAccount) -> PaymentAccountResponse {
    let portal_url = provider.portal_url(None);
    PaymentAccountResponse {
        id: account.id,
        provider: account.provider.to_string(),
        name: account.name.clone(),
        agreed_tos: account.agreed_tos,
        account_id: account.account_id.clone(),
        resource_uri: account.uri.clone(),
        portal_url: (!portal_url.is_empty()).then_some(portal_url),
    }
}

pub async fn create_account(
    stores: &Stores,
    provider: &dyn Provider,
    user: &User,
    form: &PaymentAccountForm,
) -> Result<PaymentAccountResponse, ApiError> {
    let account = provider
        .account_create(user, form)
        .await
        .map_err(provider_error)?;
    let account = stores.accounts.insert(account);
    Ok(account_response(provider, &account))
}

pub async fn account_details(
    provider: &dyn Provider,
    account: &PaymentAccount,
) -> Result<serde_json::Value, ApiError> {
    let details = provider
        .account_retrieve(account)
        .await
        .map_err(provider_error)?;
    Ok(serde_json::Value::Object(details))
}

pub async fn update_account(
    stores: &Stores,
    provider: &dyn Provider,
    mut account: PaymentAccount,
    form: &PaymentAccountForm,
) -> Result<(), ApiError> {
    provider
        .account_update(&mut account, form)
        .await
        .map_err(provider_error)?;
    stores.accounts.update(account);
    Ok(())
}

pub async fn terms(
    provider: &dyn Provider,
    account: &PaymentAccount,
) -> Result<AccountTermsResponse, ApiError> {
    let terms = provider
        .terms_retrieve(account)
        .await
        .map_err(provider_error)?;
    Ok(AccountTermsResponse {
        text: terms.text,
        agreed: terms.agreed,
    })
}

pub async fn agree_terms(
    stores: &Stores,
    provider: &dyn Provider,
    mut account: PaymentAccount,
) -> Result<AccountTermsResponse, ApiError> {
    let terms = provider
        .terms_update(&mut account)
        .await
        .map_err(provider_error)?;
    stores.accounts.update(account);
    Ok(AccountTermsResponse {
        text: terms.text,
        agreed: terms.agreed,
    })
}

pub async fn create_product(
    provider: &dyn Provider,
    account: &PaymentAccount,
    app: &WebappInfo,
) -> Result<ProductCreateResponse, ApiError> {
    let resource_uri = provider
        .product_create(account, app)
        .await
        .map_err(provider_error)?;
    Ok(ProductCreateResponse { resource_uri })
}
