//! The provider contract and the flows every provider shares.

use api_models::payments::PaymentAccountForm;
use common_utils::{
    consts::PRODUCT_SECRET_LENGTH, crypto::generate_cryptographically_secure_random_string,
    errors::CustomResult,
};
use error_stack::{report, ResultExt};
use marketplace_env::logger;
use masking::Secret;

use crate::{
    client::SolitudeClient,
    errors::{ClientError, ProviderError},
    transformers::{
        GenericProductList, GenericProductRequest, GenericProductResponse, GenericSellerRequest,
        GenericSellerResponse,
    },
    types::{
        uri_to_pk, AccountDetails, PaymentAccount, ProviderName, SolitudeSeller, TermsResponse,
        User, WebappInfo, ACCESS_PURCHASE,
    },
};

/// Operation contract implemented by every billing provider.
///
/// Account-scoped methods must call [`check_account`] first: operating on an
/// account that belongs to a different provider is a programming error and
/// fails fast.
#[async_trait::async_trait]
pub trait Provider: Send + Sync + std::fmt::Debug {
    /// Registry name of the provider.
    fn name(&self) -> ProviderName;

    /// Create the remote account objects and return the local account.
    async fn account_create(
        &self,
        user: &User,
        form: &PaymentAccountForm,
    ) -> CustomResult<PaymentAccount, ProviderError>;

    /// Fetch provider-side account details for display.
    async fn account_retrieve(
        &self,
        account: &PaymentAccount,
    ) -> CustomResult<AccountDetails, ProviderError>;

    /// Push account changes to the provider.
    async fn account_update(
        &self,
        account: &mut PaymentAccount,
        _form: &PaymentAccountForm,
    ) -> CustomResult<(), ProviderError> {
        check_account(self.name(), account)?;
        Err(report!(ProviderError::FlowNotSupported {
            flow: "account_update",
            provider: self.name(),
        }))
    }

    /// Set the app up for payments; returns the remote product resource URI.
    async fn product_create(
        &self,
        account: &PaymentAccount,
        app: &WebappInfo,
    ) -> CustomResult<String, ProviderError>;

    /// Current terms-of-service document and agreement state.
    async fn terms_retrieve(
        &self,
        account: &PaymentAccount,
    ) -> CustomResult<TermsResponse, ProviderError>;

    /// Record agreement to the terms of service.
    async fn terms_update(
        &self,
        account: &mut PaymentAccount,
    ) -> CustomResult<TermsResponse, ProviderError>;

    /// Provider merchant-portal URL, when one exists.
    fn portal_url(&self, _app_slug: Option<&str>) -> String {
        String::new()
    }
}

/// Ownership guard: the account must belong to `provider`.
pub fn check_account(
    provider: ProviderName,
    account: &PaymentAccount,
) -> CustomResult<(), ProviderError> {
    if account.provider != provider {
        return Err(report!(ProviderError::WrongProviderAccount {
            account: account.provider,
            provider,
        }));
    }
    Ok(())
}

/// Create the seller identity for a user on the billing service.
pub(crate) async fn setup_seller(
    client: &SolitudeClient,
    user: &User,
) -> CustomResult<SolitudeSeller, ProviderError> {
    logger::info!(user_id = user.id, "creating seller");
    let uuid = uuid::Uuid::new_v4();
    let response: GenericSellerResponse = client
        .post(&client.solitude_url("/generic/seller/"), &GenericSellerRequest { uuid })
        .await
        .change_context(ProviderError::BillingCall)?;

    Ok(SolitudeSeller {
        user_id: user.id,
        uuid,
        resource_uri: response.resource_uri,
    })
}

/// Assemble the local account record after the remote objects exist.
pub(crate) fn setup_account(
    provider: ProviderName,
    user: &User,
    seller: &SolitudeSeller,
    uri: String,
    account_id: String,
    name: String,
    agreed_tos: bool,
) -> PaymentAccount {
    logger::info!(user_id = user.id, %uri, "created payment account");
    PaymentAccount {
        id: 0,
        user_id: user.id,
        provider,
        uri,
        account_id,
        seller_uri: seller.resource_uri.clone(),
        name,
        agreed_tos,
    }
}

/// Generate a fresh product secret.
pub(crate) fn generate_product_secret() -> Secret<String> {
    Secret::new(generate_cryptographically_secure_random_string(
        PRODUCT_SECRET_LENGTH,
    ))
}

/// Get or create the generic product for `(seller, external_id)`.
///
/// The lookup-first sequence makes product setup idempotent: a second call
/// for the same app returns the resource created by the first one, and the
/// freshly generated secret is only sent when the product does not exist yet.
pub(crate) async fn generic_product_get_or_create(
    client: &SolitudeClient,
    account: &PaymentAccount,
    external_id: &str,
    secret: Secret<String>,
) -> CustomResult<GenericProductResponse, ProviderError> {
    let lookup_url = format!(
        "{}?seller={}&external_id={}",
        client.solitude_url("/generic/product/"),
        uri_to_pk(&account.seller_uri),
        external_id,
    );

    let existing = match client.get::<GenericProductList>(&lookup_url).await {
        Ok(list) => list.objects,
        Err(err) if matches!(err.current_context(), ClientError::NotFound) => Vec::new(),
        Err(err) => return Err(err.change_context(ProviderError::BillingCall)),
    };

    if existing.len() > 1 {
        return Err(report!(ProviderError::MultipleRemoteResources));
    }
    if let Some(product) = existing.into_iter().next() {
        return Ok(product);
    }

    client
        .post(
            &client.solitude_url("/generic/product/"),
            &GenericProductRequest {
                seller: account.seller_uri.clone(),
                secret,
                external_id: external_id.to_string(),
                public_id: uuid::Uuid::new_v4(),
                access: ACCESS_PURCHASE,
            },
        )
        .await
        .change_context(ProviderError::BillingCall)
}
