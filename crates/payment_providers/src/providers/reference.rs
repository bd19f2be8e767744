//! The reference provider.
//!
//! Talks to a zippy-style provider API instead of solitude's own resources.
//! Sellers, products and terms all live under `/reference/` on the provider
//! API; only the generic product is still created on solitude.

pub mod transformers;

use std::sync::Arc;

use api_models::payments::PaymentAccountForm;
use common_utils::errors::CustomResult;
use error_stack::{report, ResultExt};
use marketplace_env::logger;

use self::transformers as reference;
use crate::{
    client::SolitudeClient,
    errors::{ClientError, ProviderError},
    provider::{
        check_account, generate_product_secret, generic_product_get_or_create, setup_account,
        setup_seller, Provider,
    },
    types::{AccountDetails, PaymentAccount, ProviderName, TermsResponse, User, WebappInfo},
};

/// Seller document fields that are remote-API bookkeeping, not account data.
/// They get stripped before the document is PUT back on terms agreement.
const SELLER_META_FIELDS: &[&str] = &["id", "resource_uri", "resource_name"];

#[derive(Clone, Debug)]
pub struct Reference {
    client: Arc<SolitudeClient>,
}

impl Reference {
    pub fn new(client: Arc<SolitudeClient>) -> Self {
        Self { client }
    }

    fn seller_url(&self, account: &PaymentAccount) -> String {
        self.client.provider_url(&account.uri)
    }
}

fn today() -> String {
    let date = time::OffsetDateTime::now_utc().date();
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

#[async_trait::async_trait]
impl Provider for Reference {
    fn name(&self) -> ProviderName {
        ProviderName::Reference
    }

    async fn account_create(
        &self,
        user: &User,
        form: &PaymentAccountForm,
    ) -> CustomResult<PaymentAccount, ProviderError> {
        let PaymentAccountForm::Reference(form) = form else {
            return Err(report!(ProviderError::UnsupportedAccountForm {
                provider: self.name(),
            }));
        };

        let seller = setup_seller(&self.client, user).await?;

        logger::info!(user_id = user.id, "creating reference seller");
        let created: reference::ReferenceSellerResponse = self
            .client
            .post(
                &self.client.provider_url("/reference/sellers/"),
                &reference::ReferenceSellerRequest {
                    uuid: seller.uuid,
                    status: "ACTIVE",
                    name: form.name.clone(),
                    email: form.email.clone(),
                },
            )
            .await
            .change_context(ProviderError::BillingCall)?;

        Ok(setup_account(
            self.name(),
            user,
            &seller,
            created.resource_uri,
            created.id.to_string(),
            form.account_name.clone(),
            false,
        ))
    }

    async fn account_retrieve(
        &self,
        account: &PaymentAccount,
    ) -> CustomResult<AccountDetails, ProviderError> {
        check_account(self.name(), account)?;

        let mut details: AccountDetails = self
            .client
            .get(&self.seller_url(account))
            .await
            .change_context(ProviderError::BillingCall)?;
        details.insert("account_name".into(), account.name.clone().into());
        Ok(details)
    }

    async fn account_update(
        &self,
        account: &mut PaymentAccount,
        form: &PaymentAccountForm,
    ) -> CustomResult<(), ProviderError> {
        check_account(self.name(), account)?;
        let PaymentAccountForm::Reference(form) = form else {
            return Err(report!(ProviderError::UnsupportedAccountForm {
                provider: self.name(),
            }));
        };

        account.name = form.account_name.clone();
        self.client
            .put::<_, serde_json::Value>(
                &self.seller_url(account),
                &reference::ReferenceSellerUpdateRequest {
                    name: form.name.clone(),
                    email: form.email.clone(),
                },
            )
            .await
            .change_context(ProviderError::BillingCall)?;
        Ok(())
    }

    async fn product_create(
        &self,
        account: &PaymentAccount,
        app: &WebappInfo,
    ) -> CustomResult<String, ProviderError> {
        check_account(self.name(), account)?;

        let secret = generate_product_secret();
        let external_id = app.external_id();
        generic_product_get_or_create(&self.client, account, &external_id, secret).await?;

        // The provider API serves a bare list, not a paginated envelope.
        let lookup_url = format!(
            "{}?external_id={}&seller_id={}",
            self.client.provider_url("/reference/products/"),
            external_id,
            account.account_id,
        );
        let existing = match self
            .client
            .get::<Vec<reference::ReferenceProductResponse>>(&lookup_url)
            .await
        {
            Ok(products) => products,
            Err(err) if matches!(err.current_context(), ClientError::NotFound) => Vec::new(),
            Err(err) => return Err(err.change_context(ProviderError::BillingCall)),
        };

        if existing.len() > 1 {
            return Err(report!(ProviderError::MultipleRemoteResources));
        }
        if let Some(product) = existing.into_iter().next() {
            return Ok(product.resource_uri);
        }

        let created: reference::ReferenceProductResponse = self
            .client
            .post(
                &self.client.provider_url("/reference/products/"),
                &reference::ReferenceProductRequest {
                    external_id,
                    seller_id: account.account_id.clone(),
                    name: app.name.clone(),
                    uuid: uuid::Uuid::new_v4(),
                },
            )
            .await
            .change_context(ProviderError::BillingCall)?;
        Ok(created.resource_uri)
    }

    async fn terms_retrieve(
        &self,
        account: &PaymentAccount,
    ) -> CustomResult<TermsResponse, ProviderError> {
        check_account(self.name(), account)?;

        let url = self
            .client
            .provider_url(&format!("/reference/terms/{}/", account.account_id));
        let terms: reference::ReferenceTermsResponse = self
            .client
            .get(&url)
            .await
            .change_context(ProviderError::BillingCall)?;

        Ok(TermsResponse {
            text: terms
                .text
                .as_deref()
                .map(|text| ammonia::clean(text)),
            agreed: account.agreed_tos,
        })
    }

    async fn terms_update(
        &self,
        account: &mut PaymentAccount,
    ) -> CustomResult<TermsResponse, ProviderError> {
        check_account(self.name(), account)?;

        // Agreement is recorded by round-tripping the seller document with an
        // `agreement` date stamped in. The read-only meta fields must not be
        // echoed back.
        let mut seller: AccountDetails = self
            .client
            .get(&self.seller_url(account))
            .await
            .change_context(ProviderError::BillingCall)?;
        for field in SELLER_META_FIELDS {
            seller.remove(*field);
        }
        seller.insert("agreement".into(), today().into());

        self.client
            .put::<_, serde_json::Value>(&self.seller_url(account), &seller)
            .await
            .change_context(ProviderError::BillingCall)?;

        account.agreed_tos = true;
        Ok(TermsResponse {
            text: None,
            agreed: true,
        })
    }
}
