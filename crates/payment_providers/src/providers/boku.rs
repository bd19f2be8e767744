//! The Boku provider.
//!
//! Boku onboarding happens on Boku's own portal, so the local surface is
//! thin: one seller object on solitude keyed by the carrier service id, no
//! editable account details and no terms flow (agreement is implied by
//! completing the portal signup).

pub mod transformers;

use std::sync::Arc;

use api_models::payments::PaymentAccountForm;
use common_utils::errors::CustomResult;
use error_stack::{report, ResultExt};
use marketplace_env::logger;

use self::transformers as boku;
use crate::{
    client::SolitudeClient,
    errors::ProviderError,
    provider::{
        check_account, generate_product_secret, generic_product_get_or_create, setup_account,
        setup_seller, Provider,
    },
    types::{
        uri_to_pk, AccountDetails, PaymentAccount, ProviderName, TermsResponse, User, WebappInfo,
    },
};

#[derive(Clone, Debug)]
pub struct Boku {
    client: Arc<SolitudeClient>,
}

impl Boku {
    pub fn new(client: Arc<SolitudeClient>) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Provider for Boku {
    fn name(&self) -> ProviderName {
        ProviderName::Boku
    }

    async fn account_create(
        &self,
        user: &User,
        form: &PaymentAccountForm,
    ) -> CustomResult<PaymentAccount, ProviderError> {
        let PaymentAccountForm::Boku(form) = form else {
            return Err(report!(ProviderError::UnsupportedAccountForm {
                provider: self.name(),
            }));
        };

        let seller = setup_seller(&self.client, user).await?;

        logger::info!(user_id = user.id, "creating Boku seller");
        let created: boku::BokuSellerResponse = self
            .client
            .post(
                &self.client.solitude_url("/boku/seller/"),
                &boku::BokuSellerRequest {
                    seller: seller.resource_uri.clone(),
                    service_id: form.service_id.clone(),
                },
            )
            .await
            .change_context(ProviderError::BillingCall)?;

        // Signing up on the Boku portal already covers the terms.
        Ok(setup_account(
            self.name(),
            user,
            &seller,
            created.resource_uri.clone(),
            uri_to_pk(&created.resource_uri).to_string(),
            form.account_name.clone(),
            true,
        ))
    }

    // Nothing to show: the account details live on Boku's portal.
    async fn account_retrieve(
        &self,
        account: &PaymentAccount,
    ) -> CustomResult<AccountDetails, ProviderError> {
        check_account(self.name(), account)?;
        Ok(AccountDetails::new())
    }

    async fn product_create(
        &self,
        account: &PaymentAccount,
        app: &WebappInfo,
    ) -> CustomResult<String, ProviderError> {
        check_account(self.name(), account)?;

        let secret = generate_product_secret();
        let generic =
            generic_product_get_or_create(&self.client, account, &app.external_id(), secret)
                .await?;
        Ok(generic.resource_uri)
    }

    async fn terms_retrieve(
        &self,
        account: &PaymentAccount,
    ) -> CustomResult<TermsResponse, ProviderError> {
        check_account(self.name(), account)?;
        Ok(TermsResponse {
            text: None,
            agreed: true,
        })
    }

    async fn terms_update(
        &self,
        account: &mut PaymentAccount,
    ) -> CustomResult<TermsResponse, ProviderError> {
        check_account(self.name(), account)?;
        account.agreed_tos = true;
        Ok(TermsResponse {
            text: None,
            agreed: true,
        })
    }

    fn portal_url(&self, _app_slug: Option<&str>) -> String {
        self.client.boku_portal_url().unwrap_or_default().to_string()
    }
}
