//! The Bango provider.
//!
//! Bango accounts are backed by two solitude sub-resources: a package
//! (company and contact details) and bank details. Products additionally get
//! a Bango-specific product object next to the generic one, and the terms
//! flows go through the `sbi` (Bango Self Billing Invoice) resource.

pub mod transformers;

use std::sync::Arc;

use api_models::payments::PaymentAccountForm;
use common_utils::errors::CustomResult;
use error_stack::{report, ResultExt};
use marketplace_env::logger;

use self::transformers as bango;
use crate::{
    client::SolitudeClient,
    errors::{ClientError, ProviderError},
    provider::{
        check_account, generate_product_secret, generic_product_get_or_create, setup_account,
        setup_seller, Provider,
    },
    types::{
        uri_to_pk, AccountDetails, PaymentAccount, ProviderName, TermsResponse, User, WebappInfo,
    },
};

/// Package fields exposed through `account_retrieve` and accepted on update.
const PACKAGE_FIELDS: &[&str] = &[
    "adminEmailAddress",
    "supportEmailAddress",
    "financeEmailAddress",
    "paypalEmailAddress",
    "vendorName",
    "companyName",
    "address1",
    "address2",
    "addressCity",
    "addressState",
    "addressZipCode",
    "addressPhone",
    "countryIso",
    "currencyIso",
    "vatNumber",
];

/// Tags allowed to survive in Bango agreement text.
const AGREEMENT_TAGS: &[&str] = &["h3", "h4", "br", "p", "hr"];

#[derive(Clone, Debug)]
pub struct Bango {
    client: Arc<SolitudeClient>,
}

impl Bango {
    pub fn new(client: Arc<SolitudeClient>) -> Self {
        Self { client }
    }

    async fn package_for(
        &self,
        account: &PaymentAccount,
    ) -> CustomResult<bango::BangoPackageDetail, ProviderError> {
        self.client
            .get(&self.client.solitude_url(&account.uri))
            .await
            .change_context(ProviderError::BillingCall)
    }
}

fn clean_agreement_text(text: &str) -> String {
    ammonia::Builder::default()
        .tags(AGREEMENT_TAGS.iter().copied().collect())
        .clean(text)
        .to_string()
}

#[async_trait::async_trait]
impl Provider for Bango {
    fn name(&self) -> ProviderName {
        ProviderName::Bango
    }

    async fn account_create(
        &self,
        user: &User,
        form: &PaymentAccountForm,
    ) -> CustomResult<PaymentAccount, ProviderError> {
        let PaymentAccountForm::Bango(form) = form else {
            return Err(report!(ProviderError::UnsupportedAccountForm {
                provider: self.name(),
            }));
        };

        let seller = setup_seller(&self.client, user).await?;

        logger::info!(user_id = user.id, "creating Bango package");
        let package: bango::BangoPackageResponse = self
            .client
            .post(
                &self.client.solitude_url("/bango/package/"),
                &bango::BangoPackageRequest::from((form.as_ref(), &seller)),
            )
            .await
            .change_context(ProviderError::BillingCall)?;

        logger::info!(user_id = user.id, "creating Bango bank details");
        let bank_details =
            bango::BangoBankDetailsRequest::from((form.as_ref(), package.resource_uri.as_str()));
        self.client
            .post::<_, serde_json::Value>(
                &self.client.solitude_url("/bango/bank/"),
                &bank_details,
            )
            .await
            .change_context(ProviderError::BillingCall)?;

        Ok(setup_account(
            self.name(),
            user,
            &seller,
            package.resource_uri,
            package.package_id.to_string(),
            form.account_name.clone(),
            false,
        ))
    }

    async fn account_retrieve(
        &self,
        account: &PaymentAccount,
    ) -> CustomResult<AccountDetails, ProviderError> {
        check_account(self.name(), account)?;

        let url = format!(
            "{}?full=true",
            self.client
                .solitude_url(&format!("/bango/package/{}/", uri_to_pk(&account.uri)))
        );
        let package: bango::BangoPackageDetail = self
            .client
            .get(&url)
            .await
            .change_context(ProviderError::BillingCall)?;

        let mut details = AccountDetails::new();
        details.insert("account_name".into(), account.name.clone().into());
        details.extend(
            package
                .full
                .into_iter()
                .filter(|(key, _)| PACKAGE_FIELDS.contains(&key.as_str())),
        );
        Ok(details)
    }

    async fn account_update(
        &self,
        account: &mut PaymentAccount,
        form: &PaymentAccountForm,
    ) -> CustomResult<(), ProviderError> {
        check_account(self.name(), account)?;
        let PaymentAccountForm::Bango(form) = form else {
            return Err(report!(ProviderError::UnsupportedAccountForm {
                provider: self.name(),
            }));
        };

        account.name = form.account_name.clone();
        self.client
            .patch::<_, serde_json::Value>(
                &self.client.solitude_url(&account.uri),
                &bango::BangoPackageUpdateRequest::from(form.as_ref()),
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
        let generic =
            generic_product_get_or_create(&self.client, account, &app.external_id(), secret.clone())
                .await?;

        // Solitude keeps Bango-specific product records (Bango number and
        // friends) next to the generic product; look that one up first.
        let lookup_url = format!(
            "{}?seller_product={}",
            self.client.solitude_url("/bango/product/"),
            uri_to_pk(&generic.resource_uri),
        );
        let existing = match self
            .client
            .get::<bango::BangoProductList>(&lookup_url)
            .await
        {
            Ok(list) => list.objects,
            Err(err) if matches!(err.current_context(), ClientError::NotFound) => Vec::new(),
            Err(err) => return Err(err.change_context(ProviderError::BillingCall)),
        };
        if let Some(product) = existing.into_iter().next() {
            return Ok(product.resource_uri);
        }

        let created: bango::BangoProductResponse = self
            .client
            .post(
                &self.client.solitude_url("/provider/bango/product/"),
                &bango::BangoProductRequest {
                    seller_bango: account.uri.clone(),
                    seller_product: generic.resource_uri,
                    name: app.name.clone(),
                    package_id: account.account_id.clone(),
                    category_id: 1,
                    secret,
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

        let package = self.package_for(account).await?;
        let url = format!(
            "{}?seller_bango={}",
            self.client.solitude_url("/bango/sbi/agreement/"),
            package.resource_uri,
        );
        let agreement: bango::SbiAgreementResponse = self
            .client
            .get(&url)
            .await
            .change_context(ProviderError::BillingCall)?;

        Ok(TermsResponse {
            text: agreement.text.as_deref().map(clean_agreement_text),
            agreed: account.agreed_tos,
        })
    }

    async fn terms_update(
        &self,
        account: &mut PaymentAccount,
    ) -> CustomResult<TermsResponse, ProviderError> {
        check_account(self.name(), account)?;

        let package = self.package_for(account).await?;
        account.agreed_tos = true;
        let response: bango::SbiResponse = self
            .client
            .post(
                &self.client.solitude_url("/bango/sbi/"),
                &bango::SbiRequest {
                    seller_bango: package.resource_uri,
                },
            )
            .await
            .change_context(ProviderError::BillingCall)?;

        Ok(TermsResponse {
            text: response.text.as_deref().map(clean_agreement_text),
            agreed: true,
        })
    }

    fn portal_url(&self, app_slug: Option<&str>) -> String {
        app_slug
            .map(|slug| format!("/developers/apps/{slug}/payments/bango-portal/"))
            .unwrap_or_default()
    }
}
