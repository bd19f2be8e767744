//! Wire shapes of the Bango solitude resources.

use api_models::payments::BangoAccountForm;
use masking::Secret;
use serde::{Deserialize, Serialize};

use crate::types::SolitudeSeller;

/// Package creation body. Bango wants camelCase field names.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BangoPackageRequest {
    pub seller: String,
    pub admin_email_address: String,
    pub support_email_address: String,
    pub finance_email_address: String,
    /// Required by the remote API but unused by the marketplace, hence the
    /// placeholder default.
    pub paypal_email_address: String,
    pub vendor_name: String,
    pub company_name: String,
    pub address1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub address_city: String,
    pub address_state: String,
    pub address_zip_code: String,
    pub address_phone: String,
    pub country_iso: String,
    pub currency_iso: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
}

impl From<(&BangoAccountForm, &SolitudeSeller)> for BangoPackageRequest {
    fn from((form, seller): (&BangoAccountForm, &SolitudeSeller)) -> Self {
        Self {
            seller: seller.resource_uri.clone(),
            admin_email_address: form.admin_email_address.clone(),
            support_email_address: form.support_email_address.clone(),
            finance_email_address: form.finance_email_address.clone(),
            paypal_email_address: form
                .paypal_email_address
                .clone()
                .unwrap_or_else(|| "nobody@example.com".to_string()),
            vendor_name: form.vendor_name.clone(),
            company_name: form.company_name.clone(),
            address1: form.address1.clone(),
            address2: form.address2.clone(),
            address_city: form.address_city.clone(),
            address_state: form.address_state.clone(),
            address_zip_code: form.address_zip_code.clone(),
            address_phone: form.address_phone.clone(),
            country_iso: form.country_iso.clone(),
            currency_iso: form.currency_iso.clone(),
            vat_number: form.vat_number.clone(),
        }
    }
}

/// Package updates: the same field set, PATCHed to the package URI.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BangoPackageUpdateRequest {
    pub admin_email_address: String,
    pub support_email_address: String,
    pub finance_email_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paypal_email_address: Option<String>,
    pub vendor_name: String,
    pub company_name: String,
    pub address1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub address_city: String,
    pub address_state: String,
    pub address_zip_code: String,
    pub address_phone: String,
    pub country_iso: String,
    pub currency_iso: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
}

impl From<&BangoAccountForm> for BangoPackageUpdateRequest {
    fn from(form: &BangoAccountForm) -> Self {
        Self {
            admin_email_address: form.admin_email_address.clone(),
            support_email_address: form.support_email_address.clone(),
            finance_email_address: form.finance_email_address.clone(),
            paypal_email_address: form.paypal_email_address.clone(),
            vendor_name: form.vendor_name.clone(),
            company_name: form.company_name.clone(),
            address1: form.address1.clone(),
            address2: form.address2.clone(),
            address_city: form.address_city.clone(),
            address_state: form.address_state.clone(),
            address_zip_code: form.address_zip_code.clone(),
            address_phone: form.address_phone.clone(),
            country_iso: form.country_iso.clone(),
            currency_iso: form.currency_iso.clone(),
            vat_number: form.vat_number.clone(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct BangoPackageResponse {
    pub resource_uri: String,
    pub package_id: i64,
}

/// Package document as returned by a detail GET; `full=true` expands the
/// remote-side fields into `full`.
#[derive(Clone, Debug, Deserialize)]
pub struct BangoPackageDetail {
    pub resource_uri: String,
    #[serde(default)]
    pub full: serde_json::Map<String, serde_json::Value>,
}

/// Bank details creation body.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BangoBankDetailsRequest {
    pub seller_bango: String,
    pub bank_account_payee_name: String,
    pub bank_account_number: Secret<String>,
    pub bank_account_code: Secret<String>,
    pub bank_name: String,
    pub bank_address1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_address2: Option<String>,
    pub bank_address_zip_code: String,
    pub bank_address_iso: String,
}

impl From<(&BangoAccountForm, &str)> for BangoBankDetailsRequest {
    fn from((form, package_uri): (&BangoAccountForm, &str)) -> Self {
        Self {
            seller_bango: package_uri.to_string(),
            bank_account_payee_name: form.bank_account_payee_name.clone(),
            bank_account_number: form.bank_account_number.clone(),
            bank_account_code: form.bank_account_code.clone(),
            bank_name: form.bank_name.clone(),
            bank_address1: form.bank_address1.clone(),
            bank_address2: form.bank_address2.clone(),
            bank_address_zip_code: form.bank_address_zip_code.clone(),
            bank_address_iso: form.bank_address_iso.clone(),
        }
    }
}

/// Bango-specific product creation body.
#[derive(Clone, Debug, Serialize)]
pub struct BangoProductRequest {
    pub seller_bango: String,
    pub seller_product: String,
    pub name: String,
    #[serde(rename = "packageId")]
    pub package_id: String,
    #[serde(rename = "categoryId")]
    pub category_id: u8,
    pub secret: Secret<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BangoProductResponse {
    pub resource_uri: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct BangoProductList {
    #[serde(default)]
    pub objects: Vec<BangoProductResponse>,
}

/// Self Billing Invoice agreement submission.
#[derive(Clone, Debug, Serialize)]
pub struct SbiRequest {
    pub seller_bango: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SbiResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub expires: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SbiAgreementResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub valid: Option<String>,
}
