//! Payment-account management shapes.
//!
//! Each provider has its own account form; the create/update bodies are
//! tagged by provider name so the router can dispatch without inspecting
//! provider-specific fields.

use masking::Secret;
use serde::{Deserialize, Serialize};

/// Per-provider account forms, tagged by provider name.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum PaymentAccountForm {
    Bango(Box<BangoAccountForm>),
    Reference(ReferenceAccountForm),
    Boku(BokuAccountForm),
}

impl PaymentAccountForm {
    /// Provider name the form is addressed to.
    pub fn provider_name(&self) -> &'static str {
        match self {
            Self::Bango(_) => "bango",
            Self::Reference(_) => "reference",
            Self::Boku(_) => "boku",
        }
    }
}

/// Bango account form: package details plus bank details, field names per
/// the Bango API.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BangoAccountForm {
    #[serde(rename = "account_name")]
    pub account_name: String,

    // Package fields.
    pub admin_email_address: String,
    pub support_email_address: String,
    pub finance_email_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paypal_email_address: Option<String>,
    pub vendor_name: String,
    pub company_name: String,
    pub address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    pub address_city: String,
    pub address_state: String,
    pub address_zip_code: String,
    pub address_phone: String,
    pub country_iso: String,
    pub currency_iso: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,

    // Bank fields.
    pub bank_account_payee_name: String,
    pub bank_account_number: Secret<String>,
    pub bank_account_code: Secret<String>,
    pub bank_name: String,
    pub bank_address1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_address2: Option<String>,
    pub bank_address_zip_code: String,
    pub bank_address_iso: String,
}

/// Reference-provider account form (zippy sellers resource).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReferenceAccountForm {
    pub account_name: String,
    pub name: String,
    pub email: String,
}

/// Boku account form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BokuAccountForm {
    pub account_name: String,
    pub service_id: Secret<String>,
}

/// A stored payment account as returned by the API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentAccountResponse {
    pub id: i64,
    pub provider: String,
    pub name: String,
    pub agreed_tos: bool,
    pub account_id: String,
    pub resource_uri: String,
    /// Provider portal URL, when the provider exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portal_url: Option<String>,
}

/// Terms-of-service payload.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AccountTermsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub agreed: bool,
}

/// Request to set an app up for payments on an account.
#[derive(Clone, Debug, Deserialize)]
pub struct ProductCreateRequest {
    pub app_id: i64,
}

/// Remote product resource created for the app.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductCreateResponse {
    pub resource_uri: String,
}

/// One enabled provider, as listed by the API.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub id: u8,
    pub label: String,
}
