//! Domain types shared by the provider implementations.

use serde::{Deserialize, Serialize};

/// The providers this deployment knows about. The numeric ids are stable:
/// they appear in stored accounts and in the public API.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProviderName {
    Bango,
    Reference,
    Boku,
}

impl ProviderName {
    /// Stable numeric id of the provider.
    pub fn id(self) -> u8 {
        match self {
            Self::Bango => 1,
            Self::Reference => 2,
            Self::Boku => 3,
        }
    }

    /// Resolve a provider from its numeric id.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Bango),
            2 => Some(Self::Reference),
            3 => Some(Self::Boku),
            _ => None,
        }
    }

    /// Human-readable provider label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bango => "Bango",
            Self::Reference => "Reference Implementation",
            Self::Boku => "Boku",
        }
    }
}

/// A developer on whose behalf provider calls are made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct User {
    pub id: i64,
}

/// Seller identity registered with the billing service, 1:1 with a user.
/// Created once, before any payment account exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolitudeSeller {
    pub user_id: i64,
    pub uuid: uuid::Uuid,
    pub resource_uri: String,
}

/// A developer's billing account with one provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAccount {
    /// Local id; assigned by the store, `0` until inserted.
    pub id: i64,
    pub user_id: i64,
    pub provider: ProviderName,
    /// Remote resource URI of the provider-specific account object.
    pub uri: String,
    /// Remote account id (e.g. the Bango package id).
    pub account_id: String,
    /// Remote URI of the seller this account belongs to.
    pub seller_uri: String,
    /// Display name chosen by the developer.
    pub name: String,
    pub agreed_tos: bool,
}

/// The minimal app view providers need for product setup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebappInfo {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl WebappInfo {
    /// Identifier for the app's product on the billing service. Stable per
    /// app so repeated product setup finds the existing remote resource.
    pub fn external_id(&self) -> String {
        format!("marketplace-app:{}", self.id)
    }
}

/// Terms-of-service state reported by a provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermsResponse {
    /// Agreement text, when the provider serves one.
    pub text: Option<String>,
    pub agreed: bool,
}

/// Loosely structured account details returned by `account_retrieve`.
pub type AccountDetails = serde_json::Map<String, serde_json::Value>;

/// Access level requested for generic products.
pub const ACCESS_PURCHASE: u8 = 1;

/// Extract the primary key from a REST resource URI such as
/// `/generic/seller/42/`.
pub fn uri_to_pk(uri: &str) -> &str {
    uri.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_ids_round_trip() {
        for name in [ProviderName::Bango, ProviderName::Reference, ProviderName::Boku] {
            assert_eq!(ProviderName::from_id(name.id()), Some(name));
        }
        assert_eq!(ProviderName::from_id(0), None);
    }

    #[test]
    fn provider_names_parse() {
        use std::str::FromStr;

        assert_eq!(ProviderName::from_str("boku"), Ok(ProviderName::Boku));
        assert!(ProviderName::from_str("paypal").is_err());
    }

    #[test]
    fn pk_extraction() {
        assert_eq!(uri_to_pk("/generic/seller/42/"), "42");
        assert_eq!(uri_to_pk("/provider/reference/sellers/7"), "7");
        assert_eq!(uri_to_pk(""), "");
    }
}
