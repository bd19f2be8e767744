//! Wire types for the shared (generic) solitude resources. Provider-specific
//! shapes live in each provider's `transformers` module.

use masking::Secret;
use serde::{Deserialize, Serialize};

/// Body for creating a seller identity.
#[derive(Clone, Debug, Serialize)]
pub struct GenericSellerRequest {
    pub uuid: uuid::Uuid,
}

/// Seller resource as returned by solitude.
#[derive(Clone, Debug, Deserialize)]
pub struct GenericSellerResponse {
    pub resource_uri: String,
}

/// Body for creating a generic product.
#[derive(Clone, Debug, Serialize)]
pub struct GenericProductRequest {
    pub seller: String,
    pub secret: Secret<String>,
    pub external_id: String,
    pub public_id: uuid::Uuid,
    pub access: u8,
}

/// A generic product resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericProductResponse {
    pub resource_uri: String,
    pub external_id: String,
    #[serde(default)]
    pub public_id: Option<uuid::Uuid>,
}

/// List shape of the generic product resource.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GenericProductList {
    #[serde(default)]
    pub objects: Vec<GenericProductResponse>,
}
