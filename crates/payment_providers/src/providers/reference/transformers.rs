//! Wire shapes of the reference provider API.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize)]
pub struct ReferenceSellerRequest {
    pub uuid: uuid::Uuid,
    pub status: &'static str,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReferenceSellerResponse {
    pub id: i64,
    pub resource_uri: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReferenceSellerUpdateRequest {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReferenceProductRequest {
    pub external_id: String,
    pub seller_id: String,
    pub name: String,
    pub uuid: uuid::Uuid,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReferenceProductResponse {
    pub resource_uri: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReferenceTermsResponse {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub agreement: Option<String>,
}
