//! Wire shapes of the Boku solitude resources.

use masking::Secret;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize)]
pub struct BokuSellerRequest {
    /// URI of the generic seller this Boku seller hangs off.
    pub seller: String,
    pub service_id: Secret<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BokuSellerResponse {
    pub resource_uri: String,
}
