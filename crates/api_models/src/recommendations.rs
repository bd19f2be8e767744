//! Recommendation-service proxy shapes.

use serde::{Deserialize, Serialize};

/// Response body of the remote recommendation fetch endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RecommendationList {
    pub recommendations: Vec<i64>,
}

/// Body accepted by the install-recording endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordInstallRequest {
    pub app_id: i64,
}

/// Body relayed to the remote service when recording an install.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemToAcquire {
    pub item_to_acquire: String,
}
