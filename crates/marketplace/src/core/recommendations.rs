//! Proxy to the external recommendation service.

use std::sync::Arc;

use api_models::recommendations::{ItemToAcquire, RecommendationList};
use common_utils::{
    errors::CustomResult,
    ext_traits::BytesExt,
    request::{Method, RequestBuilder, RequestContent},
};
use error_stack::ResultExt;
use marketplace_env::logger;
use payment_providers::{client::RequestExecutor, errors::ClientError};

use crate::configs::settings::RecommendationsConfig;

/// Outcome of relaying an install record to the remote service.
#[derive(Clone, Debug)]
pub struct RelayedResponse {
    pub status_code: u16,
    pub body: bytes::Bytes,
}

#[derive(Clone)]
pub struct RecommendationClient {
    base_url: String,
    executor: Arc<dyn RequestExecutor>,
}

impl std::fmt::Debug for RecommendationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl RecommendationClient {
    pub fn new(config: &RecommendationsConfig, executor: Arc<dyn RequestExecutor>) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            executor,
        }
    }

    /// App ids recommended for the user's recommendation hash. An unknown
    /// user (remote 404) is an empty list, not an error.
    pub async fn fetch(&self, rec_hash: &str) -> CustomResult<Vec<i64>, ClientError> {
        let url = format!("{}/api/v2/recommend/21/{rec_hash}/", self.base_url);
        let request = RequestBuilder::new()
            .method(Method::Get)
            .url(&url)
            .attach_default_headers()
            .build();

        let response = self.executor.execute(request).await?;
        match response.status_code {
            200..=299 => {
                let list: RecommendationList = response
                    .response
                    .parse_struct("recommendation response")
                    .change_context(ClientError::ResponseDeserializationFailed)?;
                Ok(list.recommendations)
            }
            404 => {
                logger::info!("user not found in recommendation system");
                Ok(Vec::new())
            }
            status_code => {
                logger::warn!(%url, status_code, "recommendation fetch failed");
                Err(error_stack::report!(ClientError::UnexpectedStatus {
                    status_code
                }))
            }
        }
    }

    /// Record an installed item, relaying the remote status and body.
    pub async fn record_install(
        &self,
        rec_hash: &str,
        app_id: i64,
    ) -> CustomResult<RelayedResponse, ClientError> {
        let url = format!("{}/api/v2/user-items/{rec_hash}/", self.base_url);
        logger::info!(%url, app_id, "recording installed item");

        let body = ItemToAcquire {
            item_to_acquire: app_id.to_string(),
        };
        let content = RequestContent::json(&body).change_context(ClientError::RequestBuildFailed)?;
        let request = RequestBuilder::new()
            .method(Method::Post)
            .url(&url)
            .attach_default_headers()
            .set_body(content)
            .build();

        let response = self.executor.execute(request).await?;
        Ok(RelayedResponse {
            status_code: response.status_code,
            body: response.response,
        })
    }
}
