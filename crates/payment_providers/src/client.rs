//! HTTP plumbing for the billing services (solitude and the zippy-style
//! provider APIs).
//!
//! Requests are described with `common_utils::request` types and handed to a
//! [`RequestExecutor`]; the reqwest-backed executor is the only place that
//! performs I/O, which keeps every provider flow testable with canned
//! responses.

use std::sync::Arc;

use common_utils::{
    errors::CustomResult,
    ext_traits::BytesExt,
    request::{Method, Request, RequestBuilder, RequestContent},
};
use error_stack::{report, IntoReport, ResultExt};
use marketplace_env::logger;
use masking::PeekInterface;
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::ClientError;

/// Raw response from a billing service.
#[derive(Clone, Debug)]
pub struct Response {
    pub status_code: u16,
    pub response: bytes::Bytes,
}

/// Seam between request descriptions and actual I/O.
#[async_trait::async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Perform the request, returning the raw response whatever its status.
    async fn execute(&self, request: Request) -> CustomResult<Response, ClientError>;
}

/// Production executor backed by a shared reqwest client.
#[derive(Clone, Debug, Default)]
pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl ReqwestExecutor {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RequestExecutor for ReqwestExecutor {
    async fn execute(&self, request: Request) -> CustomResult<Response, ClientError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
            Method::Patch => reqwest::Method::PATCH,
        };

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value.into_inner());
        }
        if let Some(body) = request.body {
            builder = builder
                .header(http::header::CONTENT_TYPE.as_str(), body.content_type().as_ref())
                .body(body.inner().peek().clone());
        }

        let response = builder
            .send()
            .await
            .into_report()
            .change_context(ClientError::RequestFailed)?;

        let status_code = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .into_report()
            .change_context(ClientError::RequestFailed)?;

        Ok(Response {
            status_code,
            response: body,
        })
    }
}

/// Base URLs of the billing services.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct BillingConfig {
    /// Solitude base URL, e.g. `https://payments.internal`.
    pub solitude_base_url: String,
    /// Base URL of the zippy-style provider APIs.
    pub zippy_base_url: String,
    /// Merchant portal URL for Boku, if deployed.
    #[serde(default)]
    pub boku_portal_url: Option<String>,
}

/// Typed client for the billing services.
#[derive(Clone)]
pub struct SolitudeClient {
    config: BillingConfig,
    executor: Arc<dyn RequestExecutor>,
}

impl std::fmt::Debug for SolitudeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolitudeClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SolitudeClient {
    pub fn new(config: BillingConfig, executor: Arc<dyn RequestExecutor>) -> Self {
        Self { config, executor }
    }

    /// Merchant portal URL for Boku, when configured.
    pub fn boku_portal_url(&self) -> Option<&str> {
        self.config.boku_portal_url.as_deref()
    }

    /// Absolute URL of a solitude resource path such as `/generic/seller/`.
    pub fn solitude_url(&self, path: &str) -> String {
        join_url(&self.config.solitude_base_url, path)
    }

    /// Absolute URL of a provider-API (zippy) resource path.
    pub fn provider_url(&self, path: &str) -> String {
        join_url(&self.config.zippy_base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> CustomResult<T, ClientError> {
        let request = RequestBuilder::new()
            .method(Method::Get)
            .url(url)
            .attach_default_headers()
            .header(http::header::ACCEPT.as_str(), "application/json")
            .build();
        self.send(request).await
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> CustomResult<T, ClientError> {
        self.send_with_body(Method::Post, url, body).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> CustomResult<T, ClientError> {
        self.send_with_body(Method::Put, url, body).await
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> CustomResult<T, ClientError> {
        self.send_with_body(Method::Patch, url, body).await
    }

    async fn send_with_body<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> CustomResult<T, ClientError> {
        let content = RequestContent::json(body).change_context(ClientError::RequestBuildFailed)?;
        let request = RequestBuilder::new()
            .method(method)
            .url(url)
            .attach_default_headers()
            .header(http::header::ACCEPT.as_str(), "application/json")
            .set_body(content)
            .build();
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: Request) -> CustomResult<T, ClientError> {
        let method = request.method;
        let url = request.url.clone();
        logger::debug!(%method, %url, "billing request");

        let response = self.executor.execute(request).await?;
        match response.status_code {
            200..=299 => response
                .response
                .parse_struct("billing response")
                .change_context(ClientError::ResponseDeserializationFailed),
            404 => Err(report!(ClientError::NotFound))
                .attach_printable_lazy(|| format!("{method} {url} returned 404")),
            status_code => {
                logger::info!(%method, %url, status_code, "billing call failed");
                Err(report!(ClientError::UnexpectedStatus { status_code }))
            }
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joining_normalizes_slashes() {
        assert_eq!(
            join_url("https://solitude.test/", "/generic/seller/"),
            "https://solitude.test/generic/seller/"
        );
        assert_eq!(
            join_url("https://solitude.test", "bango/package/"),
            "https://solitude.test/bango/package/"
        );
    }
}
