//! Provider-agnostic description of an outgoing remote-service request.
//!
//! Providers and the search layer only *describe* requests with these types;
//! a single executor performs the actual I/O. This keeps every remote call
//! testable against canned responses.

use error_stack::{IntoReport, ResultExt};
use masking::{Maskable, Secret};
use serde::{Deserialize, Serialize};

use crate::errors::{CustomResult, ParsingError};

/// Header collection; values that carry credentials are wrapped in
/// [`Maskable::Masked`] so request logging can't leak them.
pub type Headers = std::collections::HashSet<(String, Maskable<String>)>;

#[derive(
    Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

/// An already-encoded request body together with its content type.
#[derive(Clone)]
pub enum RequestContent {
    /// `application/json`
    Json(Secret<String>),
}

impl std::fmt::Debug for RequestContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Json(_) => "JsonRequestBody",
        })
    }
}

impl RequestContent {
    /// Encode a serializable value as a JSON body.
    pub fn json<T: Serialize>(body: &T) -> CustomResult<Self, ParsingError> {
        serde_json::to_string(body)
            .into_report()
            .change_context(ParsingError)
            .attach_printable("Failed to encode request body as JSON")
            .map(|encoded| Self::Json(Secret::new(encoded)))
    }

    /// The MIME type matching the encoding.
    pub fn content_type(&self) -> mime::Mime {
        match self {
            Self::Json(_) => mime::APPLICATION_JSON,
        }
    }

    /// The encoded body.
    pub fn inner(&self) -> &Secret<String> {
        match self {
            Self::Json(body) => body,
        }
    }
}

/// A fully described outgoing request.
#[derive(Clone, Debug)]
pub struct Request {
    /// Target URL including any query string.
    pub url: String,
    /// Request headers.
    pub headers: Headers,
    /// HTTP method.
    pub method: Method,
    /// Optional encoded body.
    pub body: Option<RequestContent>,
}

fn default_request_headers() -> [(String, Maskable<String>); 1] {
    use http::header;

    [(
        header::VIA.to_string(),
        crate::consts::VIA_HEADER_VALUE.into(),
    )]
}

impl Request {
    /// Create a request with the given method and URL and no headers or body.
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: String::from(url),
            headers: std::collections::HashSet::new(),
            body: None,
        }
    }
}

/// Builder for [`Request`].
#[derive(Debug)]
pub struct RequestBuilder {
    url: String,
    headers: Headers,
    method: Method,
    body: Option<RequestContent>,
}

impl RequestBuilder {
    /// Start building a GET request with an empty URL.
    pub fn new() -> Self {
        Self {
            method: Method::Get,
            url: String::new(),
            headers: std::collections::HashSet::new(),
            body: None,
        }
    }

    /// Set the target URL.
    pub fn url(mut self, url: &str) -> Self {
        self.url = url.into();
        self
    }

    /// Set the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Extend the headers with the default outgoing headers.
    pub fn attach_default_headers(mut self) -> Self {
        self.headers.extend(default_request_headers());
        self
    }

    /// Insert a single plain header.
    pub fn header(mut self, header: &str, value: &str) -> Self {
        self.headers.insert((header.into(), value.into()));
        self
    }

    /// Extend with prepared (possibly masked) headers.
    pub fn headers(mut self, headers: Vec<(String, Maskable<String>)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Attach an encoded body.
    pub fn set_body(mut self, body: RequestContent) -> Self {
        self.body.replace(body);
        self
    }

    /// Finalize into a [`Request`].
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
