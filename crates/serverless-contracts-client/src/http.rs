// crates/serverless-contracts-client/src/http.rs
// ============================================================================
// Module: HTTP Transport
// Description: reqwest-backed transport for request descriptors.
// Purpose: Send contract requests to a deployed endpoint over HTTP(S).
// Dependencies: async-trait, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! Descriptor paths are appended to the base URL's path, query parameters
//! are percent-encoded into the query string, and bodies are sent as JSON.
//! Redirects are never followed and response bodies are size-limited.
//! Invariants:
//! - Descriptor headers override default headers of the same name.
//! - Exactly one HTTP request per [`Transport::send`] call.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::redirect::Policy;
use url::Url;

use crate::request::RequestDescriptor;
use crate::transport::Transport;
use crate::transport::TransportError;
use crate::transport::TransportResponse;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Maximum accepted response body size in bytes.
pub const MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Transport
// ============================================================================

/// HTTP transport bound to a base URL.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// HTTP client.
    client: Client,
    /// Base URL the descriptor paths are appended to.
    base_url: Url,
    /// Headers sent with every request.
    default_headers: BTreeMap<String, String>,
}

impl ReqwestTransport {
    /// Creates a transport with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidRequest`] when the HTTP client cannot be built.
    pub fn new(base_url: Url) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Creates a transport with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidRequest`] when the HTTP client cannot be built.
    pub fn with_timeout(base_url: Url, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|err| TransportError::InvalidRequest(err.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a transport from a preconfigured client.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url) -> Self {
        Self {
            client,
            base_url,
            default_headers: BTreeMap::new(),
        }
    }

    /// Sets headers sent with every request.
    #[must_use]
    pub fn with_default_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.default_headers = headers;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves the absolute request URL for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::InvalidRequest`] when the base URL cannot carry a path.
    pub fn resolve(&self, request: &RequestDescriptor) -> Result<Url, TransportError> {
        if self.base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidRequest(format!(
                "base url {} cannot carry a path",
                self.base_url
            )));
        }
        let mut url = self.base_url.clone();
        let prefix = self.base_url.path().trim_end_matches('/');
        url.set_path(&format!("{prefix}{}", request.path));
        url.set_query(None);
        if let Some(query) = request.query_string_parameters.as_ref().filter(|query| !query.is_empty())
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }

    /// Builds the header map for `request`.
    fn headers(&self, request: &RequestDescriptor) -> Result<HeaderMap, TransportError> {
        let mut headers = HeaderMap::new();
        for (name, value) in self.default_headers.iter().chain(request.headers.iter().flatten()) {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| TransportError::InvalidRequest(format!("invalid header name {name}")))?;
            let value = HeaderValue::from_str(value).map_err(|_| {
                TransportError::InvalidRequest(format!("invalid value for header {name}"))
            })?;
            headers.insert(name, value);
        }
        if request.body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<TransportResponse, TransportError> {
        let url = self.resolve(request)?;
        let headers = self.headers(request)?;
        let method = Method::from_bytes(request.method.as_str().as_bytes())
            .map_err(|err| TransportError::InvalidRequest(err.to_string()))?;
        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = &request.body {
            let payload = serde_json::to_vec(body)
                .map_err(|err| TransportError::InvalidRequest(err.to_string()))?;
            builder = builder.body(payload);
        }
        let response =
            builder.send().await.map_err(|err| TransportError::Request(err.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value.to_str().ok().map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = read_body_with_limit(response, MAX_RESPONSE_BYTES).await?;
        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads a response body while enforcing a hard byte limit.
async fn read_body_with_limit(
    mut response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, TransportError> {
    let mut body = Vec::new();
    while let Some(chunk) =
        response.chunk().await.map_err(|err| TransportError::Request(err.to_string()))?
    {
        if body.len().saturating_add(chunk.len()) > limit {
            return Err(TransportError::ResponseTooLarge {
                limit,
            });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}
