//! HTTP transport seam
//!
//! The adapter only needs to POST a JSON body and get back a status, headers
//! and a chunked body. Tests substitute their own [`Transport`]; production
//! code uses [`ReqwestTransport`].

use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::{Stream, StreamExt, TryStreamExt};
use http::{HeaderMap, StatusCode};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::AdapterError;

/// Chunked response body
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, AdapterError>> + Send>>;

/// Response head plus a not-yet-read body
pub struct HttpResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Body reader, `None` if the response carries no readable body
    pub body: Option<ByteStream>,
}

impl HttpResponse {
    /// Read the whole body into memory
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::MissingBody` if there is no body and propagates
    /// read failures.
    pub async fn bytes(self) -> Result<Vec<u8>, AdapterError> {
        let body = self.body.ok_or(AdapterError::MissingBody)?;

        body.try_fold(Vec::new(), |mut buf, chunk| async move {
            buf.extend_from_slice(&chunk);
            Ok(buf)
        })
        .await
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// Sends a JSON POST and returns the response without reading its body
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `url` as `application/json`
    ///
    /// A bearer `Authorization` header is attached only when `api_key` is set.
    /// The status is not checked here.
    async fn post_json(
        &self,
        url: &Url,
        api_key: Option<&SecretString>,
        body: Vec<u8>,
    ) -> Result<HttpResponse, AdapterError>;
}

/// [`Transport`] backed by a shared `reqwest` client
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wrap an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(
        &self,
        url: &Url,
        api_key: Option<&SecretString>,
        body: Vec<u8>,
    ) -> Result<HttpResponse, AdapterError> {
        let mut builder = self
            .client
            .post(url.as_str())
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body);

        if let Some(key) = api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(url = %url, error = %e, "upstream request failed");
            AdapterError::from(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes_stream().map_err(AdapterError::from).boxed();

        Ok(HttpResponse {
            status,
            headers,
            body: Some(body),
        })
    }
}
