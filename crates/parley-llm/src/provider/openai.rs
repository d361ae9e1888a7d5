//! Content generation over an OpenAI-compatible chat completions endpoint

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;
use url::Url;

use super::{ContentGenerator, GenerateContentStream};
use crate::convert::openai::to_openai_request;
use crate::embedding::placeholder_embedding;
use crate::error::AdapterError;
use crate::protocol::openai::OpenAiResponse;
use crate::stream::fragments;
use crate::tokens::estimate_tokens;
use crate::transport::{HttpResponse, ReqwestTransport, Transport};
use crate::types::{Contents, CountTokensResponse, EmbedContentResponse, GenerateContentRequest, GenerateContentResponse};

/// Adapter presenting a chat completions server as a content generator
///
/// Holds only immutable configuration, so one instance can serve concurrent
/// calls; each call allocates its own buffers.
#[derive(Clone)]
pub struct ChatCompletionsAdapter {
    completions_url: Url,
    model: String,
    api_key: Option<SecretString>,
    transport: Arc<dyn Transport>,
}

impl ChatCompletionsAdapter {
    /// Create an adapter using the default `reqwest` transport
    ///
    /// `endpoint` is the API base (for example `https://host/v1`); requests go
    /// to `<endpoint>/chat/completions`.
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Config` if the completions URL cannot be built.
    pub fn new(endpoint: &Url, model: impl Into<String>, api_key: Option<SecretString>) -> Result<Self, AdapterError> {
        let base = endpoint.as_str().trim_end_matches('/');
        let completions_url = Url::parse(&format!("{base}/chat/completions"))
            .map_err(|e| AdapterError::Config(format!("invalid endpoint {endpoint}: {e}")))?;

        Ok(Self {
            completions_url,
            model: model.into(),
            api_key,
            transport: Arc::new(ReqwestTransport::default()),
        })
    }

    /// Replace the HTTP transport
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Model identifier sent with every request
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full URL of the chat completions endpoint
    pub fn completions_url(&self) -> &Url {
        &self.completions_url
    }

    /// Translate and send a request, failing on a non-success status
    async fn send(&self, request: &GenerateContentRequest, stream: bool) -> Result<HttpResponse, AdapterError> {
        let wire_request = to_openai_request(request, &self.model, stream);
        let body = serde_json::to_vec(&wire_request)
            .map_err(|e| AdapterError::InvalidRequest(format!("failed to encode request: {e}")))?;

        tracing::debug!(
            model = %self.model,
            stream,
            messages = wire_request.messages.len(),
            "sending chat completion request"
        );

        let response = self
            .transport
            .post_json(&self.completions_url, self.api_key.as_ref(), body)
            .await?;

        if !response.status.is_success() {
            tracing::warn!(
                model = %self.model,
                status = %response.status,
                "upstream returned error"
            );
            return Err(AdapterError::upstream(response.status));
        }

        Ok(response)
    }
}

impl fmt::Debug for ChatCompletionsAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionsAdapter")
            .field("completions_url", &self.completions_url)
            .field("model", &self.model)
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ContentGenerator for ChatCompletionsAdapter {
    async fn generate_content(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse, AdapterError> {
        let response = self.send(request, false).await?;
        let body = response.bytes().await?;

        let wire_response: OpenAiResponse = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(model = %self.model, error = %e, "failed to parse chat completion");
            AdapterError::Decode(e.to_string())
        })?;

        Ok(wire_response.into())
    }

    async fn generate_content_stream(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentStream, AdapterError> {
        let response = self.send(request, true).await?;

        let Some(body) = response.body else {
            tracing::error!(model = %self.model, "streaming response has no body");
            return Err(AdapterError::MissingBody);
        };

        Ok(Box::pin(fragments(body)))
    }

    async fn count_tokens(&self, contents: &Contents) -> Result<CountTokensResponse, AdapterError> {
        Ok(CountTokensResponse {
            total_tokens: estimate_tokens(contents),
        })
    }

    async fn embed_content(&self, contents: &Contents) -> Result<EmbedContentResponse, AdapterError> {
        Ok(placeholder_embedding(contents))
    }
}
