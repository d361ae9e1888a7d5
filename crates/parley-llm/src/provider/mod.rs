//! Content generation interface and its chat-completions implementation

pub mod openai;

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;

use crate::error::AdapterError;
use crate::types::{Contents, CountTokensResponse, EmbedContentResponse, GenerateContentRequest, GenerateContentResponse};

/// Lazy sequence of streamed response fragments
pub type GenerateContentStream = Pin<Box<dyn Stream<Item = Result<GenerateContentResponse, AdapterError>> + Send>>;

/// Content generation operations offered to callers
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate a complete response
    async fn generate_content(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse, AdapterError>;

    /// Generate a response as a stream of fragments
    ///
    /// Errors before the first byte of the body (bad status, missing body)
    /// are returned directly; later failures end the stream with an error item.
    async fn generate_content_stream(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentStream, AdapterError>;

    /// Estimate the token count of `contents`
    async fn count_tokens(&self, contents: &Contents) -> Result<CountTokensResponse, AdapterError>;

    /// Embed `contents`
    async fn embed_content(&self, contents: &Contents) -> Result<EmbedContentResponse, AdapterError>;
}
