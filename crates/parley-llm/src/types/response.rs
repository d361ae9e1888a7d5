use serde::{Deserialize, Serialize};

use super::content::{Content, Role};

/// Reason the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// Natural end of generation
    Stop,
    /// Any other reason reported by the server
    Other,
}

/// Token usage statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens consumed by the prompt
    pub prompt_token_count: u32,
    /// Tokens generated across candidates
    pub candidates_token_count: u32,
    /// Total tokens
    pub total_token_count: u32,
}

/// A generated candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate index
    pub index: u32,
    /// Generated turn (role is always model)
    pub content: Content,
    /// Why generation stopped; unset on intermediate stream fragments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
}

/// Content generation response, or one fragment of a streamed response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Token usage, absent when the server reported none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Response with one model candidate holding a single text part
    pub fn from_text(text: impl Into<String>, finish_reason: Option<FinishReason>) -> Self {
        Self {
            candidates: vec![Candidate {
                index: 0,
                content: Content::new(Role::Model, text),
                finish_reason,
            }],
            usage_metadata: None,
        }
    }

    /// Concatenated text of the first candidate, empty if there is none
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .map(|candidate| candidate.content.texts().collect())
            .unwrap_or_default()
    }

    /// Finish reason of the first candidate
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.candidates.first().and_then(|candidate| candidate.finish_reason)
    }
}

/// Token count estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountTokensResponse {
    /// Estimated token count
    pub total_tokens: u32,
}

/// A single embedding vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEmbedding {
    /// Vector components
    pub values: Vec<f32>,
}

/// Embedding response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedContentResponse {
    /// One embedding per input
    pub embeddings: Vec<ContentEmbedding>,
}
