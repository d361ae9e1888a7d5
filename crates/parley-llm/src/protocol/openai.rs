//! `OpenAI` chat completion API wire format types
//!
//! Response-side types are deliberately lenient: every field may be absent,
//! so servers that omit `id`, `created` or `usage` still parse. An absent
//! `usage` stays `None` and is never confused with zeroed counts.

use serde::{Deserialize, Serialize};

// -- Request types --

/// Message role on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAiRole {
    /// System instruction
    System,
    /// User message
    User,
    /// Assistant response
    Assistant,
}

/// `OpenAI` chat completion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAiRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<OpenAiMessage>,
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Nucleus sampling threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Stop sequences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    /// Whether to stream the response
    pub stream: bool,
}

/// `OpenAI` message within a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAiMessage {
    /// Message role
    pub role: OpenAiRole,
    /// Flattened text content
    pub content: String,
}

// -- Response types --

/// `OpenAI` chat completion response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAiResponse {
    /// Generated choices; only the first is used
    #[serde(default)]
    pub choices: Vec<OpenAiChoice>,
    /// Token usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<OpenAiUsage>,
}

/// Choice within an `OpenAI` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAiChoice {
    /// Generated message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<OpenAiChoiceMessage>,
    /// Why generation stopped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Message within an `OpenAI` response choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAiChoiceMessage {
    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Token usage in an `OpenAI` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAiUsage {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_tokens: u32,
    /// Completion tokens
    #[serde(default)]
    pub completion_tokens: u32,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: u32,
}

// -- Streaming types --

/// `OpenAI` streaming chunk, the JSON body of one `data:` line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAiStreamChunk {
    /// Delta choices; only the first is used
    #[serde(default)]
    pub choices: Vec<OpenAiStreamChoice>,
}

/// Choice within a streaming chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAiStreamChoice {
    /// Incremental delta
    #[serde(default)]
    pub delta: OpenAiStreamDelta,
    /// Finish reason (present on the final chunk)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Delta content within a streaming choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAiStreamDelta {
    /// Incremental text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}
