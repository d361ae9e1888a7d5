//! Caller-facing content generation types
//!
//! These mirror the content-generation interface the caller is written
//! against: role-tagged turns made of parts, and candidate-based responses.

pub mod content;
pub mod request;
pub mod response;

pub use content::{Content, Contents, Part, Role};
pub use request::{GenerateContentConfig, GenerateContentRequest, SystemInstruction};
pub use response::{
    Candidate, ContentEmbedding, CountTokensResponse, EmbedContentResponse, FinishReason, GenerateContentResponse,
    UsageMetadata,
};
