//! Content-generation client for OpenAI-style chat completions servers
//!
//! Callers speak a Gemini-style interface (turns made of text parts, a
//! `generate_content` call and a streaming variant). The adapter translates
//! requests into chat completions calls, decodes the SSE stream incrementally
//! and maps responses back into the caller's shapes.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod convert;
pub mod embedding;
pub mod error;
pub mod protocol;
pub mod provider;
pub mod stream;
pub mod tokens;
pub mod transport;
pub mod types;

pub use error::AdapterError;
pub use provider::openai::ChatCompletionsAdapter;
pub use provider::{ContentGenerator, GenerateContentStream};
pub use transport::{ReqwestTransport, Transport};
pub use types::{Contents, GenerateContentConfig, GenerateContentRequest, GenerateContentResponse};
