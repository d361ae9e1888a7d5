//! Conversion between caller content types and `OpenAI` wire format

use crate::protocol::openai::{
    OpenAiMessage, OpenAiRequest, OpenAiResponse, OpenAiRole, OpenAiStreamChunk, OpenAiUsage,
};
use crate::types::{
    Content, FinishReason, GenerateContentRequest, GenerateContentResponse, Role, UsageMetadata,
};

/// Finish reason string the server uses for a natural stop
const FINISH_STOP: &str = "stop";

// -- Outbound: caller request -> wire request --

/// Build the chat-completion body for a content generation request
///
/// The system instruction, if any, becomes the first message. Generation
/// parameters are copied verbatim; absent ones stay absent.
pub fn to_openai_request(request: &GenerateContentRequest, model: &str, stream: bool) -> OpenAiRequest {
    let config = request.config.as_ref();

    let mut messages = Vec::new();

    if let Some(instruction) = config.and_then(|c| c.system_instruction.as_ref()) {
        messages.push(OpenAiMessage {
            role: OpenAiRole::System,
            content: instruction.text(),
        });
    }

    messages.extend(request.contents.turns().iter().map(|turn| OpenAiMessage::from(&**turn)));

    OpenAiRequest {
        model: model.to_owned(),
        messages,
        temperature: config.and_then(|c| c.temperature),
        max_tokens: config.and_then(|c| c.max_output_tokens),
        top_p: config.and_then(|c| c.top_p),
        stop: config.and_then(|c| c.stop_sequences.clone()),
        stream,
    }
}

impl From<Role> for OpenAiRole {
    fn from(role: Role) -> Self {
        match role {
            Role::User => Self::User,
            Role::Model => Self::Assistant,
            Role::System => Self::System,
        }
    }
}

impl From<&Content> for OpenAiMessage {
    fn from(content: &Content) -> Self {
        Self {
            role: content.role.into(),
            content: content.joined_text("\n"),
        }
    }
}

// -- Inbound: wire response -> caller response --

impl From<OpenAiResponse> for GenerateContentResponse {
    fn from(resp: OpenAiResponse) -> Self {
        let usage_metadata = resp.usage.map(UsageMetadata::from);

        let Some(choice) = resp.choices.into_iter().next() else {
            return Self {
                candidates: Vec::new(),
                usage_metadata,
            };
        };

        let text = choice.message.and_then(|m| m.content).unwrap_or_default();
        let finish_reason = if choice.finish_reason.as_deref() == Some(FINISH_STOP) {
            FinishReason::Stop
        } else {
            FinishReason::Other
        };

        Self {
            usage_metadata,
            ..Self::from_text(text, Some(finish_reason))
        }
    }
}

impl From<OpenAiUsage> for UsageMetadata {
    fn from(usage: OpenAiUsage) -> Self {
        Self {
            prompt_token_count: usage.prompt_tokens,
            candidates_token_count: usage.completion_tokens,
            total_token_count: usage.total_tokens,
        }
    }
}

// -- Stream conversion --

/// Convert a parsed streaming chunk into a response fragment
///
/// Only chunks carrying non-empty delta text produce a fragment. The finish
/// reason is set to `Stop` on a `"stop"` chunk and left unset otherwise, so
/// intermediate fragments never look terminal.
pub fn openai_chunk_to_response(chunk: OpenAiStreamChunk) -> Option<GenerateContentResponse> {
    let choice = chunk.choices.into_iter().next()?;
    let text = choice.delta.content.filter(|content| !content.is_empty())?;

    let finish_reason = (choice.finish_reason.as_deref() == Some(FINISH_STOP)).then_some(FinishReason::Stop);

    Some(GenerateContentResponse::from_text(text, finish_reason))
}
