//! Server-sent events consumer for streamed chat completions
//!
//! Turns the raw response body into a lazy sequence of
//! [`GenerateContentResponse`] fragments, one per non-empty content delta.
//! Nothing is read from the body until the caller polls for the next item.

pub mod decoder;

use std::collections::VecDeque;

use bytes::Bytes;
use futures_util::{Stream, StreamExt, stream};

pub use self::decoder::{LineDecoder, Utf8Decoder};
use crate::convert::openai::openai_chunk_to_response;
use crate::error::AdapterError;
use crate::protocol::openai::OpenAiStreamChunk;
use crate::types::GenerateContentResponse;

/// Prefix of lines that carry an event payload
pub const DATA_PREFIX: &str = "data: ";

/// Payload marking the end of the stream
pub const DONE_SENTINEL: &str = "[DONE]";

/// Interpretation of one complete line of the event stream
#[derive(Debug)]
pub enum Frame {
    /// Blank, comment, or non-`data:` line
    Ignored,
    /// The `[DONE]` sentinel
    Done,
    /// A `data:` payload that is not valid chunk JSON
    Malformed,
    /// A parsed chunk
    Chunk(OpenAiStreamChunk),
}

impl Frame {
    /// Classify a complete line
    pub fn parse(line: &str) -> Self {
        let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
            return Self::Ignored;
        };

        if payload == DONE_SENTINEL {
            return Self::Done;
        }

        match serde_json::from_str::<OpenAiStreamChunk>(payload) {
            Ok(chunk) => Self::Chunk(chunk),
            Err(e) => {
                tracing::debug!(error = %e, data = %payload, "skipping unparseable SSE chunk");
                Self::Malformed
            }
        }
    }

    /// Response fragment carried by this frame, if any
    pub fn into_response(self) -> Option<GenerateContentResponse> {
        match self {
            Self::Chunk(chunk) => openai_chunk_to_response(chunk),
            Self::Ignored | Self::Done | Self::Malformed => None,
        }
    }
}

/// Pull-driven state of one streaming call
///
/// Either there are complete lines queued, or the body is awaiting its next
/// chunk, or the body is gone and the stream is finished. The body is
/// dropped as soon as it ends or fails.
struct Consumer<S> {
    body: Option<S>,
    lines: LineDecoder,
    pending: VecDeque<String>,
}

impl<S> Consumer<S>
where
    S: Stream<Item = Result<Bytes, AdapterError>> + Unpin,
{
    fn new(body: S) -> Self {
        Self {
            body: Some(body),
            lines: LineDecoder::default(),
            pending: VecDeque::new(),
        }
    }

    async fn next_fragment(&mut self) -> Option<Result<GenerateContentResponse, AdapterError>> {
        loop {
            while let Some(line) = self.pending.pop_front() {
                if let Some(fragment) = Frame::parse(&line).into_response() {
                    return Some(Ok(fragment));
                }
            }

            let body = self.body.as_mut()?;

            match body.next().await {
                Some(Ok(chunk)) => self.pending.extend(self.lines.push(&chunk)),
                Some(Err(e)) => {
                    tracing::error!(error = %e, "stream body read failed");
                    self.body = None;
                    return Some(Err(e));
                }
                None => {
                    if !self.lines.is_empty() {
                        tracing::debug!(
                            remainder = %self.lines.remainder(),
                            "discarding unterminated line at end of stream"
                        );
                    }
                    self.body = None;
                    return None;
                }
            }
        }
    }
}

/// Consume an event-stream body as response fragments
///
/// Fragments come out in the order their frames arrived. Non-`data:` lines
/// and the `[DONE]` sentinel yield nothing; a malformed frame is dropped and
/// the stream continues. A body read error is yielded once and ends the
/// stream. Dropping the returned stream releases the body.
pub fn fragments<S>(body: S) -> impl Stream<Item = Result<GenerateContentResponse, AdapterError>> + Send
where
    S: Stream<Item = Result<Bytes, AdapterError>> + Unpin + Send,
{
    stream::unfold(Consumer::new(body), |mut consumer| async move {
        consumer.next_fragment().await.map(|item| (item, consumer))
    })
}
