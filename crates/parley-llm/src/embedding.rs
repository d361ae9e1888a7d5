//! Placeholder embeddings
//!
//! Chat-completions servers have no embedding call, so this returns a fixed
//! zero vector. It exists to satisfy the content-generation interface and
//! carries no semantic information.

use crate::types::{ContentEmbedding, Contents, EmbedContentResponse};

/// Dimensionality of the placeholder vector
pub const EMBEDDING_DIMENSIONS: usize = 768;

/// Return one all-zero embedding regardless of input
pub fn placeholder_embedding(_contents: &Contents) -> EmbedContentResponse {
    tracing::debug!(dimensions = EMBEDDING_DIMENSIONS, "returning placeholder embedding");

    EmbedContentResponse {
        embeddings: vec![ContentEmbedding {
            values: vec![0.0; EMBEDDING_DIMENSIONS],
        }],
    }
}
