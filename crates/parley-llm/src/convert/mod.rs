//! Bidirectional conversion between caller content types and wire formats

pub mod openai;
