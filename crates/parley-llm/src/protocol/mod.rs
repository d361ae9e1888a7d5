//! Wire format types for the chat-completions protocol
//!
//! Pure serde structs matching the server's JSON API. These types are only
//! used for serialization/deserialization at the boundary.

pub mod openai;
