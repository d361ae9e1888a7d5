use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AdapterError;

/// Author of a conversation turn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End user input
    #[default]
    User,
    /// Generated model output
    Model,
    /// System-level instruction
    System,
}

/// Individual part within a turn
///
/// Only `text` is interpreted. Any other fields (inline data, function calls)
/// are carried as-is so the part survives a serde round trip, but they are
/// dropped when the turn is sent to a chat-completions server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Fields of non-text parts
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            other: Map::new(),
        }
    }

    /// Text content, if this is a text part
    pub fn as_text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

/// One role-tagged turn composed of ordered parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Author of the turn (defaults to user when absent)
    #[serde(default)]
    pub role: Role,
    /// Ordered parts
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a turn with a single text part
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part::text(text)],
        }
    }

    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create a model turn
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }

    /// Text parts in order, skipping parts without text
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().filter_map(Part::as_text)
    }

    /// Join all text parts with the given separator
    pub fn joined_text(&self, separator: &str) -> String {
        self.texts().collect::<Vec<_>>().join(separator)
    }
}

/// Request contents: a plain string, a single turn, or a sequence of turns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    /// Plain prompt text, treated as one user turn
    Text(String),
    /// A single turn
    Turn(Content),
    /// Ordered conversation
    Turns(Vec<Content>),
}

impl Contents {
    /// Decode contents from loosely typed JSON
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::InvalidContents` when the value is neither a
    /// string, a turn object, nor an array of turns.
    pub fn from_value(value: Value) -> Result<Self, AdapterError> {
        serde_json::from_value(value).map_err(|e| {
            tracing::error!(error = %e, "unrecognized contents shape");
            AdapterError::InvalidContents(e.to_string())
        })
    }

    /// Normalize into an ordered sequence of turns
    pub fn turns(&self) -> Vec<Cow<'_, Content>> {
        match self {
            Self::Text(text) => vec![Cow::Owned(Content::user(text.as_str()))],
            Self::Turn(content) => vec![Cow::Borrowed(content)],
            Self::Turns(contents) => contents.iter().map(Cow::Borrowed).collect(),
        }
    }
}

impl From<&str> for Contents {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Contents {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Content> for Contents {
    fn from(content: Content) -> Self {
        Self::Turn(content)
    }
}

impl From<Vec<Content>> for Contents {
    fn from(contents: Vec<Content>) -> Self {
        Self::Turns(contents)
    }
}
