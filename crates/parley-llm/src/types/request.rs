use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::content::{Content, Contents, Part};
use crate::error::AdapterError;

/// System instruction: plain text, a full turn, or a single part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SystemInstruction {
    /// Instruction text
    Text(String),
    /// Instruction given as a turn
    Content(Content),
    /// Instruction given as a single part
    Part(Part),
}

impl SystemInstruction {
    /// Text sent as the system message
    ///
    /// A part without text yields an empty string.
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Content(content) => content.joined_text("\n"),
            Self::Part(part) => part.text.clone().unwrap_or_default(),
        }
    }
}

impl From<&str> for SystemInstruction {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for SystemInstruction {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Generation parameters
///
/// Values are passed through untouched; absent fields stay absent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentConfig {
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Maximum output tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// Nucleus sampling threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Stop sequences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    /// System instruction prepended to the conversation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<SystemInstruction>,
}

/// Content generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    /// Prompt contents
    pub contents: Contents,
    /// Generation parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<GenerateContentConfig>,
}

impl GenerateContentRequest {
    /// Create a request without generation parameters
    pub fn new(contents: impl Into<Contents>) -> Self {
        Self {
            contents: contents.into(),
            config: None,
        }
    }

    /// Attach generation parameters
    #[must_use]
    pub fn with_config(mut self, config: GenerateContentConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Decode a request from loosely typed JSON
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::InvalidContents` if `contents` is missing or of an
    /// unrecognized shape, and `AdapterError::InvalidRequest` if the value is
    /// not an object or `config` is malformed.
    pub fn from_value(value: Value) -> Result<Self, AdapterError> {
        let Value::Object(mut fields) = value else {
            return Err(AdapterError::InvalidRequest("request must be a JSON object".to_owned()));
        };

        let contents = fields
            .remove("contents")
            .ok_or_else(|| AdapterError::InvalidContents("missing `contents`".to_owned()))?;
        let contents = Contents::from_value(contents)?;

        let config = match fields.remove("config") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(
                serde_json::from_value(raw)
                    .map_err(|e| AdapterError::InvalidRequest(format!("invalid config: {e}")))?,
            ),
        };

        Ok(Self { contents, config })
    }
}
