use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use url::Url;

/// Connection settings for the chat completions server
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterConfig {
    /// API base, e.g. `http://localhost:8000/v1`
    pub endpoint: Url,
    /// Model identifier sent with every request
    pub model: String,
    /// Bearer token for the server
    #[serde(default)]
    pub api_key: Option<SecretString>,
}

impl AdapterConfig {
    /// Configured API key, treating an empty value as unset
    ///
    /// An empty key is what `{{ env.VAR | default("") }}` produces when the
    /// variable is missing.
    pub fn api_key(&self) -> Option<&SecretString> {
        self.api_key.as_ref().filter(|key| !key.expose_secret().is_empty())
    }
}
