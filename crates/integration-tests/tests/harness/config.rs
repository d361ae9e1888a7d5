//! Test configuration built from TOML text pointed at a mock backend

use parley_config::Config;
use parley_llm::ChatCompletionsAdapter;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl ConfigBuilder {
    /// Start from a config pointed at `endpoint` with a test model
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_owned(),
            model: "mock-model".to_owned(),
            api_key: None,
        }
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: &str) -> Self {
        model.clone_into(&mut self.model);
        self
    }

    /// Set the raw `api_key` value (may contain `{{ env.VAR }}` placeholders)
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_owned());
        self
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> String {
        let mut toml = format!("[adapter]\nendpoint = \"{}\"\nmodel = \"{}\"\n", self.endpoint, self.model);

        if let Some(api_key) = &self.api_key {
            toml.push_str(&format!("api_key = \"{api_key}\"\n"));
        }

        toml
    }

    /// Parse and validate the configuration
    pub fn build(&self) -> Config {
        Config::from_toml(&self.to_toml()).expect("test config must be valid")
    }

    /// Build an adapter using the real `reqwest` transport
    pub fn adapter(&self) -> ChatCompletionsAdapter {
        let config = self.build();

        ChatCompletionsAdapter::new(
            &config.adapter.endpoint,
            config.adapter.model.clone(),
            config.adapter.api_key().cloned(),
        )
        .expect("test adapter must build")
    }
}
