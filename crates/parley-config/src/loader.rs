use std::path::Path;

use anyhow::Context;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if [`Config::from_toml`]
    /// rejects its contents
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw =
            std::fs::read_to_string(path).with_context(|| format!("failed to read config file {}", path.display()))?;

        let config = Self::from_toml(&raw).with_context(|| format!("invalid config file {}", path.display()))?;

        tracing::debug!(path = %path.display(), model = %config.adapter.model, "loaded configuration");

        Ok(config)
    }

    /// Parse configuration text
    ///
    /// Expands `{{ env.VAR }}` placeholders, then deserializes and validates
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns an error if variable expansion, TOML parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded = crate::env::expand_env(raw).context("config variable expansion failed")?;

        let config: Self = toml::from_str(&expanded).context("failed to parse config")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns an error if the model is blank or the endpoint is not an
    /// HTTP(S) URL that can carry a path
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_adapter()?;
        Ok(())
    }

    fn validate_adapter(&self) -> anyhow::Result<()> {
        let adapter = &self.adapter;

        if adapter.model.trim().is_empty() {
            anyhow::bail!("adapter.model must not be empty");
        }

        let scheme = adapter.endpoint.scheme();
        if scheme != "http" && scheme != "https" {
            anyhow::bail!("adapter.endpoint must use http or https, got `{scheme}`");
        }

        if adapter.endpoint.cannot_be_a_base() {
            anyhow::bail!("adapter.endpoint `{}` cannot be used as a base URL", adapter.endpoint);
        }

        Ok(())
    }
}
