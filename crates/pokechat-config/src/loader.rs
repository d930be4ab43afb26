use std::path::Path;

use secrecy::SecretString;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Expands `{{ env.VAR }}` placeholders, deserializes, resolves
    /// `agent.llm.api_key_file` relative to the working directory, then
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, expansion or parsing
    /// fails, the key file is unreadable, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let mut config = Self::from_toml(&raw)?;
        config.resolve_api_key_file()?;

        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistency found
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_tools_config()?;
        self.validate_agent_config()?;
        Ok(())
    }

    fn validate_tools_config(&self) -> anyhow::Result<()> {
        let mount_path = &self.tools.mount_path;
        if !mount_path.starts_with('/') || (mount_path.len() > 1 && mount_path.ends_with('/')) {
            anyhow::bail!("tools.mount_path must start with '/' and must not end with '/': `{mount_path}`");
        }

        if !matches!(self.tools.upstream_url.scheme(), "http" | "https") {
            anyhow::bail!("tools.upstream_url must be an http(s) URL");
        }

        Ok(())
    }

    fn validate_agent_config(&self) -> anyhow::Result<()> {
        let llm = &self.agent.llm;
        if llm.api_key.is_some() && llm.api_key_file.is_some() {
            anyhow::bail!("agent.llm cannot have both api_key and api_key_file");
        }

        if llm.model.trim().is_empty() {
            anyhow::bail!("agent.llm.model must not be empty");
        }

        Ok(())
    }

    /// Replace `api_key_file` with the key read from its first line
    fn resolve_api_key_file(&mut self) -> anyhow::Result<()> {
        let Some(path) = self.agent.llm.api_key_file.take() else {
            return Ok(());
        };

        let contents = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("failed to read api key file {}: {e}", path.display()))?;

        let key = contents.lines().next().map(str::trim).unwrap_or_default();
        if key.is_empty() {
            anyhow::bail!("api key file {} is empty", path.display());
        }

        self.agent.llm.api_key = Some(SecretString::from(key.to_string()));
        Ok(())
    }
}
