use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, TOML parsing fails,
    /// or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        let config: Self = toml::from_str(&raw).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// An incomplete configuration (no identity pool, no endpoints) is still
    /// valid here; see [`Config::check_complete`].
    ///
    /// # Errors
    ///
    /// Returns an error if an endpoint URL or path is malformed
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_endpoints()?;
        self.validate_auth()?;
        Ok(())
    }

    /// Check that every piece needed for signed image generation is present
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing piece
    pub fn check_complete(&self) -> anyhow::Result<()> {
        if !self.has_identity_pool() {
            anyhow::bail!("auth.identity_pool_id is required");
        }

        if self.region.trim().is_empty() {
            anyhow::bail!("region is required");
        }

        if self.api.endpoints.is_empty() {
            anyhow::bail!("at least one api endpoint must be configured");
        }

        self.validate()
    }

    fn validate_endpoints(&self) -> anyhow::Result<()> {
        for (name, endpoint) in &self.api.endpoints {
            let url = url::Url::parse(&endpoint.endpoint)
                .map_err(|e| anyhow::anyhow!("invalid URL for endpoint '{name}': {e}"))?;

            if !matches!(url.scheme(), "http" | "https") {
                anyhow::bail!("endpoint '{name}' must use http or https");
            }

            if let Some(path) = &endpoint.paths.generate_image
                && !path.starts_with('/')
            {
                anyhow::bail!("generate_image path for endpoint '{name}' must start with '/'");
            }
        }

        Ok(())
    }

    fn validate_auth(&self) -> anyhow::Result<()> {
        let Some(ref auth) = self.auth else {
            return Ok(());
        };

        if auth.identity_pool_id.trim().is_empty() {
            anyhow::bail!("auth.identity_pool_id must not be empty when [auth] is present");
        }

        if self.identity_region().is_none() {
            anyhow::bail!("a region is required when an identity pool is configured");
        }

        Ok(())
    }
}
