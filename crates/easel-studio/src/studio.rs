use easel_auth::{AuthError, CredentialProvider};
use easel_config::{Config, ConfigOverride, SettingsStore, StoredConfig};
use easel_core::{Credentials, RequestContext};
use easel_imagegen::{GenerationParameters, ImageGenerator};
use easel_media::{Asset, MediaStore};
use jiff::Timestamp;

use crate::error::{Result, StudioError};
use crate::record::{GeneratedRecord, SavedRecord, saved_filename};

/// Owns the live configuration and every adapter the user drives
pub struct Studio {
    config: Config,
    settings: SettingsStore,
    credentials: CredentialProvider,
    generator: ImageGenerator,
    media: MediaStore,
}

impl Studio {
    pub fn new(
        config: Config,
        credentials: CredentialProvider,
        generator: ImageGenerator,
        media: MediaStore,
    ) -> Self {
        let settings = SettingsStore::new(&config.settings.dir);
        Self {
            config,
            settings,
            credentials,
            generator,
            media,
        }
    }

    /// Studio using Cognito, HTTP transports and the local media library
    pub fn from_config(config: Config) -> Self {
        let media = MediaStore::from_config(&config.media);
        Self::new(config, CredentialProvider::cognito(), ImageGenerator::new(), media)
    }

    /// Apply the last saved configuration and resolve credentials
    ///
    /// Credential failures leave the studio in anonymous mode.
    pub async fn start(&mut self) {
        if let Some(stored) = self.settings.load_config() {
            tracing::info!(saved_at = %stored.timestamp, "applying saved configuration");
            self.config.merge(stored.into());
        }

        if self.config.has_identity_pool() {
            self.credentials.resolve(&self.config).await;
        } else {
            tracing::info!("no identity pool configured, running without credentials");
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.current()
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// Snapshot handed to the generator
    pub fn context(&self) -> RequestContext {
        RequestContext::new(&self.config, self.credentials.current().cloned())
    }

    /// Generate an image from the form parameters
    ///
    /// Expired credentials are resolved again first; a failed resolution
    /// falls through to the unsigned transport unless sign-in is mandatory.
    pub async fn generate(&mut self, parameters: &GenerationParameters) -> Result<GeneratedRecord> {
        parameters.validate()?;

        if self.credentials.current().is_some_and(Credentials::is_expired) {
            tracing::info!("credentials expired, resolving again");
            self.credentials.resolve(&self.config).await;
        }

        let sign_in_required = self.config.auth.as_ref().is_some_and(|auth| auth.mandatory_sign_in);
        if sign_in_required && self.credentials.current().is_none() {
            return Err(AuthError::MissingCredentials("sign-in is required before generating images").into());
        }

        let options = parameters.to_options();
        let image = self
            .generator
            .generate(&parameters.prompt, &options, &self.context())
            .await
            .inspect_err(|e| tracing::error!(error = %e, "image generation failed"))?;

        Ok(GeneratedRecord::new(&parameters.prompt, options, image))
    }

    /// Save a generated image into the album
    pub fn save_image(&self, record: &GeneratedRecord) -> Result<SavedRecord> {
        let asset = self.media.persist(&record.image_data, &saved_filename(record))?;

        Ok(SavedRecord {
            record: record.clone(),
            saved: true,
            saved_at: Timestamp::now(),
            asset_id: asset.id,
        })
    }

    pub fn share_image(&self, record: &GeneratedRecord) -> Result<()> {
        self.media.share(&record.image_data, &saved_filename(record))?;
        Ok(())
    }

    /// Saved images, newest first
    pub fn gallery(&self) -> Result<Vec<Asset>> {
        Ok(self.media.gallery()?)
    }

    /// Merge, persist and apply a configuration change
    ///
    /// The live configuration is untouched when the merged result is
    /// incomplete. Credentials are resolved again afterwards.
    pub async fn update_config(&mut self, overrides: ConfigOverride) -> Result<StoredConfig> {
        let mut candidate = self.config.clone();
        candidate.merge(overrides);

        let stored = self.settings.save_config(&candidate)?;
        self.config = candidate;

        tracing::info!(region = %self.config.region, "configuration updated");

        self.credentials.resolve(&self.config).await;
        Ok(stored)
    }

    /// Refresh credentials, surfacing failures
    pub async fn refresh_credentials(&mut self) -> Result<&Credentials> {
        self.credentials
            .refresh(&self.config)
            .await
            .map_err(StudioError::from)
    }

    /// Forget saved settings and cached credentials
    pub fn clear_settings(&mut self) -> Result<()> {
        self.settings.clear()?;
        self.credentials.clear();
        Ok(())
    }
}
