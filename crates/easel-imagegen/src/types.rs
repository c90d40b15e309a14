use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{find_style, parse_size, resolve_style};
use crate::error::{ImageGenError, Result};

/// Style used when none is given
pub const DEFAULT_STYLE: &str = "photographic";

/// Guidance scale used when none is given
pub const DEFAULT_CFG_SCALE: f64 = 6.5;

/// Diffusion steps used when none is given
pub const DEFAULT_STEPS: u32 = 30;

/// Output dimension used when no size is given
pub const DEFAULT_DIMENSION: u32 = 1024;

/// Size used when none is given
pub const DEFAULT_SIZE: &str = "1024x1024";

/// Accepted guidance scale values
pub const CFG_SCALE_RANGE: RangeInclusive<f64> = 1.0..=20.0;

/// Accepted step counts
pub const STEPS_RANGE: RangeInclusive<u32> = 10..=50;

/// Upper bound (exclusive) of randomly drawn seeds
pub const RANDOM_SEED_BOUND: u64 = 1_000_000;

/// Partial generation options; absent values fall back to defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Style preset identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Guidance scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfg_scale: Option<f64>,
    /// Diffusion steps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<u32>,
    /// `WIDTHxHEIGHT`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Seed, 0 lets the provider choose
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Complete parameter set edited by the user between generations
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParameters {
    pub prompt: String,
    pub style: String,
    pub cfg_scale: f64,
    pub steps: u32,
    pub size: String,
    pub seed: u64,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            style: DEFAULT_STYLE.to_string(),
            cfg_scale: DEFAULT_CFG_SCALE,
            steps: DEFAULT_STEPS,
            size: DEFAULT_SIZE.to_string(),
            seed: random_seed(),
        }
    }
}

impl GenerationParameters {
    /// Defaults with the given prompt
    pub fn with_prompt(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    /// Draw a new seed in `[0, RANDOM_SEED_BOUND)`
    pub fn randomize_seed(&mut self) -> u64 {
        self.seed = random_seed();
        self.seed
    }

    /// Check the parameters before submitting them
    ///
    /// # Errors
    ///
    /// Returns [`ImageGenError::InvalidRequest`] for an empty prompt, an unknown
    /// style, an out-of-range guidance scale or step count, or a malformed size
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() {
            return Err(ImageGenError::InvalidRequest("prompt must not be empty".to_string()));
        }
        if find_style(&self.style).is_none() {
            return Err(ImageGenError::InvalidRequest(format!("unknown style: {}", self.style)));
        }
        if !CFG_SCALE_RANGE.contains(&self.cfg_scale) {
            return Err(ImageGenError::InvalidRequest(format!(
                "cfg scale must be between {} and {}",
                CFG_SCALE_RANGE.start(),
                CFG_SCALE_RANGE.end()
            )));
        }
        if !STEPS_RANGE.contains(&self.steps) {
            return Err(ImageGenError::InvalidRequest(format!(
                "steps must be between {} and {}",
                STEPS_RANGE.start(),
                STEPS_RANGE.end()
            )));
        }
        if parse_size(&self.size).is_none() {
            return Err(ImageGenError::InvalidRequest(format!("invalid size: {}", self.size)));
        }
        Ok(())
    }

    /// Options carrying every parameter except the prompt
    pub fn to_options(&self) -> GenerationOptions {
        GenerationOptions {
            style: Some(self.style.clone()),
            cfg_scale: Some(self.cfg_scale),
            steps: Some(self.steps),
            size: Some(self.size.clone()),
            seed: Some(self.seed),
        }
    }
}

fn random_seed() -> u64 {
    rand::rng().random_range(0..RANDOM_SEED_BOUND)
}

/// Body posted to the image generation endpoint
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestPayload {
    pub prompt: String,
    pub style: String,
    /// Same value as `style`; the provider reads either name
    #[serde(rename = "style_preset")]
    pub style_preset: String,
    pub cfg_scale: f64,
    pub steps: u32,
    pub number_of_images: u32,
    pub width: u32,
    pub height: u32,
    pub seed: u64,
}

impl RequestPayload {
    /// Build the payload from a prompt and partial options
    ///
    /// # Errors
    ///
    /// Returns [`ImageGenError::InvalidRequest`] if the prompt is blank or the
    /// size is not `WIDTHxHEIGHT`
    pub fn build(prompt: &str, options: &GenerationOptions) -> Result<Self> {
        if prompt.trim().is_empty() {
            return Err(ImageGenError::InvalidRequest("prompt must not be empty".to_string()));
        }

        let (width, height) = match options.size.as_deref() {
            Some(size) => parse_size(size)
                .ok_or_else(|| ImageGenError::InvalidRequest(format!("invalid size: {size}")))?,
            None => (DEFAULT_DIMENSION, DEFAULT_DIMENSION),
        };

        let style = resolve_style(options.style.as_deref().unwrap_or(DEFAULT_STYLE)).to_string();

        Ok(Self {
            prompt: prompt.to_string(),
            style_preset: style.clone(),
            style,
            cfg_scale: options.cfg_scale.unwrap_or(DEFAULT_CFG_SCALE),
            steps: options.steps.unwrap_or(DEFAULT_STEPS),
            number_of_images: 1,
            width,
            height,
            seed: options.seed.unwrap_or(0),
        })
    }
}

/// Descriptive data attached to a generated image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    /// Prompt reported by the provider, or the submitted prompt
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_prompt: Option<String>,
    /// Options exactly as the caller passed them
    #[serde(flatten)]
    pub options: GenerationOptions,
}

/// Normalized result of a successful generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedImage {
    pub success: bool,
    /// First image returned by the provider, as the provider encoded it
    pub image_data: String,
    pub metadata: ImageMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_defaults() {
        let payload = RequestPayload::build("a lighthouse", &GenerationOptions::default()).unwrap();
        assert_eq!(payload.style, "photographic");
        assert_eq!(payload.style_preset, "photographic");
        assert!((payload.cfg_scale - 6.5).abs() < f64::EPSILON);
        assert_eq!(payload.steps, 30);
        assert_eq!(payload.number_of_images, 1);
        assert_eq!((payload.width, payload.height), (1024, 1024));
        assert_eq!(payload.seed, 0);
    }

    #[test]
    fn payload_wire_shape() {
        let options = GenerationOptions {
            style: Some("neon".to_string()),
            size: Some("768x512".to_string()),
            seed: Some(42),
            ..GenerationOptions::default()
        };
        let payload = RequestPayload::build("a red fox", &options).unwrap();
        let json = serde_json::to_string_pretty(&payload).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "prompt": "a red fox",
          "style": "neon-punk",
          "style_preset": "neon-punk",
          "cfgScale": 6.5,
          "steps": 30,
          "numberOfImages": 1,
          "width": 768,
          "height": 512,
          "seed": 42
        }
        "#);
    }

    #[test]
    fn malformed_size_is_rejected() {
        let options = GenerationOptions {
            size: Some("large".to_string()),
            ..GenerationOptions::default()
        };
        let err = RequestPayload::build("a cat", &options).unwrap_err();
        assert!(matches!(err, ImageGenError::InvalidRequest(_)));
    }

    #[test]
    fn blank_prompt_is_rejected() {
        let err = RequestPayload::build("   ", &GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, ImageGenError::InvalidRequest(_)));
    }

    #[test]
    fn default_parameters_are_valid_once_prompted() {
        let params = GenerationParameters::with_prompt("mountains at dawn");
        assert!(params.validate().is_ok());
        assert!(params.seed < RANDOM_SEED_BOUND);
    }

    #[test]
    fn validation_enforces_ranges() {
        let mut params = GenerationParameters::with_prompt("mountains");
        params.cfg_scale = 25.0;
        assert!(params.validate().is_err());

        params.cfg_scale = 7.0;
        params.steps = 5;
        assert!(params.validate().is_err());

        params.steps = 50;
        params.style = "sketch".to_string();
        assert!(params.validate().is_err());

        params.style = "neon".to_string();
        params.size = "1024".to_string();
        assert!(params.validate().is_err());
    }

    #[test]
    fn randomized_seed_stays_in_bounds() {
        let mut params = GenerationParameters::default();
        for _ in 0..100 {
            assert!(params.randomize_seed() < RANDOM_SEED_BOUND);
        }
    }

    #[test]
    fn metadata_flattens_options() {
        let metadata = ImageMetadata {
            prompt: "a fox".to_string(),
            original_prompt: None,
            translated_prompt: Some("a fox".to_string()),
            options: GenerationOptions {
                steps: Some(20),
                ..GenerationOptions::default()
            },
        };
        let value = serde_json::to_value(&metadata).unwrap();
        assert_eq!(value["steps"], 20);
        assert_eq!(value["translatedPrompt"], "a fox");
        assert!(value.get("originalPrompt").is_none());
        assert!(value.get("style").is_none());
    }
}
