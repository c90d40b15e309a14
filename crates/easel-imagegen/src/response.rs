use serde_json::Value;

use crate::error::{ImageGenError, Result};
use crate::types::{GeneratedImage, GenerationOptions, ImageMetadata};

/// Image-bearing object as the provider returns it
///
/// Prompt fields of an unexpected type are treated as absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePayload {
    pub images: Vec<String>,
    pub prompt: Option<String>,
    pub original_prompt: Option<String>,
    pub translated_prompt: Option<String>,
}

/// Known response envelopes, each holding at least one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderResponse {
    /// `{ "images": [...] }` at the top level
    Direct(ImagePayload),
    /// `{ "body": ... }` where the body is an object or its JSON string
    GatewayWrapped(ImagePayload),
}

impl ProviderResponse {
    /// Classify a raw response
    ///
    /// A non-empty top-level `images` array wins over `body`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageGenError::ResponseFormat`] when neither envelope yields an image
    pub fn decode(value: &Value) -> Result<Self> {
        if let Some(payload) = image_payload(value) {
            return Ok(Self::Direct(payload));
        }

        if let Some(body) = value.get("body").filter(|body| !body.is_null()) {
            let body = match body {
                Value::String(text) => serde_json::from_str::<Value>(text).map_err(|e| {
                    tracing::error!(error = %e, "response body is not valid JSON");
                    ImageGenError::ResponseFormat("invalid response body format".to_string())
                })?,
                other => other.clone(),
            };

            return image_payload(&body).map(Self::GatewayWrapped).ok_or_else(|| {
                tracing::error!(body = %body, "response body carries no images");
                ImageGenError::ResponseFormat("no images found in response body".to_string())
            });
        }

        tracing::error!(response = %value, "unrecognized response structure");
        Err(ImageGenError::ResponseFormat(
            "response does not contain image data".to_string(),
        ))
    }

    pub fn payload(&self) -> &ImagePayload {
        match self {
            Self::Direct(payload) | Self::GatewayWrapped(payload) => payload,
        }
    }

    /// Build the normalized result for the submitted prompt and options
    pub fn into_generated(self, prompt: &str, options: &GenerationOptions) -> GeneratedImage {
        let (Self::Direct(payload) | Self::GatewayWrapped(payload)) = self;
        let ImagePayload {
            images,
            prompt: reported_prompt,
            original_prompt,
            translated_prompt,
        } = payload;

        GeneratedImage {
            success: true,
            image_data: images.into_iter().next().unwrap_or_default(),
            metadata: ImageMetadata {
                prompt: reported_prompt
                    .filter(|p| !p.is_empty())
                    .unwrap_or_else(|| prompt.to_string()),
                original_prompt,
                translated_prompt,
                options: options.clone(),
            },
        }
    }
}

fn image_payload(value: &Value) -> Option<ImagePayload> {
    let object = value.as_object()?;
    let images: Vec<String> = object
        .get("images")?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();
    if images.is_empty() {
        return None;
    }

    let text = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);
    Some(ImagePayload {
        images,
        prompt: text("prompt"),
        original_prompt: text("originalPrompt"),
        translated_prompt: text("translatedPrompt"),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_direct_shape() {
        let response = ProviderResponse::decode(&json!({ "images": ["AAA"], "prompt": "p" })).unwrap();
        assert!(matches!(response, ProviderResponse::Direct(_)));
        assert_eq!(response.payload().images, vec!["AAA"]);
    }

    #[test]
    fn decodes_string_body() {
        let value = json!({ "statusCode": 200, "body": "{\"images\":[\"BBB\"],\"translatedPrompt\":\"t\"}" });
        let response = ProviderResponse::decode(&value).unwrap();
        assert!(matches!(response, ProviderResponse::GatewayWrapped(_)));
        assert_eq!(response.payload().translated_prompt.as_deref(), Some("t"));
    }

    #[test]
    fn decodes_object_body() {
        let value = json!({ "body": { "images": ["CCC", "DDD"] } });
        let image = ProviderResponse::decode(&value)
            .unwrap()
            .into_generated("a castle", &GenerationOptions::default());
        assert_eq!(image.image_data, "CCC");
        assert_eq!(image.metadata.prompt, "a castle");
    }

    #[test]
    fn top_level_images_win_over_body() {
        let value = json!({ "images": ["TOP"], "body": { "images": ["NESTED"] } });
        let response = ProviderResponse::decode(&value).unwrap();
        assert!(matches!(response, ProviderResponse::Direct(_)));
        assert_eq!(response.payload().images[0], "TOP");
    }

    #[test]
    fn empty_images_without_body_is_rejected() {
        let err = ProviderResponse::decode(&json!({ "images": [] })).unwrap_err();
        assert!(matches!(err, ImageGenError::ResponseFormat(_)));
    }

    #[test]
    fn unparseable_string_body_is_rejected() {
        let err = ProviderResponse::decode(&json!({ "body": "not json" })).unwrap_err();
        assert!(matches!(err, ImageGenError::ResponseFormat(msg) if msg.contains("body format")));
    }

    #[test]
    fn body_without_images_is_rejected() {
        let err = ProviderResponse::decode(&json!({ "body": "{\"error\":\"throttled\"}" })).unwrap_err();
        assert!(matches!(err, ImageGenError::ResponseFormat(msg) if msg.contains("no images")));
    }

    #[test]
    fn non_object_response_is_rejected() {
        assert!(ProviderResponse::decode(&json!(["AAA"])).is_err());
        assert!(ProviderResponse::decode(&json!(null)).is_err());
    }

    #[test]
    fn mistyped_prompt_fields_do_not_discard_the_image() {
        let image = ProviderResponse::decode(&json!({
            "images": ["AAA"],
            "prompt": 5,
            "originalPrompt": { "x": 1 }
        }))
        .unwrap()
        .into_generated("a lighthouse", &GenerationOptions::default());

        assert_eq!(image.image_data, "AAA");
        assert_eq!(image.metadata.prompt, "a lighthouse");
        assert_eq!(image.metadata.original_prompt, None);
    }

    #[test]
    fn mistyped_fields_inside_body_are_tolerated() {
        let value = json!({ "body": "{\"images\":[\"BBB\"],\"translatedPrompt\":[\"t\"]}" });
        let response = ProviderResponse::decode(&value).unwrap();
        assert!(matches!(response, ProviderResponse::GatewayWrapped(_)));
        assert_eq!(response.payload().images, vec!["BBB"]);
        assert_eq!(response.payload().translated_prompt, None);
    }

    #[test]
    fn provider_prompt_overrides_submitted_prompt() {
        let options = GenerationOptions {
            seed: Some(7),
            ..GenerationOptions::default()
        };
        let image = ProviderResponse::decode(&json!({
            "images": ["AAA"],
            "prompt": "translated fox",
            "originalPrompt": "renard"
        }))
        .unwrap()
        .into_generated("renard", &options);

        assert!(image.success);
        assert_eq!(image.metadata.prompt, "translated fox");
        assert_eq!(image.metadata.original_prompt.as_deref(), Some("renard"));
        assert_eq!(image.metadata.options.seed, Some(7));
    }
}
