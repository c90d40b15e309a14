use easel_imagegen::{GeneratedImage, GenerationOptions, ImageMetadata};
use easel_media::sanitize_file_stem;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Prompt characters used in saved file names
const FILENAME_PROMPT_CHARS: usize = 10;

/// A generated image as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecord {
    /// Millisecond creation time, as a string
    pub id: String,
    pub prompt: String,
    pub image_data: String,
    pub timestamp: Timestamp,
    /// Options submitted with the request
    pub parameters: GenerationOptions,
    pub metadata: ImageMetadata,
}

impl GeneratedRecord {
    pub fn new(prompt: &str, parameters: GenerationOptions, image: GeneratedImage) -> Self {
        let timestamp = Timestamp::now();
        Self {
            id: timestamp.as_millisecond().to_string(),
            prompt: prompt.to_string(),
            image_data: image.image_data,
            timestamp,
            parameters,
            metadata: image.metadata,
        }
    }
}

/// A record after it was saved to the media library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecord {
    #[serde(flatten)]
    pub record: GeneratedRecord,
    pub saved: bool,
    pub saved_at: Timestamp,
    pub asset_id: String,
}

/// File name for a saved record: `ai-<prompt prefix>-<id>`
pub fn saved_filename(record: &GeneratedRecord) -> String {
    let prefix: String = record.prompt.chars().take(FILENAME_PROMPT_CHARS).collect();
    format!("ai-{}-{}", sanitize_file_stem(&prefix), record.id)
}
