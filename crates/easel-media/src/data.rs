use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Base64 of the JPEG start-of-image marker (`FF D8 FF`)
const JPEG_SIGNATURE: &str = "/9j/";

/// How far into the payload the JPEG signature is searched for
const SIGNATURE_WINDOW: usize = 10;

/// Image bytes decoded from a data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DecodedImage {
    /// File extension matching the MIME type
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "png",
        }
    }
}

/// Turn a provider payload into a data URL
///
/// Surrounding quotes and whitespace are stripped and data URLs pass through
/// unchanged. Bare base64 is labelled JPEG when it starts with the JPEG
/// signature and PNG otherwise; the content itself is not validated.
/// Returns `None` when nothing is left after stripping.
pub fn normalize_base64_data(data: &str) -> Option<String> {
    let trimmed = data.trim_matches(|c: char| c == '"' || c == '\'' || c.is_whitespace());
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with("data:") {
        return Some(trimmed.to_string());
    }

    let head: String = trimmed.chars().take(SIGNATURE_WINDOW).collect();
    let mime_type = if head.contains(JPEG_SIGNATURE) {
        "image/jpeg"
    } else {
        "image/png"
    };

    Some(format!("data:{mime_type};base64,{trimmed}"))
}

/// Decode a `data:<mime>;base64,<payload>` URL
///
/// # Errors
///
/// Returns [`MediaError::InvalidImageData`] for anything but a non-empty
/// base64 data URL and [`MediaError::Decode`] for a corrupt payload
///
/// [`MediaError::InvalidImageData`]: crate::MediaError::InvalidImageData
/// [`MediaError::Decode`]: crate::MediaError::Decode
pub fn decode_data_url(url: &str) -> crate::Result<DecodedImage> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| crate::MediaError::InvalidImageData("missing data: prefix".to_string()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| crate::MediaError::InvalidImageData("missing payload separator".to_string()))?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| crate::MediaError::InvalidImageData("payload is not base64".to_string()))?;

    let bytes = STANDARD.decode(payload.trim())?;
    if bytes.is_empty() {
        return Err(crate::MediaError::InvalidImageData("empty image".to_string()));
    }

    Ok(DecodedImage {
        mime_type: if mime_type.is_empty() {
            "image/png".to_string()
        } else {
            mime_type.to_string()
        },
        bytes,
    })
}

/// Replace everything outside `[A-Za-z0-9]` with `_`
pub fn sanitize_file_stem(stem: &str) -> String {
    stem.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
