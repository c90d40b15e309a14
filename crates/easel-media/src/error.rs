use thiserror::Error;

pub type Result<T> = std::result::Result<T, MediaError>;

/// Errors from saving or sharing images
#[derive(Debug, Error)]
pub enum MediaError {
    /// Write access to the media library was refused
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Filesystem failure while handling the image
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not an image data URL
    #[error("Invalid image data: {0}")]
    InvalidImageData(String),

    /// The payload is not valid base64
    #[error("Failed to decode image data: {0}")]
    Decode(#[from] base64::DecodeError),

    /// No share target is available on this device
    #[error("Sharing is not available on this device")]
    SharingUnavailable,
}

impl MediaError {
    /// Map an I/O error, singling out refused access
    pub(crate) fn from_io(context: &str, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied(format!("{context}: {error}"))
        } else {
            Self::Io(error)
        }
    }
}
