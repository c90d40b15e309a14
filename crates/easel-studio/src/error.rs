use easel_auth::AuthError;
use easel_config::StoreError;
use easel_imagegen::ImageGenError;
use easel_media::MediaError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StudioError>;

#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    Generation(#[from] ImageGenError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    Credentials(#[from] AuthError),

    #[error(transparent)]
    Settings(#[from] StoreError),
}

/// Message box contents for a failed action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: String,
}

impl StudioError {
    pub fn alert(&self) -> Alert {
        let (title, message) = match self {
            Self::Generation(ImageGenError::InvalidRequest(msg)) => ("Invalid Parameters", msg.clone()),
            Self::Generation(ImageGenError::Config(msg)) => ("Configuration Required", msg.clone()),
            Self::Generation(e) => ("Generation Failed", e.client_message()),
            Self::Media(MediaError::PermissionDenied(_)) => (
                "Permission Required",
                "Please grant photo library access to save images.".to_string(),
            ),
            Self::Media(MediaError::SharingUnavailable) => ("Sharing Unavailable", self.to_string()),
            Self::Media(e) => ("Save Failed", e.to_string()),
            Self::Credentials(e) => ("Authentication Error", e.to_string()),
            Self::Settings(StoreError::Incomplete(msg)) => ("Invalid Configuration", msg.clone()),
            Self::Settings(e) => ("Settings Error", e.to_string()),
        };

        Alert { title, message }
    }
}
