#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

//! Image request adapter
//!
//! Builds the provider payload from user parameters, delivers it through an
//! ordered list of transports (signed first, then direct) and normalizes the
//! provider's response envelopes into a single [`GeneratedImage`].

mod catalog;
mod error;
mod generator;
mod response;
mod strategy;
mod transport;
mod types;

pub use catalog::{
    SIZE_OPTIONS, STYLE_PRESETS, SizeOption, StylePreset, find_style, format_image_size, parse_size, resolve_style,
};
pub use error::{ImageGenError, Result};
pub use generator::ImageGenerator;
pub use response::{ImagePayload, ProviderResponse};
pub use transport::{DirectTransport, SignedTransport, Target, Transport, TransportError};
pub use types::{GeneratedImage, GenerationOptions, GenerationParameters, ImageMetadata, RequestPayload};
