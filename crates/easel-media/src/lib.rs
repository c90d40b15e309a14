#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

//! Media persistence and sharing
//!
//! Image payloads are normalized to data URLs, decoded into a scoped
//! temporary file and handed to a [`MediaLibrary`] or [`ShareTarget`].
//! The temporary file never outlives the operation.

mod data;
mod error;
mod library;
mod share;
mod store;

pub use data::{DecodedImage, decode_data_url, normalize_base64_data, sanitize_file_stem};
pub use error::{MediaError, Result};
pub use library::{Album, Asset, LocalMediaLibrary, MediaLibrary};
pub use share::{OutboxShareTarget, ShareTarget};
pub use store::MediaStore;
