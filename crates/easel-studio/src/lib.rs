#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]

//! Application facade
//!
//! [`Studio`] owns the live configuration, the credential provider, the image
//! generator and the media store, and turns their failures into
//! user-facing [`Alert`]s.

mod error;
mod record;
mod studio;

pub use error::{Alert, Result, StudioError};
pub use record::{GeneratedRecord, SavedRecord, saved_filename};
pub use studio::Studio;
