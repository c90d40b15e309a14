#![allow(clippy::must_use_candidate)]

mod context;
mod credentials;

pub use context::RequestContext;
pub use credentials::Credentials;
