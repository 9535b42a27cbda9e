//! Browser adapters and small helpers.
//!
//! - [`HttpListingService`], [`HttpInstallService`] - `list`/`install` over fetch
//! - [`XhrUploadTransport`] - multipart uploads with progress
//! - [`BrowserSpawner`] - runs controller tasks on the event loop
//! - [`validate_redirect_url`] - install redirect validation

pub mod dom;
mod fetch;
pub mod format;
mod spawn;
mod url;
mod xhr;

pub use fetch::{HttpInstallService, HttpListingService};
pub use spawn::BrowserSpawner;
pub use url::{UrlValidation, download_url, validate_redirect_url};
pub use xhr::{PickedFile, XhrUploadTransport};
