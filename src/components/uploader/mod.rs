//! File-manager widget components.
//!
//! Components:
//! - [`Uploader`] - Widget layout and drop zone
//! - [`Toolbar`] - Style toggle, upload picker, reload
//! - [`PathBar`] - Breadcrumbs of the displayed directory
//! - [`DirectoryListing`] - File or app rows
//! - [`Uploads`] - In-flight upload rows with cancel
//! - [`Alerts`] - Dismissible error alerts
//! - [`DetailsModal`] - File/app details with download and install

mod alerts;
mod listing;
mod modal;
mod pathbar;
mod toolbar;
#[allow(clippy::module_inception)]
mod uploader;
mod uploads;

pub use alerts::Alerts;
pub use listing::DirectoryListing;
pub use modal::DetailsModal;
pub use pathbar::PathBar;
pub use toolbar::Toolbar;
pub use uploader::Uploader;
pub use uploads::Uploads;
