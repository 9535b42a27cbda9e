//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`DirectoryPath`], [`Breadcrumb`] - Server directory paths and the path bar
//! - [`Listing`], [`FileEntry`], [`AppEntry`], [`ViewStyle`] - Listing contents
//! - [`UploadId`], [`UploadStatus`], [`UploadEntry`] - Upload task state
//! - [`InstallRequest`], [`InstallRedirect`] - Install endpoint payloads
//! - [`Notification`] - Alerts surfaced to the user

mod install;
mod listing;
mod notification;
mod path;
mod upload;

pub use install::{InstallRedirect, InstallRequest};
pub use listing::{AppEntry, FileEntry, Listing, ViewStyle};
pub use notification::{AlertLevel, Notification};
pub use path::{Breadcrumb, DirectoryPath};
pub use upload::{UploadEntry, UploadId, UploadRequest, UploadStatus, progress_percent};
