//! UI components built with Leptos.
//!
//! - [`uploader`] - The file-manager widget (toolbar, path bar, listing, uploads)
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod icons;
pub mod uploader;

pub use uploader::Uploader;
