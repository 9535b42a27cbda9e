//! Browser controller for the embedded file-manager widget.
//!
//! - [`core`] - Reload coordination and the upload queue
//! - [`models`] - Paths, listings, upload and install payloads
//! - [`utils`] - Browser adapters (fetch, XHR uploads, DOM)
//! - [`components`] - Leptos UI rendering the controller's output

pub mod app;
pub mod components;
pub mod config;
pub mod core;
pub mod models;
pub mod utils;
