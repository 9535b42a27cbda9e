//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application.

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name shown in the page header.
pub const APP_NAME: &str = "Web Uploader";

/// Root crumb label when the server page does not provide a device name.
pub const DEFAULT_DEVICE_NAME: &str = "Device";

/// Global JS variable the server page may set to the device name.
pub const DEVICE_NAME_GLOBAL: &str = "_device";

/// Element the widget mounts into.
pub const MOUNT_ELEMENT_ID: &str = "uploader";

// =============================================================================
// Server Endpoints
// =============================================================================

/// REST endpoints of the embedded server, relative to the page URL.
pub mod endpoints {
    /// `GET list?path=…&style=…` → JSON array of entries.
    pub const LIST: &str = "list";
    /// `POST upload` multipart form.
    pub const UPLOAD: &str = "upload";
    /// `GET download?path=…` → file body.
    pub const DOWNLOAD: &str = "download";
    /// `POST install` JSON `{path, bundleId?}` → `{url}`.
    pub const INSTALL: &str = "install";
}

/// Multipart field names of the upload form.
pub mod upload_fields {
    pub const FILE: &str = "files[]";
    pub const PATH: &str = "path";
    pub const RELATIVE_PATH: &str = "relativePath";
}

// =============================================================================
// Security
// =============================================================================

/// URL schemes an install response may redirect to.
/// `itms-services` triggers the over-the-air install prompt.
pub const ALLOWED_REDIRECT_SCHEMES: &[&str] = &["itms-services", "https", "http"];

// =============================================================================
// UI Configuration
// =============================================================================

/// Maximum number of alerts kept on screen; older ones are dropped.
pub const MAX_ALERTS: usize = 10;

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;
