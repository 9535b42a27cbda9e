//! Listing data returned by the server's `list` endpoint.

use serde::{Deserialize, Serialize};

/// Which listing the widget shows and requests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewStyle {
    /// Plain file browser (default)
    #[default]
    FileList,
    /// Installed/installable application bundles
    AppList,
}

impl ViewStyle {
    /// Value of the `style` query parameter.
    pub fn as_param(self) -> u8 {
        match self {
            Self::FileList => 0,
            Self::AppList => 1,
        }
    }

    pub fn allows_upload(self) -> bool {
        matches!(self, Self::FileList)
    }
}

/// File or directory row of a [`ViewStyle::FileList`] listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Absolute path; directories end with `/`.
    pub path: String,
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default, rename = "isIPA")]
    pub is_ipa: bool,
}

impl FileEntry {
    pub fn is_dir(&self) -> bool {
        self.path.ends_with('/')
    }

    /// Path without the directory slash, as sent to `download`/`install`.
    pub fn file_path(&self) -> &str {
        self.path.strip_suffix('/').unwrap_or(&self.path)
    }
}

/// Application bundle row of a [`ViewStyle::AppList`] listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppEntry {
    pub path: String,
    pub name: String,
    pub version: String,
    pub bundle_id: String,
    pub cert: String,
    pub time: String,
    pub size: Option<u64>,
    /// Icon URL or data URI.
    pub logo: String,
}

/// One complete listing, as rendered for a path/style pair.
#[derive(Clone, Debug, PartialEq)]
pub enum Listing {
    Files(Vec<FileEntry>),
    Apps(Vec<AppEntry>),
}

impl Listing {
    /// Decode the `list` response body for the given style.
    pub fn from_json(style: ViewStyle, body: &str) -> Result<Self, serde_json::Error> {
        Ok(match style {
            ViewStyle::FileList => Self::Files(serde_json::from_str(body)?),
            ViewStyle::AppList => Self::Apps(serde_json::from_str(body)?),
        })
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Files(entries) => entries.len(),
            Self::Apps(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
