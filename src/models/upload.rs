//! Upload task bookkeeping types.

use std::fmt;

use super::DirectoryPath;

/// Opaque identifier of one upload task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UploadId(pub(crate) u64);

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upload-{}", self.0)
    }
}

/// Lifecycle of an upload task.
///
/// `Pending → InFlight`. A task leaves the queue once it succeeds, fails or
/// is aborted, so only live states are represented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UploadStatus {
    #[default]
    Pending,
    InFlight,
}

/// Form metadata sent alongside the file body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadRequest {
    /// Target directory (`path` form field).
    pub path: DirectoryPath,
    /// Folder structure of the dropped file; empty when there is none.
    pub relative_path: String,
    pub file_name: String,
}

/// Visible progress row for an upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadEntry {
    pub id: UploadId,
    /// Destination shown to the user (`target + file name`).
    pub label: String,
    /// Integer percentage in `[0, 100]`.
    pub progress: u8,
}

/// Integer percentage of `loaded / total`, clamped to `[0, 100]`.
///
/// An unknown (zero) total reports no progress.
pub fn progress_percent(loaded: u64, total: u64) -> u8 {
    if total == 0 {
        return 0;
    }
    let percent = loaded.saturating_mul(100) / total;
    percent.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(0, 100), 0);
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(999, 1000), 99);
        assert_eq!(progress_percent(1000, 1000), 100);
        assert_eq!(progress_percent(5000, 1000), 100);
        assert_eq!(progress_percent(10, 0), 0);
    }
}
