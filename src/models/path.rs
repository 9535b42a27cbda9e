//! Server-side directory paths and the breadcrumb trail derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Absolute, slash-delimited path of a directory on the server.
///
/// Always starts and ends with `/`; the root is `"/"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DirectoryPath(String);

impl DirectoryPath {
    /// The root directory (`/`).
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Build a directory path, normalizing slashes.
    ///
    /// Missing leading/trailing slashes are added and empty segments
    /// (`//`) are collapsed, so `"docs/a"` becomes `"/docs/a/"`.
    pub fn new(raw: &str) -> Self {
        let segments: Vec<&str> = raw.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return Self::root();
        }
        Self(format!("/{}/", segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty path segments, in order.
    pub fn segments(&self) -> Vec<&str> {
        self.0.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// Breadcrumb trail for this path.
    ///
    /// The first crumb is the root (labelled with `root_label`), followed by
    /// one crumb per segment. Every crumb but the last targets its ancestor
    /// directory; the last one is the current directory and has no target.
    pub fn breadcrumbs(&self, root_label: &str) -> Vec<Breadcrumb> {
        let segments = self.segments();
        let mut crumbs = Vec::with_capacity(segments.len() + 1);

        crumbs.push(Breadcrumb {
            label: root_label.to_string(),
            target: (!segments.is_empty()).then(Self::root),
        });

        for (idx, segment) in segments.iter().enumerate() {
            let is_last = idx + 1 == segments.len();
            crumbs.push(Breadcrumb {
                label: (*segment).to_string(),
                target: (!is_last).then(|| Self::new(&segments[..=idx].join("/"))),
            });
        }

        crumbs
    }
}

impl Default for DirectoryPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DirectoryPath {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for DirectoryPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<DirectoryPath> for String {
    fn from(path: DirectoryPath) -> Self {
        path.0
    }
}

/// One clickable (or current) element of the path bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: String,
    /// Directory to navigate to; `None` for the current directory.
    pub target: Option<DirectoryPath>,
}

impl Breadcrumb {
    pub fn is_current(&self) -> bool {
        self.target.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(DirectoryPath::new("").as_str(), "/");
        assert_eq!(DirectoryPath::new("/").as_str(), "/");
        assert_eq!(DirectoryPath::new("docs").as_str(), "/docs/");
        assert_eq!(DirectoryPath::new("/docs/a").as_str(), "/docs/a/");
        assert_eq!(DirectoryPath::new("//docs//a//").as_str(), "/docs/a/");
    }

    #[test]
    fn test_breadcrumbs_root() {
        let crumbs = DirectoryPath::root().breadcrumbs("iPhone");
        assert_eq!(
            crumbs,
            vec![Breadcrumb {
                label: "iPhone".to_string(),
                target: None,
            }]
        );
    }

    #[test]
    fn test_breadcrumbs_nested() {
        let crumbs = DirectoryPath::new("/a/b/c/").breadcrumbs("device");
        let targets: Vec<_> = crumbs
            .iter()
            .map(|c| (c.label.as_str(), c.target.as_ref().map(|t| t.as_str())))
            .collect();
        assert_eq!(
            targets,
            vec![
                ("device", Some("/")),
                ("a", Some("/a/")),
                ("b", Some("/a/b/")),
                ("c", None),
            ]
        );
        assert!(crumbs.last().is_some_and(Breadcrumb::is_current));
    }

    #[test]
    fn test_serde_normalizes() {
        let path: DirectoryPath = serde_json::from_str("\"docs\"").unwrap();
        assert_eq!(path.as_str(), "/docs/");
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"/docs/\"");
    }
}
