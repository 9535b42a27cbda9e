//! User-visible alerts.

/// Severity of an alert, mapped to its styling.
///
/// Controller failures are the only alerts today, and they are all `Danger`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertLevel {
    #[default]
    Danger,
}

/// One alert shown at the top of the widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: AlertLevel,
    /// Short cause, e.g. the underlying error.
    pub title: String,
    /// What was attempted, naming the path or file.
    pub description: String,
}

impl Notification {
    pub fn danger(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Danger,
            title: title.into(),
            description: description.into(),
        }
    }
}
