use chrono::{DateTime, Utc};

/// What a transient notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// The service had no activity for the current filters
    NotFound,
    /// The service could not be reached or answered garbage
    Unavailable,
    /// A keystroke was rejected by field validation
    Rejected,
    Info,
}

/// A message shown to the user until `expires_at`, then hidden automatically.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    #[must_use]
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
