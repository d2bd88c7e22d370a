use thiserror::Error;

/// Unified error type for the entire activity-journal-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Filter input ────────────────────────────────────────────────
    #[error("Rejected input for {field}: '{value}' is not a valid number")]
    ValidationReject { field: String, value: String },

    // ── Suggestion service ──────────────────────────────────────────
    #[error("No activity found: {0}")]
    NotFound(String),

    #[error("Suggestion service unavailable: {0}")]
    Unavailable(String),

    // ── Storage / File ──────────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    // ── Configuration ───────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    /// Whether this error came from the suggestion service (and should be
    /// surfaced as a notice rather than aborting the session).
    #[must_use]
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, CoreError::NotFound(_) | CoreError::Unavailable(_))
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<toml::de::Error> for CoreError {
    fn from(e: toml::de::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Filter values end up in the query string; keep them out of notices and logs.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Unavailable(sanitized)
    }
}
