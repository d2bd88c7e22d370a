use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::activity::Activity;
use crate::models::filter::FilterQuery;

/// Contract over the external suggestion service.
///
/// Implementations perform exactly one request per call and never retry.
/// - `Err(CoreError::NotFound)`: the service has no activity matching the query.
/// - `Err(CoreError::Unavailable)`: transport or service failure.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait SuggestionProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Fetch one random activity satisfying `query`.
    async fn fetch(&self, query: &FilterQuery) -> Result<Activity, CoreError>;
}
