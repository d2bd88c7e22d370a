use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;
use tracing::debug;

use crate::errors::CoreError;
use crate::models::activity::Activity;
use crate::models::filter::FilterQuery;
use crate::models::settings::DEFAULT_API_BASE_URL;
use super::traits::SuggestionProvider;

const PROVIDER_NAME: &str = "BoredAPI";

/// Bored API provider: one random activity per `GET`.
///
/// - **Free**: No API key, no rate limits.
/// - **Filters**: `type`, `participants`, `min_price`/`max_price`,
///   `min_accessibility`/`max_accessibility` as query parameters.
/// - **No match**: answered with `{"error": "..."}` instead of an activity.
pub struct BoredApiProvider {
    client: Client,
    base_url: String,
}

impl BoredApiProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL, 30)
    }

    /// Point the provider at a different endpoint (self-hosted mirror, test server).
    pub fn with_base_url(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs.max(1)));
        #[cfg(target_arch = "wasm32")]
        let _ = timeout_secs;
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for BoredApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── Bored API response types ────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum ActivityResponse {
    Found(Activity),
    Missing { error: String },
}

/// Map a response body to an activity.
///
/// An `{"error": ...}` object means no activity matched the filters;
/// anything else that is not an activity is a service failure.
pub fn parse_response(body: &str) -> Result<Activity, CoreError> {
    let resp: ActivityResponse = serde_json::from_str(body).map_err(|e| {
        CoreError::Unavailable(format!("{PROVIDER_NAME}: failed to parse response: {e}"))
    })?;
    match resp {
        ActivityResponse::Found(activity) => match activity.out_of_range() {
            Some(problem) => Err(CoreError::Unavailable(format!(
                "{PROVIDER_NAME}: invalid activity: {problem}"
            ))),
            None => Ok(activity),
        },
        ActivityResponse::Missing { error } => Err(CoreError::NotFound(error)),
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl SuggestionProvider for BoredApiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn fetch(&self, query: &FilterQuery) -> Result<Activity, CoreError> {
        let params = query.to_query_pairs();
        debug!(provider = PROVIDER_NAME, ?params, "Requesting activity");

        let resp = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if status == StatusCode::NOT_FOUND {
            // Some deployments answer "no match" with a 404 carrying the error object.
            return match parse_response(&body) {
                Err(CoreError::NotFound(msg)) => Err(CoreError::NotFound(msg)),
                _ => Err(CoreError::NotFound(
                    "No activity found with the specified parameters".into(),
                )),
            };
        }
        if !status.is_success() {
            return Err(CoreError::Unavailable(format!(
                "{PROVIDER_NAME} returned HTTP {status}"
            )));
        }

        parse_response(&body)
    }
}
