pub mod controller;
pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use std::sync::Arc;

use models::settings::Settings;
use providers::bored::BoredApiProvider;
use providers::traits::SuggestionProvider;
use storage::manager::StorageManager;

/// Everything the controller needs from the outside world, built once at
/// startup and handed over explicitly.
pub struct AppContext {
    pub provider: Arc<dyn SuggestionProvider>,
    pub storage: StorageManager,
    pub settings: Settings,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("provider", &self.provider.name())
            .field("storage", &self.storage.path())
            .field("settings", &self.settings)
            .finish()
    }
}

impl AppContext {
    /// Assemble a context from explicit parts (tests, alternative providers).
    pub fn new(
        provider: Arc<dyn SuggestionProvider>,
        storage: StorageManager,
        settings: Settings,
    ) -> Self {
        Self {
            provider,
            storage,
            settings,
        }
    }

    /// The default wiring: Bored API over HTTP, list file in the data directory.
    pub fn from_settings(settings: Settings) -> Self {
        let provider = BoredApiProvider::with_base_url(
            settings.api_base_url.clone(),
            settings.request_timeout_secs,
        );
        let storage = StorageManager::in_dir(&settings.resolved_data_dir());
        Self::new(Arc::new(provider), storage, settings)
    }
}
