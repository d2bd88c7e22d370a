use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::activity::{Activity, ActivityType};
use crate::models::filter::{CategoryChoice, FilterField, FilterFields, FilterQuery};
use crate::models::notice::{Notice, NoticeKind};
use crate::providers::traits::SuggestionProvider;
use crate::services::activity_store::ActivityStore;
use crate::services::filter_parser::FilterParser;
use crate::AppContext;

/// Upper bound for a configured notice duration (one day).
const MAX_NOTICE_SECONDS: u64 = 86_400;

/// Every user action the list and category buttons can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchAny,
    FetchByCategory(ActivityType),
    MoveUp(Uuid),
    MoveDown(Uuid),
    Delete(Uuid),
    OpenLink(String),
}

/// What the front end has to do after a command was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    /// Run this query against the provider, then call `finish_fetch`.
    FetchRequested(FilterQuery),
    /// A fetch is already outstanding; the trigger was dropped.
    Ignored,
    /// The list changed and has been saved.
    Updated,
    /// Nothing to do (already first/last, or unknown id).
    Unchanged,
    /// Open this URL externally.
    OpenLink(String),
}

/// Result of a completed fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Added(Uuid),
    /// Another fetch was still outstanding; nothing was requested.
    Ignored,
    NotFound,
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching,
}

/// Orchestrates filters, the suggestion provider, and the activity list.
///
/// Single-threaded by construction: the only suspension point is the
/// provider call, and the store is only touched synchronously here.
pub struct Controller {
    context: AppContext,
    store: ActivityStore,
    filters: FilterFields,
    parser: FilterParser,
    state: FetchState,
    notice: Option<Notice>,
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("provider", &self.context.provider.name())
            .field("activities", &self.store.len())
            .field("filters", &self.filters)
            .field("state", &self.state)
            .field("notice", &self.notice)
            .finish()
    }
}

impl Controller {
    /// Build a controller around an already loaded store.
    pub fn new(context: AppContext, store: ActivityStore) -> Self {
        Self {
            context,
            store,
            filters: FilterFields::new(),
            parser: FilterParser::new(),
            state: FetchState::Idle,
            notice: None,
        }
    }

    /// Load the persisted list through the context's storage and build a controller.
    pub fn load(context: AppContext) -> Result<Self, CoreError> {
        let store = context.storage.load()?;
        Ok(Self::new(context, store))
    }

    // ── Fetch cycle ─────────────────────────────────────────────────

    /// Start a fetch: `Idle → Fetching`. Returns `None` while another fetch is
    /// outstanding so triggers never overlap.
    pub fn begin_fetch(&mut self, category: CategoryChoice) -> Option<FilterQuery> {
        if self.state == FetchState::Fetching {
            debug!("Fetch already in flight, ignoring trigger");
            return None;
        }
        let fields = FilterFields {
            category,
            ..self.filters.clone()
        };
        let query = self.parser.parse(&fields);
        self.state = FetchState::Fetching;
        debug!(?query, "Fetch started");
        Some(query)
    }

    /// Finish a fetch: `Fetching → Idle`.
    ///
    /// On success the activity goes to the top of the list and the list is
    /// saved (a save failure is returned). On failure the list is untouched
    /// and a timed notice is raised.
    pub fn finish_fetch(
        &mut self,
        result: Result<Activity, CoreError>,
        now: DateTime<Utc>,
    ) -> Result<FetchOutcome, CoreError> {
        self.state = FetchState::Idle;
        match result {
            Ok(activity) => {
                let id = self.store.append_at(activity, now).id;
                self.persist()?;
                Ok(FetchOutcome::Added(id))
            }
            Err(CoreError::NotFound(msg)) => {
                warn!(reason = %msg, "No activity matched the filters");
                self.raise_notice(
                    NoticeKind::NotFound,
                    "No activity found for these filters",
                    now,
                );
                Ok(FetchOutcome::NotFound)
            }
            Err(e) => {
                warn!(error = %e, "Activity fetch failed");
                self.raise_notice(
                    NoticeKind::Unavailable,
                    "Suggestion service unavailable, try again later",
                    now,
                );
                Ok(FetchOutcome::Unavailable)
            }
        }
    }

    /// Run a whole fetch cycle against the context's provider.
    pub async fn fetch(
        &mut self,
        category: CategoryChoice,
        now: DateTime<Utc>,
    ) -> Result<FetchOutcome, CoreError> {
        let Some(query) = self.begin_fetch(category) else {
            return Ok(FetchOutcome::Ignored);
        };
        let provider = Arc::clone(&self.context.provider);
        let result = provider.fetch(&query).await;
        self.finish_fetch(result, now)
    }

    // ── Commands ────────────────────────────────────────────────────

    /// Single entry point for user commands. Reorder and delete are allowed
    /// at any time, including while a fetch is outstanding.
    pub fn dispatch(&mut self, command: Command) -> Result<CommandOutcome, CoreError> {
        debug!(?command, "Dispatching command");
        match command {
            Command::FetchAny => Ok(self.fetch_outcome(CategoryChoice::Any)),
            Command::FetchByCategory(t) => Ok(self.fetch_outcome(CategoryChoice::Only(t))),
            Command::MoveUp(id) => {
                let moved = self.store.move_up(id);
                self.persist_if(moved)
            }
            Command::MoveDown(id) => {
                let moved = self.store.move_down(id);
                self.persist_if(moved)
            }
            Command::Delete(id) => {
                let removed = self.store.remove(id).is_some();
                self.persist_if(removed)
            }
            Command::OpenLink(url) => Ok(CommandOutcome::OpenLink(url)),
        }
    }

    // ── Filters ─────────────────────────────────────────────────────

    #[must_use]
    pub fn filters(&self) -> &FilterFields {
        &self.filters
    }

    /// Set the category selector of the filter panel.
    pub fn set_category(&mut self, category: CategoryChoice) {
        self.filters.category = category;
    }

    /// Try to replace a numeric field with `candidate`. A rejected edit keeps
    /// the previous value and raises a `Rejected` notice.
    pub fn edit_filter(
        &mut self,
        field: FilterField,
        candidate: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        match self.parser.apply_edit(&mut self.filters, field, candidate) {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!(error = %e, "Filter edit rejected");
                self.raise_notice(NoticeKind::Rejected, e.to_string(), now);
                Err(e)
            }
        }
    }

    /// The query the current filter panel would produce.
    #[must_use]
    pub fn current_query(&self) -> FilterQuery {
        self.parser.parse(&self.filters)
    }

    // ── Notices ─────────────────────────────────────────────────────

    /// Show a notice for the configured duration, replacing any current one.
    pub fn raise_notice(
        &mut self,
        kind: NoticeKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        let seconds = self.context.settings.notice_seconds.min(MAX_NOTICE_SECONDS) as i64;
        let expires_at = now + Duration::seconds(seconds);
        self.notice = Some(Notice {
            kind,
            message: message.into(),
            expires_at,
        });
    }

    /// The notice to display at `now`, if any.
    #[must_use]
    pub fn notice(&self, now: DateTime<Utc>) -> Option<&Notice> {
        self.notice.as_ref().filter(|n| n.is_visible(now))
    }

    /// Drop the notice once it has expired. Returns `true` if one was removed.
    pub fn expire_notice(&mut self, now: DateTime<Utc>) -> bool {
        if self.notice.as_ref().is_some_and(|n| !n.is_visible(now)) {
            self.notice = None;
            return true;
        }
        false
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn store(&self) -> &ActivityStore {
        &self.store
    }

    #[must_use]
    pub fn state(&self) -> FetchState {
        self.state
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.state == FetchState::Fetching
    }

    /// Shared handle to the provider, for running a fetch off the UI path.
    #[must_use]
    pub fn provider(&self) -> Arc<dyn SuggestionProvider> {
        Arc::clone(&self.context.provider)
    }

    #[must_use]
    pub fn context(&self) -> &AppContext {
        &self.context
    }

    // ── Internal ────────────────────────────────────────────────────

    fn fetch_outcome(&mut self, category: CategoryChoice) -> CommandOutcome {
        match self.begin_fetch(category) {
            Some(query) => CommandOutcome::FetchRequested(query),
            None => CommandOutcome::Ignored,
        }
    }

    fn persist_if(&mut self, changed: bool) -> Result<CommandOutcome, CoreError> {
        if !changed {
            return Ok(CommandOutcome::Unchanged);
        }
        self.persist()?;
        Ok(CommandOutcome::Updated)
    }

    fn persist(&self) -> Result<(), CoreError> {
        self.context.storage.save(&self.store)
    }
}
