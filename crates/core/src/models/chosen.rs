use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::activity::Activity;

/// An activity the user decided to keep in their list.
///
/// **Important**: only `activity` is persisted. The `id` and `chosen_at`
/// are regenerated whenever the list is loaded from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChosenActivity {
    /// Wrapper identity used to address move/delete commands
    pub id: Uuid,

    /// The underlying activity data
    pub activity: Activity,

    /// When this entry was created (or reloaded)
    pub chosen_at: DateTime<Utc>,
}

impl ChosenActivity {
    pub fn new(activity: Activity, chosen_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            activity,
            chosen_at,
        }
    }
}
