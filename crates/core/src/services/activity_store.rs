use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::activity::Activity;
use crate::models::chosen::ChosenActivity;
use crate::storage::format;

/// The user's curated, ordered list of chosen activities.
///
/// Index 0 is the top of the list (most recently added or moved there).
/// Duplicates by content are allowed; entries are addressed by their `id`.
/// Pure data structure: persisting after each mutation is the caller's job.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityStore {
    items: Vec<ChosenActivity>,
}

impl ActivityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap every activity with a fresh id and the given timestamp, keeping order.
    pub fn from_activities(activities: Vec<Activity>, now: DateTime<Utc>) -> Self {
        Self {
            items: activities
                .into_iter()
                .map(|a| ChosenActivity::new(a, now))
                .collect(),
        }
    }

    /// Insert a newly fetched activity at the top and return it.
    pub fn append(&mut self, activity: Activity) -> &ChosenActivity {
        self.append_at(activity, Utc::now())
    }

    /// Same as [`append`](Self::append) with an explicit timestamp.
    pub fn append_at(&mut self, activity: Activity, now: DateTime<Utc>) -> &ChosenActivity {
        self.items.insert(0, ChosenActivity::new(activity, now));
        &self.items[0]
    }

    /// Swap the entry with its neighbour toward the top.
    /// Returns `false` (and changes nothing) if it is already first or unknown.
    pub fn move_up(&mut self, id: Uuid) -> bool {
        match self.position(id) {
            Some(idx) if idx > 0 => {
                self.items.swap(idx, idx - 1);
                true
            }
            _ => false,
        }
    }

    /// Swap the entry with its neighbour toward the end.
    /// Returns `false` (and changes nothing) if it is already last or unknown.
    pub fn move_down(&mut self, id: Uuid) -> bool {
        match self.position(id) {
            Some(idx) if idx + 1 < self.items.len() => {
                self.items.swap(idx, idx + 1);
                true
            }
            _ => false,
        }
    }

    /// Delete an entry, preserving the order of the rest.
    pub fn remove(&mut self, id: Uuid) -> Option<ChosenActivity> {
        let idx = self.position(id)?;
        Some(self.items.remove(idx))
    }

    /// Plain activity records in display order. Ids and timestamps are dropped.
    pub fn serialize(&self) -> Result<Vec<u8>, CoreError> {
        format::encode(&self.activities())
    }

    /// Rebuild a store from persisted bytes. Every entry is stamped with the
    /// load time; original selection times are not stored and cannot be recovered.
    pub fn load(data: &[u8]) -> Result<Self, CoreError> {
        let activities = format::decode(data)?;
        Ok(Self::from_activities(activities, Utc::now()))
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChosenActivity> {
        self.items.iter()
    }

    #[must_use]
    pub fn items(&self) -> &[ChosenActivity] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&ChosenActivity> {
        self.items.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|c| c.id == id)
    }

    /// The underlying activities in display order.
    #[must_use]
    pub fn activities(&self) -> Vec<&Activity> {
        self.items.iter().map(|c| &c.activity).collect()
    }
}
