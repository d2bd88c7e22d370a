use activity_journal_core::controller::{Command, CommandOutcome, Controller, FetchOutcome};
use activity_journal_core::errors::CoreError;
use activity_journal_core::models::activity::Activity;
use activity_journal_core::models::filter::{CategoryChoice, FilterField, FilterQuery};
use activity_journal_core::models::notice::NoticeKind;
use chrono::{DateTime, Utc};
use ratatui::widgets::ListState;
use uuid::Uuid;

use crate::keys::Action;

/// Which control of the filter panel receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Category,
    Field(FilterField),
}

impl Focus {
    fn order() -> Vec<Focus> {
        std::iter::once(Focus::Category)
            .chain(FilterField::ALL.into_iter().map(Focus::Field))
            .collect()
    }

    fn step(self, forward: bool) -> Focus {
        let order = Self::order();
        let idx = order.iter().position(|f| *f == self).unwrap_or(0);
        let next = if forward {
            (idx + 1) % order.len()
        } else {
            (idx + order.len() - 1) % order.len()
        };
        order[next]
    }
}

/// Side effects the event loop has to carry out for the app.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Effect {
    Fetch(FilterQuery),
    OpenLink(String),
    Bell,
}

pub(crate) struct App {
    pub controller: Controller,
    pub list_state: ListState,
    pub filters_open: bool,
    pub focus: Focus,
    pub should_quit: bool,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        let mut list_state = ListState::default();
        if !controller.store().is_empty() {
            list_state.select(Some(0));
        }
        Self {
            controller,
            list_state,
            filters_open: false,
            focus: Focus::Category,
            should_quit: false,
        }
    }

    /// Apply one decoded key press. Persistence failures are returned; they
    /// end the session.
    pub fn handle_action(
        &mut self,
        action: Action,
        now: DateTime<Utc>,
    ) -> Result<Option<Effect>, CoreError> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Ok(None)
            }
            Action::SelectNext => {
                self.select_offset(1);
                Ok(None)
            }
            Action::SelectPrevious => {
                self.select_offset(-1);
                Ok(None)
            }
            Action::ToggleFilters => {
                self.filters_open = !self.filters_open;
                self.focus = Focus::Category;
                Ok(None)
            }
            Action::FocusNext => {
                self.focus = self.focus.step(true);
                Ok(None)
            }
            Action::FocusPrevious => {
                self.focus = self.focus.step(false);
                Ok(None)
            }
            Action::CycleCategory { forward } => {
                if self.focus == Focus::Category {
                    let next = self.controller.filters().category.cycle(forward);
                    self.controller.set_category(next);
                }
                Ok(None)
            }
            Action::Input(c) => self.edit_focused(now, |value| value.push(c)),
            Action::Backspace => self.edit_focused(now, |value| {
                value.pop();
            }),
            Action::Submit => {
                let command = match self.controller.filters().category {
                    CategoryChoice::Any => Command::FetchAny,
                    CategoryChoice::Only(t) => Command::FetchByCategory(t),
                };
                self.dispatch(command)
            }
            Action::FetchAny => self.dispatch(Command::FetchAny),
            Action::FetchCategory(t) => self.dispatch(Command::FetchByCategory(t)),
            Action::MoveUp => self.reorder(true),
            Action::MoveDown => self.reorder(false),
            Action::Delete => {
                let Some(id) = self.selected_id() else {
                    return Ok(None);
                };
                let effect = self.dispatch(Command::Delete(id))?;
                self.clamp_selection();
                Ok(effect)
            }
            Action::OpenLink => {
                let link = self
                    .selected_id()
                    .and_then(|id| self.controller.store().get(id))
                    .and_then(|c| c.activity.link.clone());
                match link {
                    Some(url) => self.dispatch(Command::OpenLink(url)),
                    None => {
                        if self.selected_id().is_some() {
                            self.controller
                                .raise_notice(NoticeKind::Info, "This activity has no link", now);
                        }
                        Ok(None)
                    }
                }
            }
        }
    }

    /// Deliver the result of a spawned fetch.
    pub fn on_fetch_result(
        &mut self,
        result: Result<Activity, CoreError>,
        now: DateTime<Utc>,
    ) -> Result<(), CoreError> {
        if let FetchOutcome::Added(_) = self.controller.finish_fetch(result, now)? {
            self.list_state.select(Some(0));
        }
        Ok(())
    }

    /// Periodic housekeeping: hide expired notices.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.controller.expire_notice(now);
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        let idx = self.list_state.selected()?;
        self.controller.store().items().get(idx).map(|c| c.id)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn dispatch(&mut self, command: Command) -> Result<Option<Effect>, CoreError> {
        Ok(match self.controller.dispatch(command)? {
            CommandOutcome::FetchRequested(query) => Some(Effect::Fetch(query)),
            CommandOutcome::OpenLink(url) => Some(Effect::OpenLink(url)),
            CommandOutcome::Ignored | CommandOutcome::Updated | CommandOutcome::Unchanged => None,
        })
    }

    /// Move the selected entry and keep the selection on it.
    fn reorder(&mut self, up: bool) -> Result<Option<Effect>, CoreError> {
        let Some(id) = self.selected_id() else {
            return Ok(None);
        };
        let command = if up {
            Command::MoveUp(id)
        } else {
            Command::MoveDown(id)
        };
        let effect = self.dispatch(command)?;
        self.list_state.select(self.controller.store().position(id));
        Ok(effect)
    }

    fn edit_focused(
        &mut self,
        now: DateTime<Utc>,
        edit: impl FnOnce(&mut String),
    ) -> Result<Option<Effect>, CoreError> {
        let Focus::Field(field) = self.focus else {
            return Ok(None);
        };
        let mut candidate = self.controller.filters().value(field).to_string();
        edit(&mut candidate);
        match self.controller.edit_filter(field, candidate, now) {
            Ok(()) => Ok(None),
            Err(CoreError::ValidationReject { .. }) => Ok(Some(Effect::Bell)),
            Err(e) => Err(e),
        }
    }

    fn select_offset(&mut self, delta: isize) {
        let len = self.controller.store().len();
        if len == 0 {
            self.list_state.select(None);
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.list_state.select(Some(next));
    }

    fn clamp_selection(&mut self) {
        let len = self.controller.store().len();
        let selected = match self.list_state.selected() {
            _ if len == 0 => None,
            Some(idx) => Some(idx.min(len - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use activity_journal_core::models::activity::ActivityType;
    use activity_journal_core::models::settings::Settings;
    use activity_journal_core::providers::traits::SuggestionProvider;
    use activity_journal_core::storage::manager::StorageManager;
    use activity_journal_core::AppContext;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tempfile::TempDir;

    struct NoProvider;

    #[async_trait]
    impl SuggestionProvider for NoProvider {
        fn name(&self) -> &str {
            "None"
        }

        async fn fetch(&self, _query: &FilterQuery) -> Result<Activity, CoreError> {
            Err(CoreError::Unavailable("offline".into()))
        }
    }

    fn app() -> (App, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let context = AppContext::new(
            Arc::new(NoProvider),
            StorageManager::in_dir(dir.path()),
            Settings::default(),
        );
        let controller = Controller::load(context).unwrap();
        (App::new(controller), dir)
    }

    fn add(app: &mut App, name: &str, link: Option<&str>) {
        let mut activity = Activity::new(name, ActivityType::Music, 1, 0.1, 0.1);
        if let Some(l) = link {
            activity = activity.with_link(l);
        }
        let Some(Effect::Fetch(_)) = app.handle_action(Action::FetchAny, Utc::now()).unwrap() else {
            panic!("expected a fetch to be requested");
        };
        app.on_fetch_result(Ok(activity), Utc::now()).unwrap();
    }

    fn names(app: &App) -> Vec<String> {
        app.controller
            .store()
            .iter()
            .map(|c| c.activity.name.clone())
            .collect()
    }

    #[test]
    fn fetch_result_selects_top() {
        let (mut app, _dir) = app();
        add(&mut app, "A", None);
        add(&mut app, "B", None);
        assert_eq!(names(&app), vec!["B", "A"]);
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn second_fetch_is_ignored_until_result_arrives() {
        let (mut app, _dir) = app();
        let first = app.handle_action(Action::FetchAny, Utc::now()).unwrap();
        assert!(matches!(first, Some(Effect::Fetch(_))));
        let second = app
            .handle_action(Action::FetchCategory(ActivityType::Cooking), Utc::now())
            .unwrap();
        assert_eq!(second, None);
    }

    #[test]
    fn failed_fetch_allows_next_trigger() {
        let (mut app, _dir) = app();
        app.handle_action(Action::FetchAny, Utc::now()).unwrap();
        app.on_fetch_result(
            Err(CoreError::Unavailable("Fetch task failed".into())),
            Utc::now(),
        )
        .unwrap();
        assert!(!app.controller.is_fetching());
        assert!(app.controller.notice(Utc::now()).is_some());
        let next = app.handle_action(Action::FetchAny, Utc::now()).unwrap();
        assert!(matches!(next, Some(Effect::Fetch(_))));
    }

    #[test]
    fn selection_follows_moved_item() {
        let (mut app, _dir) = app();
        add(&mut app, "A", None);
        add(&mut app, "B", None);
        app.handle_action(Action::MoveDown, Utc::now()).unwrap();
        assert_eq!(names(&app), vec!["A", "B"]);
        assert_eq!(app.list_state.selected(), Some(1));
    }

    #[test]
    fn delete_clamps_selection() {
        let (mut app, _dir) = app();
        add(&mut app, "A", None);
        add(&mut app, "B", None);
        app.handle_action(Action::SelectNext, Utc::now()).unwrap();
        app.handle_action(Action::Delete, Utc::now()).unwrap();
        assert_eq!(names(&app), vec!["B"]);
        assert_eq!(app.list_state.selected(), Some(0));
        app.handle_action(Action::Delete, Utc::now()).unwrap();
        assert_eq!(app.list_state.selected(), None);
    }

    #[test]
    fn typing_rejects_invalid_keystrokes_with_bell() {
        let (mut app, _dir) = app();
        app.handle_action(Action::ToggleFilters, Utc::now()).unwrap();
        app.handle_action(Action::FocusNext, Utc::now()).unwrap();
        assert_eq!(app.focus, Focus::Field(FilterField::Participants));

        assert_eq!(app.handle_action(Action::Input('2'), Utc::now()).unwrap(), None);
        assert_eq!(
            app.handle_action(Action::Input('x'), Utc::now()).unwrap(),
            Some(Effect::Bell)
        );
        assert_eq!(app.controller.filters().participants, "2");
        app.handle_action(Action::Backspace, Utc::now()).unwrap();
        assert_eq!(app.controller.filters().participants, "");
    }

    #[test]
    fn submit_uses_panel_category() {
        let (mut app, _dir) = app();
        app.handle_action(Action::ToggleFilters, Utc::now()).unwrap();
        app.handle_action(Action::CycleCategory { forward: true }, Utc::now())
            .unwrap();
        let effect = app.handle_action(Action::Submit, Utc::now()).unwrap();
        match effect {
            Some(Effect::Fetch(q)) => assert_eq!(q.activity_type, Some(ActivityType::Education)),
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn open_link_only_when_present() {
        let (mut app, _dir) = app();
        add(&mut app, "No link", None);
        assert_eq!(app.handle_action(Action::OpenLink, Utc::now()).unwrap(), None);
        assert!(app.controller.notice(Utc::now()).is_some());

        add(&mut app, "Linked", Some("https://example.org"));
        assert_eq!(
            app.handle_action(Action::OpenLink, Utc::now()).unwrap(),
            Some(Effect::OpenLink("https://example.org".into()))
        );
    }

    #[test]
    fn focus_cycles_through_all_controls() {
        let mut focus = Focus::Category;
        for _ in 0..=FilterField::ALL.len() {
            focus = focus.step(true);
        }
        assert_eq!(focus, Focus::Category);
        assert_eq!(
            Focus::Category.step(false),
            Focus::Field(FilterField::MaxAccessibility)
        );
    }
}
