use activity_journal_core::models::activity::ActivityType;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// UI-level intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Quit,
    SelectNext,
    SelectPrevious,
    ToggleFilters,
    FocusNext,
    FocusPrevious,
    CycleCategory { forward: bool },
    Input(char),
    Backspace,
    Submit,
    FetchAny,
    FetchCategory(ActivityType),
    MoveUp,
    MoveDown,
    Delete,
    OpenLink,
}

/// Decode a key press. While the filter panel is open, printable keys edit
/// the focused field instead of triggering list commands.
pub(crate) fn map_key(key: KeyEvent, filters_open: bool) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if filters_open {
        return match key.code {
            KeyCode::Esc => Some(Action::ToggleFilters),
            KeyCode::Tab | KeyCode::Down => Some(Action::FocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(Action::FocusPrevious),
            KeyCode::Left => Some(Action::CycleCategory { forward: false }),
            KeyCode::Right => Some(Action::CycleCategory { forward: true }),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Char(c) => Some(Action::Input(c)),
            _ => None,
        };
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('a') => Some(Action::FetchAny),
        KeyCode::Char('f') => Some(Action::ToggleFilters),
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c.to_digit(10)? as usize - 1;
            ActivityType::ALL.get(idx).copied().map(Action::FetchCategory)
        }
        KeyCode::Up if shift => Some(Action::MoveUp),
        KeyCode::Down if shift => Some(Action::MoveDown),
        KeyCode::Char('K') => Some(Action::MoveUp),
        KeyCode::Char('J') => Some(Action::MoveDown),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::SelectPrevious),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::Delete),
        KeyCode::Char('o') | KeyCode::Enter => Some(Action::OpenLink),
        _ => None,
    }
}

/// Footer hint for the current mode.
pub(crate) fn help_line(filters_open: bool) -> &'static str {
    if filters_open {
        "Tab/↑↓ field · ←→ category · Enter fetch · Esc close"
    } else {
        "a any · 1-9 category · f filters · j/k select · J/K move · d delete · o link · q quit"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn digits_map_to_categories_in_order() {
        assert_eq!(
            map_key(key(KeyCode::Char('1')), false),
            Some(Action::FetchCategory(ActivityType::Education))
        );
        assert_eq!(
            map_key(key(KeyCode::Char('9')), false),
            Some(Action::FetchCategory(ActivityType::Busywork))
        );
        assert_eq!(map_key(key(KeyCode::Char('0')), false), None);
    }

    #[test]
    fn list_mode_bindings() {
        assert_eq!(map_key(key(KeyCode::Char('a')), false), Some(Action::FetchAny));
        assert_eq!(map_key(key(KeyCode::Char('J')), false), Some(Action::MoveDown));
        assert_eq!(map_key(key(KeyCode::Char('k')), false), Some(Action::SelectPrevious));
        assert_eq!(map_key(key(KeyCode::Delete), false), Some(Action::Delete));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT), false),
            Some(Action::MoveUp)
        );
    }

    #[test]
    fn panel_mode_captures_characters() {
        assert_eq!(map_key(key(KeyCode::Char('q')), true), Some(Action::Input('q')));
        assert_eq!(map_key(key(KeyCode::Char('3')), true), Some(Action::Input('3')));
        assert_eq!(map_key(key(KeyCode::Esc), true), Some(Action::ToggleFilters));
        assert_eq!(map_key(key(KeyCode::Enter), true), Some(Action::Submit));
    }

    #[test]
    fn ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ctrl_c, true), Some(Action::Quit));
        assert_eq!(map_key(ctrl_c, false), Some(Action::Quit));
    }
}
