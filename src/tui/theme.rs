use ratatui::style::Color;

use crate::constants::{THEME_DARK, THEME_KEY, THEME_LIGHT};
use crate::store::SharedStore;

/// Color palette for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,
    pub header: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_highlight: Color,
    pub success: Color,
    pub error: Color,
    pub info: Color,
}

impl Theme {
    /// The dark palette
    pub fn dark() -> Self {
        Self {
            name: "Dark",
            background: Color::Rgb(20, 20, 20),
            foreground: Color::Rgb(230, 230, 230),
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            header: Color::Cyan,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            text_highlight: Color::Yellow,
            success: Color::Green,
            error: Color::Red,
            info: Color::Cyan,
        }
    }

    /// The light palette
    pub fn light() -> Self {
        Self {
            name: "Light",
            background: Color::Rgb(250, 250, 250),
            foreground: Color::Rgb(30, 30, 30),
            border: Color::Rgb(200, 200, 200),
            border_focused: Color::Rgb(0, 100, 200),
            header: Color::Rgb(0, 100, 200),
            text_primary: Color::Black,
            text_secondary: Color::Rgb(100, 100, 100),
            text_highlight: Color::Rgb(200, 100, 0),
            success: Color::Rgb(0, 150, 50),
            error: Color::Rgb(200, 0, 0),
            info: Color::Rgb(0, 150, 200),
        }
    }
}

/// The display-mode flag and its write-through persistence.
///
/// The flag, the stored value, and the active palette move together: both
/// side effects of `toggle` complete before it returns, so no render pass
/// ever observes them diverging.
pub struct ThemeState {
    dark_mode: bool,
    store: SharedStore,
}

impl ThemeState {
    /// Read the persisted preference once at startup. A missing or
    /// unreadable value means the default.
    pub fn hydrate(store: SharedStore, default_dark: bool) -> Self {
        let dark_mode = match store.get(THEME_KEY) {
            Some(saved) => saved == THEME_DARK,
            None => default_dark,
        };
        Self { dark_mode, store }
    }

    pub fn is_dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Flip the mode and persist the new value
    pub fn toggle(&mut self) {
        self.dark_mode = !self.dark_mode;
        self.store.set(
            THEME_KEY,
            if self.dark_mode { THEME_DARK } else { THEME_LIGHT },
        );
    }

    /// The palette every render pass uses
    pub fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::dark()
        } else {
            Theme::light()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StateStore};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn test_hydrate_reads_stored_preference() {
        let store = Arc::new(MemoryStore::new());
        store.set(THEME_KEY, THEME_DARK);
        let state = ThemeState::hydrate(store, false);
        assert!(state.is_dark_mode());
        assert_eq!(state.theme().name, "Dark");
    }

    #[test]
    fn test_hydrate_defaults_without_stored_value() {
        let state = ThemeState::hydrate(Arc::new(MemoryStore::new()), false);
        assert!(!state.is_dark_mode());
        assert_eq!(state.theme().name, "Light");
    }

    #[test]
    fn test_toggle_twice_returns_to_original_and_stays_consistent() {
        let store = Arc::new(MemoryStore::new());
        let mut state = ThemeState::hydrate(store.clone(), false);

        state.toggle();
        assert!(state.is_dark_mode());
        assert_eq!(store.get(THEME_KEY), Some(THEME_DARK.to_string()));
        assert_eq!(state.theme().name, "Dark");

        state.toggle();
        assert!(!state.is_dark_mode());
        assert_eq!(store.get(THEME_KEY), Some(THEME_LIGHT.to_string()));
        assert_eq!(state.theme().name, "Light");
    }
}
