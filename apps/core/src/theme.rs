//! Light/dark theme preference and the controller that persists it.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::PreferencesError;

/// Storage key of the theme preference.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Only an explicit `"light"` selects the light theme.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Emitted whenever the active theme is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeChanged {
    pub theme: Theme,
}

/// Key-value persistence for the `theme` preference.
pub trait ThemeStore {
    /// Raw stored value, `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<String>, PreferencesError>;
    fn save(&mut self, value: &str) -> Result<(), PreferencesError>;
}

/// Store that keeps the value in memory. Clones share the same slot, so a test
/// can hand one to a controller and inspect it through the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    value: Rc<RefCell<Option<String>>>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: &str) -> Self {
        Self {
            value: Rc::new(RefCell::new(Some(value.to_string()))),
        }
    }

    pub fn value(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<String>, PreferencesError> {
        Ok(self.value())
    }

    fn save(&mut self, value: &str) -> Result<(), PreferencesError> {
        *self.value.borrow_mut() = Some(value.to_string());
        Ok(())
    }
}

/// Owns the active theme. Both the header toggle and the settings switch go
/// through [`ThemeController::apply`].
pub struct ThemeController {
    theme: Theme,
    store: Box<dyn ThemeStore>,
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

impl ThemeController {
    /// Reads the stored preference. An unreadable store falls back to dark.
    pub fn load(store: Box<dyn ThemeStore>) -> Self {
        let stored = match store.load() {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "could not read theme preference");
                None
            }
        };
        let theme = Theme::from_stored(stored.as_deref());
        tracing::debug!(theme = theme.as_str(), "theme loaded");
        Self { theme, store }
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Header control.
    pub fn toggle(&mut self) -> ThemeChanged {
        self.apply(self.theme.toggled())
    }

    /// Settings switch: checked means dark.
    pub fn set_dark(&mut self, checked: bool) -> ThemeChanged {
        self.apply(if checked { Theme::Dark } else { Theme::Light })
    }

    /// Activates `theme` and persists it. A failed save is logged; the switch
    /// still happens.
    pub fn apply(&mut self, theme: Theme) -> ThemeChanged {
        self.theme = theme;
        if let Err(err) = self.store.save(theme.as_str()) {
            tracing::warn!(error = %err, theme = theme.as_str(), "could not save theme preference");
        }
        tracing::info!(theme = theme.as_str(), "theme changed");
        ThemeChanged { theme }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl ThemeStore for BrokenStore {
        fn load(&self) -> Result<Option<String>, PreferencesError> {
            Err(PreferencesError::Unavailable("no storage".into()))
        }

        fn save(&mut self, _value: &str) -> Result<(), PreferencesError> {
            Err(PreferencesError::Unavailable("no storage".into()))
        }
    }

    #[test]
    fn only_light_loads_light() {
        assert_eq!(Theme::from_stored(Some("light")), Theme::Light);
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("Light")), Theme::Dark);
        assert_eq!(Theme::from_stored(None), Theme::Dark);
    }

    #[test]
    fn toggle_persists_and_reports() {
        let store = MemoryThemeStore::with_value("light");
        let mut controller = ThemeController::load(Box::new(store.clone()));
        assert_eq!(controller.theme(), Theme::Light);

        let event = controller.toggle();

        assert_eq!(event, ThemeChanged { theme: Theme::Dark });
        assert_eq!(store.value().as_deref(), Some("dark"));
    }

    #[test]
    fn settings_switch_checked_means_dark() {
        let store = MemoryThemeStore::new();
        let mut controller = ThemeController::load(Box::new(store.clone()));

        assert_eq!(controller.set_dark(false).theme, Theme::Light);
        assert_eq!(store.value().as_deref(), Some("light"));
        assert_eq!(controller.set_dark(true).theme, Theme::Dark);
        assert_eq!(store.value().as_deref(), Some("dark"));
    }

    #[test]
    fn broken_store_does_not_block_switching() {
        let mut controller = ThemeController::load(Box::new(BrokenStore));
        assert_eq!(controller.theme(), Theme::Dark);

        assert_eq!(controller.toggle().theme, Theme::Light);
        assert_eq!(controller.theme(), Theme::Light);
    }
}
