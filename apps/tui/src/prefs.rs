//! Theme preference persisted as a small TOML file.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use airwatch_core::theme::ThemeStore;
use airwatch_core::PreferencesError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<String>, PreferencesError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let prefs: PrefsFile =
            toml::from_str(&contents).map_err(|e| PreferencesError::Format(e.to_string()))?;
        Ok(prefs.theme)
    }

    fn save(&mut self, value: &str) -> Result<(), PreferencesError> {
        let prefs = PrefsFile {
            theme: Some(value.to_string()),
        };
        let contents =
            toml::to_string(&prefs).map_err(|e| PreferencesError::Format(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, contents)?;
        tracing::debug!(path = %self.path.display(), value, "theme preference saved");
        Ok(())
    }
}
