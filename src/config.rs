//! Theme selection from the command line, the environment and a
//! preference file.
//!
//! Priority, highest first:
//!
//! 1. an explicit value, usually a `--theme` flag
//! 2. the `TRELLIS_THEME` environment variable
//! 3. `{"theme": "<name>"}` in `$XDG_CONFIG_HOME/trellis/theme.json`
//! 4. `default`
//!
//! The first source that names a theme decides. A name the registry does
//! not know falls back to `default` with a warning.

use crate::error::Result;
use crate::style::{theme, Theme, ThemeRegistry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable consulted after the explicit value.
pub const THEME_ENV: &str = "TRELLIS_THEME";

const APP_DIR: &str = "trellis";
const PREFERENCE_FILE: &str = "theme.json";

#[derive(Debug, Serialize, Deserialize)]
struct Preference {
    theme: String,
}

/// Where the preference file lives: `$XDG_CONFIG_HOME/trellis/theme.json`,
/// else the platform config directory.
pub fn preference_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)?;
    Some(base.join(APP_DIR).join(PREFERENCE_FILE))
}

/// Read the theme name stored at `path`; `Ok(None)` when the file is absent.
pub fn load_preference_from(path: &Path) -> Result<Option<String>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let preference: Preference = serde_json::from_str(&contents)?;
    Ok(Some(preference.theme))
}

/// Store `name` at `path`, creating parent directories.
pub fn save_preference_to(path: &Path, name: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&Preference {
        theme: name.to_string(),
    })?;
    std::fs::write(path, json)?;
    debug!(theme = name, path = %path.display(), "saved theme preference");
    Ok(())
}

/// Store `name` in the default preference file.
pub fn save_preference(name: &str) -> Result<()> {
    let path = preference_path().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "no config directory")
    })?;
    save_preference_to(&path, name)
}

/// Theme sources, in priority order.
#[derive(Debug, Clone, Default)]
pub struct ThemeSelector {
    cli: Option<String>,
    env: Option<String>,
    preference_path: Option<PathBuf>,
}

impl ThemeSelector {
    /// Selector with no sources; resolves to `default`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selector over `cli`, [`THEME_ENV`] and the default preference file.
    pub fn from_env(cli: Option<String>) -> Self {
        Self {
            cli,
            env: std::env::var(THEME_ENV).ok(),
            preference_path: preference_path(),
        }
    }

    /// Set the explicit value.
    #[must_use]
    pub fn cli(mut self, name: impl Into<String>) -> Self {
        self.cli = Some(name.into());
        self
    }

    /// Set the environment value.
    #[must_use]
    pub fn env(mut self, name: impl Into<String>) -> Self {
        self.env = Some(name.into());
        self
    }

    /// Set the preference file to read.
    #[must_use]
    pub fn preference_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preference_path = Some(path.into());
        self
    }

    /// Name of the theme to use, always one `registry` knows.
    pub fn resolve(&self, registry: &ThemeRegistry) -> String {
        let Some((source, name)) = self.requested() else {
            return theme::DEFAULT.to_string();
        };
        if registry.contains(&name) {
            debug!(theme = %name, source, "resolved theme");
            name
        } else {
            warn!(theme = %name, source, "unknown theme, using default");
            theme::DEFAULT.to_string()
        }
    }

    /// Resolve and make the result the active theme of `registry`.
    pub fn apply<'r>(&self, registry: &'r mut ThemeRegistry) -> Result<&'r Theme> {
        let name = self.resolve(registry);
        registry.switch(&name)
    }

    fn requested(&self) -> Option<(&'static str, String)> {
        let named = |value: &Option<String>| value.as_ref().filter(|v| !v.trim().is_empty()).cloned();

        if let Some(name) = named(&self.cli) {
            return Some(("cli", name));
        }
        if let Some(name) = named(&self.env) {
            return Some(("env", name));
        }
        let path = self.preference_path.as_deref()?;
        match load_preference_from(path) {
            Ok(name) => named(&name).map(|name| ("preference", name)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable theme preference");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn registry() -> ThemeRegistry {
        ThemeRegistry::new()
    }

    #[test]
    fn test_nothing_set_resolves_default() {
        assert_eq!(ThemeSelector::new().resolve(&registry()), "default");
    }

    #[test]
    fn test_cli_beats_env_beats_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("theme.json");
        save_preference_to(&path, "dark").unwrap();

        let selector = ThemeSelector::new().preference_path(&path);
        assert_eq!(selector.resolve(&registry()), "dark");

        let selector = selector.env("light");
        assert_eq!(selector.resolve(&registry()), "light");

        let selector = selector.cli("dark");
        assert_eq!(selector.resolve(&registry()), "dark");
    }

    #[test]
    fn test_blank_values_skipped() {
        let selector = ThemeSelector::new().cli("  ").env("light");
        assert_eq!(selector.resolve(&registry()), "light");
    }

    #[test]
    fn test_unknown_name_falls_back() {
        let selector = ThemeSelector::new().cli("solarized").env("light");
        assert_eq!(selector.resolve(&registry()), "default");
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(APP_DIR).join(PREFERENCE_FILE);
        save_preference_to(&path, "light").unwrap();
        assert_eq!(load_preference_from(&path).unwrap(), Some("light".to_string()));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_preference_from(&dir.path().join("absent.json")).unwrap(), None);
    }

    #[test]
    fn test_malformed_file_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("theme.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_preference_from(&path).is_err());

        let selector = ThemeSelector::new().preference_path(&path);
        assert_eq!(selector.resolve(&registry()), "default");
    }

    #[test]
    fn test_apply_switches_registry() {
        let mut registry = registry();
        let theme = ThemeSelector::new().cli("light").apply(&mut registry).unwrap().clone();
        assert_eq!(theme, Theme::light());
        assert_eq!(registry.active_name(), "light");
    }
}
