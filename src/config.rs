//! Process configuration, loaded from `~/.pureheart/config.toml`.
//!
//! Everything is optional; a missing file means defaults. This is ambient
//! configuration for the process, distinct from the user settings that
//! live inside the state blob.

use std::path::PathBuf;
use std::time::Duration;
use std::{fs, io};

use serde::Deserialize;

use crate::host::DEFAULT_DEBOUNCE;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Where the state blob lives. Defaults to `~/.pureheart`.
    data_dir: Option<PathBuf>,

    /// Quiet period before a state revision is persisted, in milliseconds.
    debounce_ms: Option<u64>,
}

impl Config {
    /// Load config from `~/.pureheart/config.toml`. A missing file yields
    /// the defaults; an unreadable or invalid file is an error — silently
    /// ignoring a config the user wrote would be worse than stopping.
    pub fn load() -> Result<Self, String> {
        let Some(home) = dirs::home_dir() else {
            return Ok(Self::default());
        };
        let path = home.join(".pureheart").join("config.toml");

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        Self::from_toml(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    #[must_use]
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone()
    }

    #[must_use]
    pub fn debounce(&self) -> Duration {
        self.debounce_ms.map_or(DEFAULT_DEBOUNCE, Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert!(config.data_dir().is_none());
        assert_eq!(config.debounce(), DEFAULT_DEBOUNCE);
    }

    #[test]
    fn overrides_are_honored() {
        let config = Config::from_toml(
            "data-dir = \"/tmp/pureheart-test\"\ndebounce-ms = 50\n",
        )
        .unwrap();

        assert_eq!(config.data_dir(), Some(PathBuf::from("/tmp/pureheart-test")));
        assert_eq!(config.debounce(), Duration::from_millis(50));
    }

    #[test]
    fn unknown_keys_are_ignored_but_bad_types_are_not() {
        assert!(Config::from_toml("something-else = 1\n").is_ok());
        assert!(Config::from_toml("debounce-ms = \"soon\"\n").is_err());
    }
}
