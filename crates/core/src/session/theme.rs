use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::KeyValueStore;

/// Storage key for the theme preference.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    mode: ThemeMode,
}

impl ThemeState {
    /// A valid stored preference wins over the OS preference.
    pub fn initial(stored: Option<&str>, prefers_dark: bool) -> Self {
        let mode = stored
            .and_then(|s| s.parse().ok())
            .unwrap_or(if prefers_dark {
                ThemeMode::Dark
            } else {
                ThemeMode::Light
            });
        Self { mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flip the mode and persist it under [`THEME_KEY`].
    pub fn toggle(&mut self, store: &dyn KeyValueStore) -> ThemeMode {
        self.mode = self.mode.toggled();
        if let Err(e) = store.set(THEME_KEY, self.mode.as_str()) {
            warn!(error = %e, theme = %self.mode, "Failed to persist theme");
        }
        self.mode
    }
}
