//! Color theme and pane layout.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::storage::{KeyValueStore, StorageError, THEME_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The literal persisted under `THEME_KEY`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    /// Anything other than `"dark"` (including nothing stored) is light.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn load(store: &impl KeyValueStore) -> Result<Self, StorageError> {
        Ok(Self::from_stored(store.read(THEME_KEY)?.as_deref()))
    }

    pub fn persist(&self, store: &mut impl KeyValueStore) -> Result<(), StorageError> {
        store.write(THEME_KEY, self.as_str())
    }
}

/// Which panes are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Editor and preview side by side.
    #[default]
    Split,
    /// Editor only.
    Code,
    /// Preview only.
    Preview,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Split => "split",
            ViewMode::Code => "code",
            ViewMode::Preview => "preview",
        }
    }

    pub fn shows_editor(&self) -> bool {
        !matches!(self, ViewMode::Preview)
    }

    pub fn shows_preview(&self) -> bool {
        !matches!(self, ViewMode::Code)
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "split" => Ok(ViewMode::Split),
            "code" => Ok(ViewMode::Code),
            "preview" => Ok(ViewMode::Preview),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}
