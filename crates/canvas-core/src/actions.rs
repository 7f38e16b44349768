//! Playground actions and their outcomes.
//!
//! Platform-agnostic definitions of everything a user can do from the
//! toolbar, tabs and dialogs. `Playground::execute` is the dispatch point;
//! the platform layer turns outcomes into toasts, clipboard writes and
//! downloads.

use smol_str::SmolStr;

use crate::fragment::FragmentKind;
use crate::session::ExportFile;
use crate::snippet::SnippetId;
use crate::theme::{Theme, ViewMode};

/// A semantic user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaygroundAction {
    /// Replace one fragment's content (typing in a pane).
    Edit { kind: FragmentKind, content: String },
    /// Switch the focused tab.
    Focus(FragmentKind),
    /// Empty every fragment.
    Reset,
    /// Save the current buffers under a name.
    Save { name: String },
    /// Replace the buffers with a saved snippet.
    Load(SnippetId),
    /// Remove a saved snippet.
    Delete(SnippetId),
    /// Produce the titled document for the clipboard.
    Copy,
    /// Produce the titled document as a downloadable file.
    Export,
    ToggleTheme,
    SetView(ViewMode),
}

/// Severity of an acknowledgement. Purely presentational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoticeTone {
    #[default]
    Info,
    Destructive,
}

/// Informational acknowledgement shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: SmolStr,
    pub description: Option<String>,
    pub tone: NoticeTone,
}

impl Notice {
    pub fn info(title: impl Into<SmolStr>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: Some(description.into()),
            tone: NoticeTone::Info,
        }
    }

    pub fn destructive(title: impl Into<SmolStr>) -> Self {
        Self {
            title: title.into(),
            description: None,
            tone: NoticeTone::Destructive,
        }
    }

    pub(crate) fn reset() -> Self {
        Self::info("Code Réinitialisé", "L'éditeur a été vidé.")
    }

    pub(crate) fn saved(name: &str) -> Self {
        Self::info("Extrait Sauvegardé", format!("\"{name}\" a été sauvegardé."))
    }

    pub(crate) fn loaded(name: &str) -> Self {
        Self::info("Extrait Chargé", format!("\"{name}\" a été chargé."))
    }

    pub(crate) fn deleted() -> Self {
        Self::destructive("Extrait Supprimé")
    }

    pub(crate) fn copied() -> Self {
        Self::info(
            "Code Copié",
            "Le code HTML complet a été copié dans le presse-papiers.",
        )
    }
}

/// Data the platform layer must hand somewhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    ClipboardText(String),
    Download(ExportFile),
}

/// Result of executing one action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionOutcome {
    /// Whether the buffers changed (and a render was scheduled).
    pub mutated: bool,
    pub notice: Option<Notice>,
    pub payload: Option<Payload>,
    /// Set when the action changed the theme.
    pub theme: Option<Theme>,
}

impl ActionOutcome {
    pub(crate) fn mutated(mutated: bool) -> Self {
        Self {
            mutated,
            ..Default::default()
        }
    }

    pub(crate) fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    pub(crate) fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }
}
