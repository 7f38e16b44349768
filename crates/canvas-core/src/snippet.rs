//! Saved snippets and their persisted collection.
//!
//! The whole collection lives under one key as a JSON array and is
//! rewritten in full on every save or delete. Field names are fixed so
//! collections saved by earlier builds keep loading:
//!
//! ```json
//! [{"id":1718000000000,"name":"Bouton","html":"…","css":"…","js":"…","date":"10/06/2024"}]
//! ```
//!
//! Records written by the basic edition have no `react` field; it reads as
//! empty.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::buffer::{FragmentSource, SourceBufferSet};
use crate::error::{CanvasError, Result};
use crate::fragment::FragmentKind;
use crate::storage::{KeyValueStore, SNIPPETS_KEY};

/// Creation-time-derived identifier (epoch milliseconds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(pub i64);

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named, immutable copy of every fragment at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub name: String,
    #[serde(default)]
    pub html: String,
    #[serde(default)]
    pub css: String,
    #[serde(default)]
    pub js: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub react: String,
    /// Display-only creation date.
    #[serde(default)]
    pub date: String,
}

impl Snippet {
    /// Capture the current buffers under `name`.
    ///
    /// The name is trimmed; an empty result is rejected.
    pub fn capture(
        id: SnippetId,
        name: &str,
        buffers: &SourceBufferSet,
        created: DateTime<Local>,
    ) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CanvasError::EmptySnippetName);
        }
        Ok(Self {
            id,
            name: name.to_string(),
            html: buffers.get(FragmentKind::Html).to_string(),
            css: buffers.get(FragmentKind::Css).to_string(),
            js: buffers.get(FragmentKind::Js).to_string(),
            react: buffers.get(FragmentKind::React).to_string(),
            date: format_date(created),
        })
    }
}

impl FragmentSource for Snippet {
    fn fragment(&self, kind: FragmentKind) -> &str {
        match kind {
            FragmentKind::Html => &self.html,
            FragmentKind::Css => &self.css,
            FragmentKind::Js => &self.js,
            FragmentKind::React => &self.react,
        }
    }
}

/// Day/month/year, the way the load listing shows it.
pub fn format_date(date: DateTime<Local>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Every saved snippet, in save order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetCollection {
    snippets: Vec<Snippet>,
}

impl SnippetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the store. A missing key is the empty collection.
    pub fn load(store: &impl KeyValueStore) -> Result<Self> {
        match store.read(SNIPPETS_KEY)? {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw),
            _ => Ok(Self::new()),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let snippets: Vec<Snippet> = serde_json::from_str(raw)?;
        Ok(Self { snippets })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snippets)?)
    }

    /// Rewrite the whole collection under its key.
    pub fn persist(&self, store: &mut impl KeyValueStore) -> Result<()> {
        let json = self.to_json()?;
        store.write(SNIPPETS_KEY, &json)?;
        tracing::debug!(
            target: "canvas::storage",
            count = self.snippets.len(),
            bytes = json.len(),
            "snippets persisted"
        );
        Ok(())
    }

    /// An id for a snippet created at `created_millis`.
    ///
    /// Two saves in the same millisecond would collide, so ids are kept
    /// strictly above the newest stored one.
    pub fn next_id(&self, created_millis: i64) -> SnippetId {
        match self.snippets.iter().map(|s| s.id.0).max() {
            Some(newest) if created_millis <= newest => SnippetId(newest + 1),
            _ => SnippetId(created_millis),
        }
    }

    /// Append a snippet and persist. In memory state is only updated once
    /// the write succeeded.
    pub fn save(&mut self, snippet: Snippet, store: &mut impl KeyValueStore) -> Result<()> {
        self.snippets.push(snippet);
        if let Err(e) = self.persist(store) {
            self.snippets.pop();
            return Err(e);
        }
        Ok(())
    }

    /// Remove every snippet with `id` and persist. Order of the rest is
    /// unchanged. Returns the first removed record.
    ///
    /// Collections written by older builds can hold duplicate ids; all of
    /// them go.
    pub fn delete(&mut self, id: SnippetId, store: &mut impl KeyValueStore) -> Result<Snippet> {
        let removed = self
            .get(id)
            .cloned()
            .ok_or(CanvasError::SnippetNotFound(id))?;
        let previous = self.snippets.clone();
        self.snippets.retain(|s| s.id != id);
        if let Err(e) = self.persist(store) {
            self.snippets = previous;
            return Err(e);
        }
        Ok(removed)
    }

    pub fn get(&self, id: SnippetId) -> Option<&Snippet> {
        self.snippets.iter().find(|s| s.id == id)
    }

    /// Save order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Snippet> {
        self.snippets.iter()
    }

    /// Listing order: most recently saved first.
    pub fn newest_first(&self) -> impl Iterator<Item = &Snippet> {
        self.snippets.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }
}
