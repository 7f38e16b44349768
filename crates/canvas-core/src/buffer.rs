//! The set of source fragments being edited.
//!
//! A `SourceBufferSet` always holds exactly one fragment per kind in its
//! variant's schema. It is a plain in-memory record: no operation can fail,
//! and observing changes is the caller's job (the session notifies the
//! scheduler whenever a mutation reports `true`).

use crate::fragment::{FragmentKind, Variant};

/// Anything that can supply content for every fragment kind.
///
/// Implemented by `SourceBufferSet` itself and by stored snippets, so a bulk
/// load can come from either.
pub trait FragmentSource {
    /// Content for `kind`. Kinds the source does not carry read as empty.
    fn fragment(&self, kind: FragmentKind) -> &str;
}

/// Current text of each editable fragment plus the focused tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBufferSet {
    variant: Variant,
    /// One entry per kind, in `variant.kinds()` order.
    fragments: Vec<(FragmentKind, String)>,
    active: FragmentKind,
}

impl SourceBufferSet {
    /// Create a buffer set with every fragment empty.
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            fragments: variant
                .kinds()
                .iter()
                .map(|kind| (*kind, String::new()))
                .collect(),
            active: variant.kinds()[0],
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Content of one fragment. Kinds outside the schema read as empty.
    pub fn get(&self, kind: FragmentKind) -> &str {
        self.slot(kind).map(|(_, text)| text.as_str()).unwrap_or("")
    }

    /// Replace the content of one fragment unconditionally.
    ///
    /// Returns `false` only when `kind` is not part of this variant, in which
    /// case nothing changes.
    pub fn set(&mut self, kind: FragmentKind, content: impl Into<String>) -> bool {
        match self.fragments.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, text)) => {
                *text = content.into();
                true
            }
            None => {
                tracing::debug!(%kind, variant = ?self.variant, "ignoring edit outside schema");
                false
            }
        }
    }

    /// Replace every fragment from a snapshot in one step.
    pub fn load_all(&mut self, snapshot: &impl FragmentSource) {
        for (kind, text) in self.fragments.iter_mut() {
            let incoming = snapshot.fragment(*kind);
            text.clear();
            text.push_str(incoming);
        }
    }

    /// Empty every fragment.
    pub fn reset_all(&mut self) {
        for (_, text) in self.fragments.iter_mut() {
            text.clear();
        }
    }

    /// The focused fragment. Has no effect on compilation.
    pub fn active(&self) -> FragmentKind {
        self.active
    }

    /// Focus a fragment. Returns `false` if `kind` is not in the schema.
    pub fn set_active(&mut self, kind: FragmentKind) -> bool {
        if self.variant.supports(kind) {
            self.active = kind;
            true
        } else {
            false
        }
    }

    /// True when every fragment is empty.
    pub fn is_empty(&self) -> bool {
        self.fragments.iter().all(|(_, text)| text.is_empty())
    }

    /// Fragments in tab order.
    pub fn iter(&self) -> impl Iterator<Item = (FragmentKind, &str)> {
        self.fragments.iter().map(|(kind, text)| (*kind, text.as_str()))
    }

    fn slot(&self, kind: FragmentKind) -> Option<&(FragmentKind, String)> {
        self.fragments.iter().find(|(k, _)| *k == kind)
    }
}

impl FragmentSource for SourceBufferSet {
    fn fragment(&self, kind: FragmentKind) -> &str {
        self.get(kind)
    }
}
