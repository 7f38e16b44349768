//! Fragment kinds and the playground variants that group them.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// One editable unit of source text.
///
/// The serialized names match the field names of stored snippet records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentKind {
    /// Markup, embedded in the document body.
    Html,
    /// Styles, embedded in a `<style>` block in the head.
    Css,
    /// Plain script, embedded in a `<script>` block in the body.
    Js,
    /// Component code (JSX), transpiled client-side before execution.
    React,
}

impl FragmentKind {
    pub const ALL: [FragmentKind; 4] = [
        FragmentKind::Html,
        FragmentKind::Css,
        FragmentKind::Js,
        FragmentKind::React,
    ];

    /// Storage and tab identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            FragmentKind::Html => "html",
            FragmentKind::Css => "css",
            FragmentKind::Js => "js",
            FragmentKind::React => "react",
        }
    }

    /// Label shown on the editor tab.
    pub fn label(&self) -> &'static str {
        match self {
            FragmentKind::Html => "HTML",
            FragmentKind::Css => "CSS",
            FragmentKind::Js => "JS",
            FragmentKind::React => "React",
        }
    }

    /// Token used to look up a syntax definition for highlighting.
    pub fn syntax_token(&self) -> &'static str {
        match self {
            FragmentKind::Html => "html",
            FragmentKind::Css => "css",
            // No JSX grammar in the default set.
            FragmentKind::Js | FragmentKind::React => "js",
        }
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fragment kind: {0}")]
pub struct UnknownFragmentKind(pub String);

impl FromStr for FragmentKind {
    type Err = UnknownFragmentKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html" => Ok(FragmentKind::Html),
            "css" => Ok(FragmentKind::Css),
            "js" => Ok(FragmentKind::Js),
            "react" | "jsx" => Ok(FragmentKind::React),
            other => Err(UnknownFragmentKind(other.to_string())),
        }
    }
}

/// Which edition of the playground is running.
///
/// The variant fixes the fragment schema and the debounce quiet interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// HTML, CSS and JS.
    #[default]
    Basic,
    /// HTML, CSS, JS and React component code.
    Component,
}

const BASIC_KINDS: &[FragmentKind] = &[FragmentKind::Html, FragmentKind::Css, FragmentKind::Js];

impl Variant {
    /// Fragment kinds in tab order.
    pub fn kinds(&self) -> &'static [FragmentKind] {
        match self {
            Variant::Basic => BASIC_KINDS,
            Variant::Component => &FragmentKind::ALL,
        }
    }

    pub fn supports(&self, kind: FragmentKind) -> bool {
        self.kinds().contains(&kind)
    }

    /// Delay after the last edit before the preview is rebuilt.
    ///
    /// The component variant waits longer since every render reloads and
    /// runs the transpiler in the preview frame.
    pub fn quiet_interval(&self) -> Duration {
        match self {
            Variant::Basic => Duration::from_millis(300),
            Variant::Component => Duration::from_millis(500),
        }
    }
}

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Variant::Basic),
            "component" | "react" => Ok(Variant::Component),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown playground variant: {0}")]
pub struct UnknownVariant(pub String);
