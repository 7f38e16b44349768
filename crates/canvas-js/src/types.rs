//! Types exposed to JavaScript via wasm-bindgen.

use canvas_core::{ActionOutcome, Notice, NoticeTone, Snippet};
use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;

/// Toast content for the page to show.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsNotice {
    pub title: String,
    pub description: Option<String>,
    pub destructive: bool,
}

impl From<Notice> for JsNotice {
    fn from(notice: Notice) -> Self {
        Self {
            title: notice.title.to_string(),
            description: notice.description,
            destructive: notice.tone == NoticeTone::Destructive,
        }
    }
}

/// What an action did, minus payloads already handed to the browser.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsOutcome {
    pub mutated: bool,
    pub notice: Option<JsNotice>,
    /// `"light"` or `"dark"` when the theme changed.
    pub theme: Option<String>,
}

impl From<ActionOutcome> for JsOutcome {
    fn from(outcome: ActionOutcome) -> Self {
        Self {
            mutated: outcome.mutated,
            notice: outcome.notice.map(JsNotice::from),
            theme: outcome.theme.map(|t| t.as_str().to_string()),
        }
    }
}

/// One row of the load dialog.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsSnippetEntry {
    /// Epoch milliseconds; safe as a JS number.
    pub id: f64,
    pub name: String,
    pub date: String,
}

impl From<&Snippet> for JsSnippetEntry {
    fn from(snippet: &Snippet) -> Self {
        Self {
            id: snippet.id.0 as f64,
            name: snippet.name.clone(),
            date: snippet.date.clone(),
        }
    }
}
