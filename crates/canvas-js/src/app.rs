//! CanvasApp - the playground session wrapper for JavaScript.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;

use canvas_browser::{GlooTimer, IframeSurface, LocalStore, clipboard, download, theme};
use canvas_core::{
    DocumentFlavor, FragmentKind, Payload, Playground, PlaygroundAction, RenderOutcome,
    SnippetId, Ticket, Variant, ViewMode, highlight,
};

use crate::types::{JsOutcome, JsSnippetEntry};

type Session = Playground<LocalStore, GlooTimer>;

struct Shared {
    session: RefCell<Session>,
    surface: IframeSurface,
    on_render: RefCell<Option<js_sys::Function>>,
}

impl Shared {
    fn fire(&self, ticket: Ticket) {
        let outcome = match self.session.try_borrow_mut() {
            Ok(mut session) => session.fire(ticket, &self.surface),
            Err(_) => {
                tracing::warn!(target: "canvas::session", "session busy, render dropped");
                return;
            }
        };
        if outcome == RenderOutcome::Stale {
            return;
        }
        // Cloned out so the callback may replace itself.
        let callback = self.on_render.borrow().clone();
        if let Some(callback) = callback {
            let rendered = JsValue::from_bool(outcome == RenderOutcome::Rendered);
            if let Err(e) = callback.call1(&JsValue::NULL, &rendered) {
                tracing::warn!("onRender callback failed: {:?}", e);
            }
        }
    }
}

/// The playground instance exposed to JavaScript.
#[wasm_bindgen]
pub struct CanvasApp {
    shared: Rc<Shared>,
}

fn js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn parse_kind(kind: &str) -> Result<FragmentKind, JsError> {
    kind.parse::<FragmentKind>().map_err(js_error)
}

#[wasm_bindgen]
impl CanvasApp {
    /// Open a session rendering into the iframe with id `preview_id`.
    ///
    /// `variant` is `"basic"` (default) or `"component"`.
    #[wasm_bindgen(constructor)]
    pub fn new(preview_id: &str, variant: Option<String>) -> Result<CanvasApp, JsError> {
        let variant: Variant = match variant {
            Some(v) => v.parse::<Variant>().map_err(js_error)?,
            None => Variant::default(),
        };
        let surface = IframeSurface::new(preview_id);

        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
            let weak = weak.clone();
            let timer = GlooTimer::new(move |ticket| {
                if let Some(shared) = weak.upgrade() {
                    shared.fire(ticket);
                }
            });
            Shared {
                session: RefCell::new(Playground::open(variant, LocalStore::new(), timer)),
                surface,
                on_render: RefCell::new(None),
            }
        });

        theme::apply(shared.session.borrow().theme());
        Ok(Self { shared })
    }

    /// Called with `true` after each render, `false` when one was skipped.
    #[wasm_bindgen(js_name = setOnRender)]
    pub fn set_on_render(&self, callback: Option<js_sys::Function>) {
        *self.shared.on_render.borrow_mut() = callback;
    }

    // === Buffers ===

    /// Replace one fragment. Returns whether anything changed.
    pub fn edit(&self, kind: &str, content: String) -> Result<bool, JsError> {
        let kind = parse_kind(kind)?;
        Ok(self.shared.session.borrow_mut().edit(kind, content))
    }

    /// Current content of one fragment.
    pub fn content(&self, kind: &str) -> Result<String, JsError> {
        let kind = parse_kind(kind)?;
        Ok(self.shared.session.borrow().buffers().get(kind).to_string())
    }

    /// Fragment kinds of this session's variant, in tab order.
    pub fn kinds(&self) -> Vec<String> {
        self.shared
            .session
            .borrow()
            .variant()
            .kinds()
            .iter()
            .map(|k| k.as_str().to_string())
            .collect()
    }

    /// Tab caption for a fragment kind.
    pub fn label(&self, kind: &str) -> Result<String, JsError> {
        Ok(parse_kind(kind)?.label().to_string())
    }

    pub fn focus(&self, kind: &str) -> Result<(), JsError> {
        self.run(PlaygroundAction::Focus(parse_kind(kind)?))?;
        Ok(())
    }

    pub fn reset(&self) -> Result<JsOutcome, JsError> {
        self.run(PlaygroundAction::Reset)
    }

    /// The preview document for the current buffers.
    pub fn document(&self) -> String {
        self.shared
            .session
            .borrow()
            .document(DocumentFlavor::Preview)
    }

    // === Snippets ===

    pub fn save(&self, name: String) -> Result<JsOutcome, JsError> {
        self.run(PlaygroundAction::Save { name })
    }

    pub fn load(&self, id: f64) -> Result<JsOutcome, JsError> {
        self.run(PlaygroundAction::Load(SnippetId(id as i64)))
    }

    pub fn delete(&self, id: f64) -> Result<JsOutcome, JsError> {
        self.run(PlaygroundAction::Delete(SnippetId(id as i64)))
    }

    /// Saved snippets, most recent first.
    pub fn snippets(&self) -> Result<JsValue, JsError> {
        let session = self.shared.session.borrow();
        let entries: Vec<JsSnippetEntry> = session
            .snippets()
            .newest_first()
            .map(JsSnippetEntry::from)
            .collect();
        serde_wasm_bindgen::to_value(&entries).map_err(js_error)
    }

    // === Output ===

    /// Copy the full document to the clipboard.
    pub fn copy(&self) -> Result<JsOutcome, JsError> {
        self.run(PlaygroundAction::Copy)
    }

    /// Download the full document as a file.
    pub fn export(&self) -> Result<JsOutcome, JsError> {
        self.run(PlaygroundAction::Export)
    }

    // === Appearance ===

    #[wasm_bindgen(js_name = toggleTheme)]
    pub fn toggle_theme(&self) -> Result<JsOutcome, JsError> {
        self.run(PlaygroundAction::ToggleTheme)
    }

    pub fn theme(&self) -> String {
        self.shared.session.borrow().theme().as_str().to_string()
    }

    #[wasm_bindgen(js_name = setView)]
    pub fn set_view(&self, mode: &str) -> Result<(), JsError> {
        let mode: ViewMode = mode.parse().map_err(|e: String| JsError::new(&e))?;
        self.run(PlaygroundAction::SetView(mode))?;
        Ok(())
    }

    pub fn view(&self) -> String {
        self.shared.session.borrow().view().as_str().to_string()
    }

    #[wasm_bindgen(js_name = showsEditor)]
    pub fn shows_editor(&self) -> bool {
        self.shared.session.borrow().view().shows_editor()
    }

    #[wasm_bindgen(js_name = showsPreview)]
    pub fn shows_preview(&self) -> bool {
        self.shared.session.borrow().view().shows_preview()
    }

    /// Highlighted HTML for one fragment's source.
    pub fn highlight(&self, kind: &str, source: &str) -> Result<String, JsError> {
        highlight::highlight(parse_kind(kind)?, source).map_err(js_error)
    }

    /// Stylesheet for `highlight` output under the current theme.
    #[wasm_bindgen(js_name = themeCss)]
    pub fn theme_css(&self) -> Result<String, JsError> {
        highlight::theme_css(self.shared.session.borrow().theme()).map_err(js_error)
    }
}

impl CanvasApp {
    /// Execute an action and hand its side effects to the browser.
    fn run(&self, action: PlaygroundAction) -> Result<JsOutcome, JsError> {
        let outcome = self
            .shared
            .session
            .borrow_mut()
            .execute(action)
            .map_err(js_error)?;

        match &outcome.payload {
            Some(Payload::ClipboardText(text)) => clipboard::spawn_write_text(text.clone()),
            Some(Payload::Download(file)) => download::download(file)
                .map_err(|e| JsError::new(&format!("Export failed: {e:?}")))?,
            None => {}
        }
        if let Some(theme) = outcome.theme {
            theme::apply(theme);
        }
        Ok(outcome.into())
    }
}
