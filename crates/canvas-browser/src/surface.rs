//! Sandboxed iframe as the preview `RenderSurface`.

use canvas_core::{RenderSurface, SurfaceError};
use wasm_bindgen::JsCast;
use web_sys::HtmlIFrameElement;

/// Sandbox flags of the preview frame: scripts and dialogs only.
pub const SANDBOX: &str = "allow-scripts allow-modals";

/// Preview iframe looked up by element id on every render.
///
/// Looking it up each time means a render before the frame is mounted (or
/// after it is removed) is reported as `Unavailable` rather than kept.
#[derive(Debug, Clone)]
pub struct IframeSurface {
    element_id: String,
}

impl IframeSurface {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    fn frame(&self) -> Option<HtmlIFrameElement> {
        let window = web_sys::window()?;
        let document = window.document()?;
        document
            .get_element_by_id(&self.element_id)?
            .dyn_into::<HtmlIFrameElement>()
            .ok()
    }
}

impl RenderSurface for IframeSurface {
    fn render(&self, document: &str) -> Result<(), SurfaceError> {
        let Some(frame) = self.frame() else {
            return Err(SurfaceError::Unavailable);
        };
        if frame.get_attribute("sandbox").as_deref() != Some(SANDBOX) {
            frame
                .set_attribute("sandbox", SANDBOX)
                .map_err(|e| SurfaceError::Rejected(format!("{e:?}")))?;
        }
        frame.set_srcdoc(document);
        Ok(())
    }
}
