//! Applying the theme to the page.

use canvas_core::Theme;

/// Class set on the document root while the dark theme is active.
pub const DARK_CLASS: &str = "dark";

/// Toggle `DARK_CLASS` on `<html>` to match `theme`.
pub fn apply(theme: Theme) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(root) = window.document().and_then(|d| d.document_element()) else {
        return;
    };
    if let Err(e) = root
        .class_list()
        .toggle_with_force(DARK_CLASS, theme.is_dark())
    {
        tracing::warn!("Failed to apply theme class: {:?}", e);
    }
}
