//! Class-annotated highlighting for the editor panes.
//!
//! Output is HTML with `cc-` prefixed scope classes; colors come from the
//! stylesheet returned by `theme_css`, so switching theme never re-highlights.

use std::sync::LazyLock;

use syntect::highlighting::ThemeSet;
use syntect::html::{ClassStyle, ClassedHTMLGenerator, css_for_theme_with_class_style};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::error::{CanvasError, Result};
use crate::fragment::FragmentKind;
use crate::theme::Theme;

pub const CSS_PREFIX: &str = "cc-";

const CLASS_STYLE: ClassStyle = ClassStyle::SpacedPrefixed { prefix: CSS_PREFIX };

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Highlight one fragment's source.
pub fn highlight(kind: FragmentKind, source: &str) -> Result<String> {
    let syntax = SYNTAX_SET
        .find_syntax_by_token(kind.syntax_token())
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAX_SET, CLASS_STYLE);
    for line in LinesWithEndings::from(source) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .map_err(|e| CanvasError::Highlight(e.to_string()))?;
    }
    Ok(generator.finalize())
}

/// Stylesheet for the highlight classes under `theme`.
pub fn theme_css(theme: Theme) -> Result<String> {
    let name = match theme {
        Theme::Light => "InspiredGitHub",
        Theme::Dark => "base16-ocean.dark",
    };
    let syntect_theme = THEME_SET
        .themes
        .get(name)
        .ok_or_else(|| CanvasError::Highlight(format!("missing built-in theme {name}")))?;
    css_for_theme_with_class_style(syntect_theme, CLASS_STYLE)
        .map_err(|e| CanvasError::Highlight(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_is_escaped_and_classed() {
        let html = highlight(FragmentKind::Html, "<p class=\"x\">hi</p>\n").unwrap();
        assert!(html.contains("&lt;"));
        assert!(!html.contains("<p class"));
        assert!(html.contains("class=\"cc-"));
    }

    #[test]
    fn test_component_fragments_use_script_grammar() {
        let html = highlight(FragmentKind::React, "const n = 1;\n").unwrap();
        assert!(html.contains("cc-js"));
    }

    #[test]
    fn test_empty_source() {
        assert!(!highlight(FragmentKind::Css, "").unwrap().contains("&lt;"));
    }

    #[test]
    fn test_theme_css_differs_per_theme() {
        let light = theme_css(Theme::Light).unwrap();
        let dark = theme_css(Theme::Dark).unwrap();
        assert!(light.contains(".cc-"));
        assert_ne!(light, dark);
    }
}
