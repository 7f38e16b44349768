//! Fragment composition into one standalone HTML document.
//!
//! The compiler trusts its input completely. Fragments are concatenated
//! verbatim with no escaping, so a style fragment containing `</style>`
//! produces a malformed document. Containment is the job of the sandboxed
//! rendering surface, not of this module.

use smol_str::SmolStr;

use crate::buffer::SourceBufferSet;
use crate::fragment::FragmentKind;

/// External runtimes loaded ahead of component code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeScripts {
    /// UI library runtime.
    pub react: SmolStr,
    /// DOM bindings for the UI library.
    pub react_dom: SmolStr,
    /// Source-to-source transpiler that executes `text/babel` scripts.
    pub transpiler: SmolStr,
}

impl Default for RuntimeScripts {
    fn default() -> Self {
        Self {
            react: "https://unpkg.com/react@18/umd/react.development.js".into(),
            react_dom: "https://unpkg.com/react-dom@18/umd/react-dom.development.js".into(),
            transpiler: "https://unpkg.com/@babel/standalone/babel.min.js".into(),
        }
    }
}

/// Which consumer a document is built for. Only the title differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFlavor {
    /// Handed to the preview frame. Untitled.
    Preview,
    /// Copied to the clipboard.
    Clipboard,
    /// Written to the downloaded file.
    Export,
}

impl DocumentFlavor {
    pub fn title(&self) -> Option<&'static str> {
        match self {
            DocumentFlavor::Preview => None,
            DocumentFlavor::Clipboard => Some("Code Généré"),
            DocumentFlavor::Export => Some("Exportation Canevas de Code"),
        }
    }
}

/// Builds compiled documents from a buffer snapshot.
///
/// Deterministic: the same buffers and flavor always give the same string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewCompiler {
    /// Value of the root `lang` attribute.
    pub lang: SmolStr,
    pub runtimes: RuntimeScripts,
}

impl Default for PreviewCompiler {
    fn default() -> Self {
        Self {
            lang: "fr".into(),
            runtimes: RuntimeScripts::default(),
        }
    }
}

impl PreviewCompiler {
    pub fn new(lang: impl Into<SmolStr>, runtimes: RuntimeScripts) -> Self {
        Self {
            lang: lang.into(),
            runtimes,
        }
    }

    /// Compile the document handed to the preview frame.
    pub fn compile(&self, buffers: &SourceBufferSet) -> String {
        self.compile_with(buffers, DocumentFlavor::Preview)
    }

    /// Compile a document for a specific consumer.
    pub fn compile_with(&self, buffers: &SourceBufferSet, flavor: DocumentFlavor) -> String {
        let markup = buffers.get(FragmentKind::Html);
        let style = buffers.get(FragmentKind::Css);
        let script = buffers.get(FragmentKind::Js);
        // Only present when the variant carries the kind.
        let component = buffers.get(FragmentKind::React);

        let mut out = String::with_capacity(
            512 + markup.len() + style.len() + script.len().max(component.len()),
        );

        out.push_str("<!DOCTYPE html>\n");
        out.push_str("<html lang=\"");
        out.push_str(&self.lang);
        out.push_str("\">\n");
        out.push_str("<head>\n");
        out.push_str("  <meta charset=\"UTF-8\">\n");
        out.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        if let Some(title) = flavor.title() {
            out.push_str("  <title>");
            out.push_str(title);
            out.push_str("</title>\n");
        }
        out.push_str("  <style>");
        out.push_str(style);
        out.push_str("</style>\n");
        out.push_str("</head>\n");
        out.push_str("<body>\n  ");
        out.push_str(markup);
        out.push('\n');

        if component.is_empty() {
            out.push_str("  <script>");
            out.push_str(script);
            out.push_str("</script>\n");
        } else {
            self.push_runtime("  <script crossorigin src=\"", &self.runtimes.react, &mut out);
            self.push_runtime("  <script crossorigin src=\"", &self.runtimes.react_dom, &mut out);
            self.push_runtime("  <script src=\"", &self.runtimes.transpiler, &mut out);
            out.push_str("  <script type=\"text/babel\">");
            out.push_str(component);
            out.push_str("</script>\n");
        }

        out.push_str("</body>\n");
        out.push_str("</html>");
        out
    }

    fn push_runtime(&self, open: &str, src: &str, out: &mut String) {
        out.push_str(open);
        out.push_str(src);
        out.push_str("\"></script>\n");
    }
}

/// Compile the preview document with the default compiler.
pub fn compile(buffers: &SourceBufferSet) -> String {
    PreviewCompiler::default().compile(buffers)
}
