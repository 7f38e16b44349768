//! WASM bindings for the code canvas playground.
//!
//! Exposes `CanvasApp` to JavaScript: the page owns the editor panes and the
//! preview iframe, the app owns every bit of playground state.

mod app;
mod types;

pub use app::*;
pub use types::*;

use wasm_bindgen::prelude::*;

/// Initialize panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use tracing::Level;
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    let _ = set_global_default(Registry::default().with(wasm_layer));
}
