//! Browser platform layer for the code canvas playground.
//!
//! Implements the `canvas-core` platform traits on top of the DOM. It
//! assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `storage`: `KeyValueStore` over `window.localStorage`
//! - `timer`: `TimerPlatform` over `setTimeout`
//! - `surface`: `RenderSurface` writing `srcdoc` on a sandboxed iframe
//! - `clipboard`, `download`: sinks for action payloads
//! - `theme`: applies the `dark` class to the document root
//!
//! # Re-exports
//!
//! This crate re-exports `canvas-core` for convenience, so consumers
//! only need to depend on `canvas-browser`.

pub use canvas_core;
pub use canvas_core::*;

pub mod clipboard;
pub mod download;
pub mod storage;
pub mod surface;
pub mod theme;
pub mod timer;

pub use storage::LocalStore;
pub use surface::{IframeSurface, SANDBOX};
pub use timer::GlooTimer;
