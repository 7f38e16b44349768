//! canvas-core: live preview pipeline for the code canvas playground.
//!
//! This crate provides:
//! - `SourceBufferSet` - the editable fragments of one playground variant
//! - `PreviewCompiler` - fragments to a standalone HTML document
//! - `RenderScheduler<T>` - trailing-edge debounce generic over a `TimerPlatform`
//! - `SnippetCollection` - named snapshots persisted through a `KeyValueStore`
//! - `Playground<S, T>` - the session tying all of it together behind `PlaygroundAction`
//!
//! Nothing here touches the DOM. Browser implementations of the platform
//! traits live in `canvas-browser`.

pub mod actions;
pub mod buffer;
pub mod compile;
pub mod defaults;
pub mod error;
pub mod fragment;
#[cfg(feature = "syntax-highlighting")]
pub mod highlight;
pub mod platform;
pub mod scheduler;
pub mod session;
pub mod snippet;
pub mod storage;
#[cfg(test)]
pub(crate) mod testing;
pub mod theme;

pub use actions::{ActionOutcome, Notice, NoticeTone, Payload, PlaygroundAction};
pub use buffer::SourceBufferSet;
pub use compile::{DocumentFlavor, PreviewCompiler, RuntimeScripts, compile};
pub use error::{CanvasError, Result};
pub use fragment::{FragmentKind, Variant};
pub use platform::{RenderSurface, SurfaceError, TimerPlatform};
pub use scheduler::{RenderOutcome, RenderScheduler, SchedulerConfig, SchedulerState, Ticket};
pub use session::{EXPORT_FILE_NAME, ExportFile, Playground};
pub use smol_str::SmolStr;
pub use snippet::{Snippet, SnippetCollection, SnippetId};
pub use storage::{KeyValueStore, MemoryStore, SNIPPETS_KEY, StorageError, THEME_KEY};
#[cfg(not(all(target_family = "wasm", target_os = "unknown")))]
pub use storage::FileStore;
pub use theme::{Theme, ViewMode};
