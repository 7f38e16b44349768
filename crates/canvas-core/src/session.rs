//! Playground session: buffers, compiler, scheduler and persistence together.
//!
//! The session is the single owner of mutable state. Every buffer mutation
//! goes through it so the scheduler always hears about it, and the only
//! render point is `Playground::fire`, called by the platform when a timer
//! hands a ticket back.

use chrono::{DateTime, Local};

use crate::actions::{ActionOutcome, Notice, Payload, PlaygroundAction};
use crate::buffer::SourceBufferSet;
use crate::compile::{DocumentFlavor, PreviewCompiler};
use crate::defaults;
use crate::error::{CanvasError, Result};
use crate::fragment::{FragmentKind, Variant};
use crate::platform::{RenderSurface, TimerPlatform};
use crate::scheduler::{RenderOutcome, RenderScheduler, SchedulerConfig, Ticket};
use crate::snippet::{Snippet, SnippetCollection, SnippetId};
use crate::storage::KeyValueStore;
use crate::theme::{Theme, ViewMode};

/// Name of the downloaded file.
pub const EXPORT_FILE_NAME: &str = "canevas-de-code.html";

/// A downloadable file produced by the export action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub contents: String,
}

pub struct Playground<S: KeyValueStore, T: TimerPlatform> {
    buffers: SourceBufferSet,
    compiler: PreviewCompiler,
    scheduler: RenderScheduler<T>,
    snippets: SnippetCollection,
    store: S,
    theme: Theme,
    view: ViewMode,
    clock: fn() -> DateTime<Local>,
}

impl<S: KeyValueStore, T: TimerPlatform> Playground<S, T> {
    /// Open a session with the variant's starter content and quiet interval.
    pub fn open(variant: Variant, store: S, timer: T) -> Self {
        Self::open_with(variant, store, timer, SchedulerConfig::for_variant(variant))
    }

    /// Open a session with an explicit scheduler configuration.
    ///
    /// Stored theme and snippets are read once here. Unreadable data is
    /// logged and replaced by the empty state. The first preview render is
    /// scheduled immediately.
    pub fn open_with(variant: Variant, store: S, timer: T, config: SchedulerConfig) -> Self {
        let theme = Theme::load(&store).unwrap_or_else(|e| {
            tracing::warn!(target: "canvas::session", error = %e, "could not read theme");
            Theme::default()
        });
        let snippets = SnippetCollection::load(&store).unwrap_or_else(|e| {
            tracing::warn!(target: "canvas::session", error = %e, "could not read snippets");
            SnippetCollection::new()
        });
        tracing::debug!(
            target: "canvas::session",
            ?variant,
            theme = theme.as_str(),
            snippets = snippets.len(),
            "session opened"
        );

        let mut session = Self {
            buffers: defaults::starter(variant),
            compiler: PreviewCompiler::default(),
            scheduler: RenderScheduler::new(timer, config),
            snippets,
            store,
            theme,
            view: ViewMode::default(),
            clock: Local::now,
        };
        session.scheduler.notify_mutation();
        session
    }

    /// Replace the wall clock used for snippet ids and dates.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    pub fn variant(&self) -> Variant {
        self.buffers.variant()
    }

    pub fn buffers(&self) -> &SourceBufferSet {
        &self.buffers
    }

    pub fn snippets(&self) -> &SnippetCollection {
        &self.snippets
    }

    pub fn scheduler(&self) -> &RenderScheduler<T> {
        &self.scheduler
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Compile the current buffers for `flavor` without touching the scheduler.
    pub fn document(&self, flavor: DocumentFlavor) -> String {
        self.compiler.compile_with(&self.buffers, flavor)
    }

    /// Replace one fragment. Returns whether the buffers changed.
    ///
    /// Writing the content a fragment already has is not a mutation and does
    /// not restart the quiet interval.
    pub fn edit(&mut self, kind: FragmentKind, content: impl Into<String>) -> bool {
        let content = content.into();
        if !self.variant().supports(kind) || self.buffers.get(kind) == content {
            return false;
        }
        self.buffers.set(kind, content);
        self.scheduler.notify_mutation();
        true
    }

    /// Central dispatch for every user action.
    pub fn execute(&mut self, action: PlaygroundAction) -> Result<ActionOutcome> {
        tracing::trace!(target: "canvas::session", ?action, "execute");
        match action {
            PlaygroundAction::Edit { kind, content } => {
                Ok(ActionOutcome::mutated(self.edit(kind, content)))
            }
            PlaygroundAction::Focus(kind) => {
                self.buffers.set_active(kind);
                Ok(ActionOutcome::default())
            }
            PlaygroundAction::Reset => Ok(self.reset()),
            PlaygroundAction::Save { name } => self.save(&name),
            PlaygroundAction::Load(id) => self.load(id),
            PlaygroundAction::Delete(id) => self.delete(id),
            PlaygroundAction::Copy => {
                let text = self.document(DocumentFlavor::Clipboard);
                Ok(ActionOutcome::default()
                    .with_payload(Payload::ClipboardText(text))
                    .with_notice(Notice::copied()))
            }
            PlaygroundAction::Export => {
                let file = ExportFile {
                    file_name: EXPORT_FILE_NAME,
                    mime: "text/html",
                    contents: self.document(DocumentFlavor::Export),
                };
                Ok(ActionOutcome::default().with_payload(Payload::Download(file)))
            }
            PlaygroundAction::ToggleTheme => Ok(self.toggle_theme()),
            PlaygroundAction::SetView(view) => {
                self.view = view;
                Ok(ActionOutcome::default())
            }
        }
    }

    /// Handle a fired timer: the only point where a render happens.
    pub fn fire<R: RenderSurface + ?Sized>(&mut self, ticket: Ticket, surface: &R) -> RenderOutcome {
        let Self {
            buffers,
            compiler,
            scheduler,
            ..
        } = self;
        scheduler.fire(ticket, || compiler.compile(&*buffers), surface)
    }

    fn reset(&mut self) -> ActionOutcome {
        let was_empty = self.buffers.is_empty();
        self.buffers.reset_all();
        if !was_empty {
            self.scheduler.notify_mutation();
        }
        ActionOutcome::mutated(!was_empty).with_notice(Notice::reset())
    }

    fn save(&mut self, name: &str) -> Result<ActionOutcome> {
        let now = (self.clock)();
        let id = self.snippets.next_id(now.timestamp_millis());
        let snippet = Snippet::capture(id, name, &self.buffers, now)?;
        let notice = Notice::saved(&snippet.name);
        self.snippets.save(snippet, &mut self.store)?;
        tracing::debug!(target: "canvas::session", %id, "snippet saved");
        Ok(ActionOutcome::default().with_notice(notice))
    }

    fn load(&mut self, id: SnippetId) -> Result<ActionOutcome> {
        let snippet = self
            .snippets
            .get(id)
            .ok_or(CanvasError::SnippetNotFound(id))?;
        let before = self.buffers.clone();
        self.buffers.load_all(snippet);
        let mutated = self.buffers != before;
        if mutated {
            self.scheduler.notify_mutation();
        }
        Ok(ActionOutcome::mutated(mutated).with_notice(Notice::loaded(&snippet.name)))
    }

    fn delete(&mut self, id: SnippetId) -> Result<ActionOutcome> {
        let removed = self.snippets.delete(id, &mut self.store)?;
        tracing::debug!(target: "canvas::session", id = %removed.id, "snippet deleted");
        Ok(ActionOutcome::default().with_notice(Notice::deleted()))
    }

    fn toggle_theme(&mut self) -> ActionOutcome {
        self.theme = self.theme.toggled();
        if let Err(e) = self.theme.persist(&mut self.store) {
            tracing::warn!(target: "canvas::session", error = %e, "could not persist theme");
        }
        ActionOutcome {
            theme: Some(self.theme),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::TimeZone;

    use super::*;
    use crate::actions::NoticeTone;
    use crate::scheduler::SchedulerState;
    use crate::storage::{MemoryStore, SNIPPETS_KEY, THEME_KEY};
    use crate::testing::{ManualTimer, RecordingSurface};

    type TestPlayground = Playground<MemoryStore, ManualTimer>;

    fn fixed_clock() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 10, 9, 30, 0).unwrap()
    }

    fn open(variant: Variant) -> TestPlayground {
        Playground::open(variant, MemoryStore::new(), ManualTimer::new()).with_clock(fixed_clock)
    }

    /// Advance the virtual clock and feed every fired ticket back in.
    fn settle(pg: &mut TestPlayground, ms: u64, surface: &RecordingSurface) -> Vec<RenderOutcome> {
        let fired = pg.scheduler().timer().advance(Duration::from_millis(ms));
        fired.into_iter().map(|t| pg.fire(t, surface)).collect()
    }

    fn edit(pg: &mut TestPlayground, kind: FragmentKind, content: &str) -> bool {
        pg.execute(PlaygroundAction::Edit {
            kind,
            content: content.to_string(),
        })
        .unwrap()
        .mutated
    }

    #[test]
    fn test_open_schedules_first_render_of_starter() {
        let mut pg = open(Variant::Basic);
        let surface = RecordingSurface::new();
        assert!(pg.scheduler().is_pending());
        settle(&mut pg, 300, &surface);
        let docs = surface.documents();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].contains("Bonjour le Monde !"));
    }

    #[test]
    fn test_open_reads_stored_theme_and_snippets() {
        let store = MemoryStore::new()
            .with(THEME_KEY, "dark")
            .with(
                SNIPPETS_KEY,
                r#"[{"id":5,"name":"s","html":"","css":"","js":"","date":""}]"#,
            );
        let pg = Playground::open(Variant::Basic, store, ManualTimer::new());
        assert_eq!(pg.theme(), Theme::Dark);
        assert_eq!(pg.snippets().len(), 1);
    }

    #[test]
    fn test_corrupt_snippets_open_empty() {
        let store = MemoryStore::new().with(SNIPPETS_KEY, "[oops");
        let pg = Playground::open(Variant::Basic, store, ManualTimer::new());
        assert!(pg.snippets().is_empty());
    }

    #[test]
    fn test_typing_burst_renders_latest_state_once() {
        let mut pg = open(Variant::Basic);
        let surface = RecordingSurface::new();
        settle(&mut pg, 300, &surface);

        edit(&mut pg, FragmentKind::Html, "<p>h</p>");
        settle(&mut pg, 100, &surface);
        edit(&mut pg, FragmentKind::Html, "<p>hi</p>");
        settle(&mut pg, 250, &surface);
        edit(&mut pg, FragmentKind::Css, "p{color:red}");
        settle(&mut pg, 299, &surface);
        assert_eq!(surface.documents().len(), 1);

        settle(&mut pg, 1, &surface);
        let docs = surface.documents();
        assert_eq!(docs.len(), 2);
        assert!(docs[1].contains("<p>hi</p>"));
        assert!(docs[1].contains("<style>p{color:red}</style>"));
        assert_eq!(pg.scheduler().state(), SchedulerState::Idle);
    }

    #[test]
    fn test_component_variant_waits_longer() {
        let mut pg = open(Variant::Component);
        let surface = RecordingSurface::new();
        assert!(settle(&mut pg, 300, &surface).is_empty());
        assert_eq!(settle(&mut pg, 200, &surface), vec![RenderOutcome::Rendered]);
        assert!(surface.documents()[0].contains("text/babel"));
    }

    #[test]
    fn test_identical_edit_is_not_a_mutation() {
        let mut pg = open(Variant::Basic);
        let surface = RecordingSurface::new();
        settle(&mut pg, 300, &surface);

        let current = pg.buffers().get(FragmentKind::Js).to_string();
        assert!(!edit(&mut pg, FragmentKind::Js, &current));
        assert!(!pg.scheduler().is_pending());
        assert!(!edit(&mut pg, FragmentKind::React, "<App />"));
    }

    #[test]
    fn test_reset_empties_all_and_notifies() {
        let mut pg = open(Variant::Component);
        let outcome = pg.execute(PlaygroundAction::Reset).unwrap();
        assert!(outcome.mutated);
        assert_eq!(outcome.notice.unwrap().title, "Code Réinitialisé");
        assert!(pg.buffers().iter().all(|(_, text)| text.is_empty()));

        let again = pg.execute(PlaygroundAction::Reset).unwrap();
        assert!(!again.mutated);
    }

    #[test]
    fn test_save_then_load_restores_identical_buffers() {
        let mut pg = open(Variant::Component);
        edit(&mut pg, FragmentKind::Html, "<main>\r\n  ünïcødé\t</main>");
        edit(&mut pg, FragmentKind::Css, "");
        edit(&mut pg, FragmentKind::Js, "let a = `${1}`;");
        edit(&mut pg, FragmentKind::React, "const App = () => <>{'<'}</>;");
        let saved = pg.buffers().clone();

        let outcome = pg
            .execute(PlaygroundAction::Save {
                name: " Mon extrait ".into(),
            })
            .unwrap();
        assert_eq!(
            outcome.notice.unwrap().description.as_deref(),
            Some("\"Mon extrait\" a été sauvegardé.")
        );
        let id = pg.snippets().iter().next().unwrap().id;
        assert_eq!(id, SnippetId(fixed_clock().timestamp_millis()));
        assert_eq!(pg.snippets().get(id).unwrap().date, "10/06/2024");

        pg.execute(PlaygroundAction::Reset).unwrap();
        let outcome = pg.execute(PlaygroundAction::Load(id)).unwrap();
        assert!(outcome.mutated);
        for (kind, text) in saved.iter() {
            assert_eq!(pg.buffers().get(kind), text, "{kind} differs after load");
        }
    }

    #[test]
    fn test_save_with_blank_name_is_rejected() {
        let mut pg = open(Variant::Basic);
        let err = pg
            .execute(PlaygroundAction::Save { name: "  ".into() })
            .unwrap_err();
        assert!(matches!(err, CanvasError::EmptySnippetName));
        assert!(pg.store().get(SNIPPETS_KEY).is_none());
    }

    #[test]
    fn test_saves_in_same_millisecond_get_distinct_ids() {
        let mut pg = open(Variant::Basic);
        for name in ["a", "b", "c"] {
            pg.execute(PlaygroundAction::Save { name: name.into() })
                .unwrap();
        }
        let ids: Vec<_> = pg.snippets().iter().map(|s| s.id.0).collect();
        let base = fixed_clock().timestamp_millis();
        assert_eq!(ids, [base, base + 1, base + 2]);
    }

    #[test]
    fn test_delete_persists_and_keeps_order() {
        let mut pg = open(Variant::Basic);
        for name in ["a", "b", "c"] {
            pg.execute(PlaygroundAction::Save { name: name.into() })
                .unwrap();
        }
        let middle = pg.snippets().iter().nth(1).unwrap().id;
        let outcome = pg.execute(PlaygroundAction::Delete(middle)).unwrap();
        assert_eq!(outcome.notice.unwrap().tone, NoticeTone::Destructive);

        let stored = SnippetCollection::load(pg.store()).unwrap();
        let names: Vec<_> = stored.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }

    #[test]
    fn test_load_unknown_snippet() {
        let mut pg = open(Variant::Basic);
        assert!(matches!(
            pg.execute(PlaygroundAction::Load(SnippetId(42))),
            Err(CanvasError::SnippetNotFound(SnippetId(42)))
        ));
    }

    #[test]
    fn test_copy_and_export_payloads() {
        let mut pg = open(Variant::Basic);
        edit(&mut pg, FragmentKind::Html, "<p>hi</p>");

        let copied = pg.execute(PlaygroundAction::Copy).unwrap();
        match copied.payload {
            Some(Payload::ClipboardText(text)) => {
                assert!(text.contains("<title>Code Généré</title>"));
                assert!(text.contains("<p>hi</p>"));
            }
            other => panic!("expected clipboard payload, got {other:?}"),
        }

        let exported = pg.execute(PlaygroundAction::Export).unwrap();
        match exported.payload {
            Some(Payload::Download(file)) => {
                assert_eq!(file.file_name, "canevas-de-code.html");
                assert_eq!(file.mime, "text/html");
                assert!(file.contents.contains("<title>Exportation Canevas de Code</title>"));
            }
            other => panic!("expected download payload, got {other:?}"),
        }
        // Neither is a buffer mutation.
        assert!(!copied.mutated && !exported.mutated);
    }

    #[test]
    fn test_toggle_theme_persists_literal() {
        let mut pg = open(Variant::Basic);
        let outcome = pg.execute(PlaygroundAction::ToggleTheme).unwrap();
        assert_eq!(outcome.theme, Some(Theme::Dark));
        assert_eq!(pg.store().get(THEME_KEY), Some("dark"));
        pg.execute(PlaygroundAction::ToggleTheme).unwrap();
        assert_eq!(pg.store().get(THEME_KEY), Some("light"));
    }

    #[test]
    fn test_focus_and_view_do_not_schedule() {
        let mut pg = open(Variant::Basic);
        let surface = RecordingSurface::new();
        settle(&mut pg, 300, &surface);

        pg.execute(PlaygroundAction::Focus(FragmentKind::Css))
            .unwrap();
        pg.execute(PlaygroundAction::SetView(ViewMode::Preview))
            .unwrap();
        assert_eq!(pg.buffers().active(), FragmentKind::Css);
        assert_eq!(pg.view(), ViewMode::Preview);
        assert!(!pg.scheduler().is_pending());
    }
}
