use std::{path::Path, sync::Arc};

use parking_lot::RwLock;
use serde::Serialize;

use crate::{
    config::ViewerConfig,
    document::{JsonDocument, ParseError},
    error::PryError,
    expansion::ExpansionSet,
    format::{status_line, ErrorView},
    node::{copy_node, CopyTarget},
    search::{search, SearchState},
    services::{Clipboard, FocusTarget},
    tree::project,
    types::Row,
};

/// Built-in document for trying the viewer without a file.
pub const SAMPLE_JSON: &str = r#"{"name":"Test User","age":42,"active":true,"address":null,"scores":[100,85,92],"profile":{"email":"test@example.com","bio":"This is a really long string that should be truncated at some point because it exceeds eighty characters in length for testing purposes","tags":["developer","tester"],"nested":{"deep":{"value":"found it"}}},"empty_array":[],"empty_object":{}}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    About,
    Empty,
    Loaded,
    SearchActive,
    Error,
}

/// Input events from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    LoadText(String),
    LoadSample,
    Toggle(String),
    SetQuery(String),
    SearchNext,
    SearchPrev,
    ClearSearch,
    ExpandAll,
    CollapseAll,
    ResetToAbout,
}

#[derive(Debug, Clone, PartialEq)]
struct LoadFailure {
    error: ParseError,
    raw_text: String,
}

/// The whole viewer session. Every transition ends in [`ViewState::rebuild`],
/// after which [`ViewState::rows`] reflects the new state.
#[derive(Debug, Clone)]
pub struct ViewState {
    config: ViewerConfig,
    document: Option<Arc<JsonDocument>>,
    failure: Option<LoadFailure>,
    expansion: ExpansionSet,
    search: SearchState,
    show_about: bool,
    search_bar_visible: bool,
    rows: Vec<Row>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl ViewState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            document: None,
            failure: None,
            expansion: ExpansionSet::default(),
            search: SearchState::default(),
            show_about: true,
            search_bar_visible: false,
            rows: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.failure.is_some() {
            Phase::Error
        } else if self.document.is_none() {
            if self.show_about {
                Phase::About
            } else {
                Phase::Empty
            }
        } else if self.search.is_active() {
            Phase::SearchActive
        } else {
            Phase::Loaded
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn document(&self) -> Option<&Arc<JsonDocument>> {
        self.document.as_ref()
    }

    pub fn expansion(&self) -> &ExpansionSet {
        &self.expansion
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    pub fn search_bar_visible(&self) -> bool {
        self.search_bar_visible
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn parse_error(&self) -> Option<&ParseError> {
        self.failure.as_ref().map(|f| &f.error)
    }

    /// The input that failed to parse, verbatim.
    pub fn raw_text(&self) -> Option<&str> {
        self.failure.as_ref().map(|f| f.raw_text.as_str())
    }

    pub fn error_view(&self) -> Option<ErrorView> {
        self.failure.as_ref().map(|f| {
            ErrorView::new(&f.error.message, &f.raw_text, self.config.error_preview_chars)
        })
    }

    pub fn status_line(&self) -> Option<String> {
        self.document.as_ref().map(|doc| status_line(&doc.stats()))
    }

    pub fn apply(&mut self, event: Event) -> &[Row] {
        match event {
            Event::LoadText(text) => self.load_text(text),
            Event::LoadSample => self.load_sample(),
            Event::Toggle(path) => self.toggle(&path),
            Event::SetQuery(query) => self.set_query(query),
            Event::SearchNext => self.search_next(),
            Event::SearchPrev => self.search_prev(),
            Event::ClearSearch => self.clear_search(),
            Event::ExpandAll => self.expand_all(),
            Event::CollapseAll => self.collapse_all(),
            Event::ResetToAbout => self.reset_to_about(),
        }
        &self.rows
    }

    /// Parses `text` and replaces the session with it, or with the parse error.
    pub fn load_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        match JsonDocument::parse(&text) {
            Ok(doc) => {
                self.document = Some(Arc::new(doc));
                self.failure = None;
            }
            Err(error) => {
                self.document = None;
                self.failure = Some(LoadFailure {
                    error,
                    raw_text: text,
                });
            }
        }
        self.expansion.reset();
        self.search.clear();
        self.show_about = false;
        self.search_bar_visible = false;
        self.rebuild();
    }

    pub fn load_sample(&mut self) {
        self.load_text(SAMPLE_JSON);
    }

    /// Reads a file as UTF-8 and loads it. Only I/O failures are errors;
    /// malformed JSON lands in [`Phase::Error`].
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), PryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::info!("loading {}", path.display());
        self.load_text(text);
        Ok(())
    }

    /// Loads the clipboard text. An empty clipboard leaves the session alone.
    pub fn paste_from_clipboard(&mut self, clipboard: &mut dyn Clipboard) -> Result<(), PryError> {
        let text = clipboard.read_text()?;
        if !text.is_empty() {
            self.load_text(text);
        }
        Ok(())
    }

    pub fn toggle(&mut self, path: &str) {
        let Some(doc) = &self.document else { return };
        self.expansion.toggle(path, doc.value());
        self.rebuild();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        let matches = match &self.document {
            Some(doc) => search(doc.value(), &query, &self.config.search),
            None => Vec::new(),
        };
        self.search = SearchState::new(query, matches);
        if let Some(first) = self.search.current_match() {
            self.expansion.ensure_ancestors_expanded(first);
        }
        self.rebuild();
    }

    pub fn search_next(&mut self) {
        if let Some(path) = self.search.next() {
            self.expansion.ensure_ancestors_expanded(path);
            self.rebuild();
        }
    }

    pub fn search_prev(&mut self) {
        if let Some(path) = self.search.prev() {
            self.expansion.ensure_ancestors_expanded(path);
            self.rebuild();
        }
    }

    pub fn open_search(&mut self, focus: &mut dyn FocusTarget) {
        self.search_bar_visible = true;
        focus.focus_search_field();
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
        self.search_bar_visible = false;
        self.rebuild();
    }

    pub fn expand_all(&mut self) {
        if self.document.is_none() {
            return;
        }
        self.expansion.expand_all();
        self.rebuild();
    }

    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all();
        self.rebuild();
    }

    pub fn reset_to_about(&mut self) {
        log::info!("back to about view");
        self.document = None;
        self.failure = None;
        self.expansion.reset();
        self.search.clear();
        self.show_about = true;
        self.search_bar_visible = false;
        self.rebuild();
    }

    pub fn copy(&self, path: &str, target: CopyTarget, clipboard: &mut dyn Clipboard) -> Result<(), PryError> {
        let doc = self.document.as_ref().ok_or(PryError::NoDocument)?;
        copy_node(doc, path, target, clipboard)
    }

    /// Recomputes every row from the document, expansion and search state.
    pub fn rebuild(&mut self) {
        self.rows = match &self.document {
            Some(doc) => project(
                doc.value(),
                &self.expansion,
                &self.search,
                self.config.string_preview_chars,
            ),
            None => Vec::new(),
        };
        log::debug!("rebuild: {} rows ({:?})", self.rows.len(), self.phase());
    }
}

/// Shared handle for hosts that deliver events from more than one thread.
/// Events are applied one at a time under the write lock.
pub struct AppState {
    view: RwLock<ViewState>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            view: RwLock::new(ViewState::new(config)),
        }
    }

    /// Applies `event` and returns a snapshot of the rebuilt rows.
    pub fn dispatch(&self, event: Event) -> Vec<Row> {
        self.view.write().apply(event).to_vec()
    }

    pub fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        f(&self.view.read())
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        f(&mut self.view.write())
    }
}
