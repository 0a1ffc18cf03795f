//! Tree-state engine for an interactive JSON viewer.
//!
//! Text goes in through [`ViewState::load_text`]; every user action mutates the
//! session and rebuilds the flat list of [`Row`]s a renderer draws.

mod config;
mod document;
mod error;
mod expansion;
mod format;
mod node;
pub mod path;
mod search;
mod services;
mod state;
mod tree;
mod types;
mod value;

pub use crate::config::ViewerConfig;
pub use crate::document::{DocumentStats, JsonDocument, ParseError};
pub use crate::error::PryError;
pub use crate::expansion::ExpansionSet;
pub use crate::format::{format_bytes, format_count, format_duration_ms, status_line, ErrorView};
pub use crate::node::{copy_node, copy_text, get_node_value, CopyTarget};
pub use crate::search::{find_matches, search, SearchOptions, SearchState};
pub use crate::services::{Clipboard, FocusTarget, MemoryClipboard, SystemClipboard};
pub use crate::state::{AppState, Event, Phase, ViewState, SAMPLE_JSON};
pub use crate::tree::{collect_container_paths, project, truncate, MAX_ARRAY_DISPLAY};
pub use crate::types::{ContainerKind, Row, RowKind};
pub use crate::value::{number_text, JsonValue};
