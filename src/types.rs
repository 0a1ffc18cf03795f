use serde::Serialize;

use crate::value::JsonValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Array,
    Object,
}

impl ContainerKind {
    pub fn open_bracket(self) -> &'static str {
        match self {
            ContainerKind::Array => "[",
            ContainerKind::Object => "{",
        }
    }

    pub fn close_bracket(self) -> &'static str {
        match self {
            ContainerKind::Array => "]",
            ContainerKind::Object => "}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum RowKind {
    Primitive,
    ContainerCollapsed { container: ContainerKind, child_count: usize },
    ContainerOpenBracket { container: ContainerKind, child_count: usize },
    ContainerCloseBracket { container: ContainerKind },
    /// Stands in for array elements past the display cap.
    Ellipsis { remaining: usize },
}

/// One line of the tree view, the only thing the rendering layer consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub path: String,           // node address, e.g. `$.profile.tags[1]`
    pub key: Option<String>,    // member name or index; `None` for the root and structural rows
    pub depth: usize,
    pub kind: RowKind,
    pub value: Option<JsonValue>, // primitives only
    pub preview: String,        // display text: value, badge, bracket or ellipsis label
    pub is_expanded: bool,
    pub is_search_match: bool,
    pub is_current_match: bool,
}
