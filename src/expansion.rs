use std::collections::BTreeSet;

use crate::{path, tree::collect_container_paths, value::JsonValue};

/// Which container nodes are shown expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpansionSet {
    /// Every container, including ones that do not exist yet in the set.
    AllExpanded,
    Explicit(BTreeSet<String>),
}

impl Default for ExpansionSet {
    fn default() -> Self {
        Self::Explicit(BTreeSet::from([path::ROOT.to_string()]))
    }
}

impl ExpansionSet {
    pub fn is_expanded(&self, path: &str) -> bool {
        match self {
            Self::AllExpanded => true,
            Self::Explicit(paths) => paths.contains(path),
        }
    }

    /// Flips `path`. Paths that do not name a container in `root` are ignored.
    ///
    /// Under [`ExpansionSet::AllExpanded`] the set is first materialized from
    /// `root`, so collapsing one node leaves every other container open.
    pub fn toggle(&mut self, path: &str, root: &JsonValue) {
        if !root.at_path(path).is_some_and(JsonValue::is_container) {
            log::debug!("toggle ignored for non-container path {path}");
            return;
        }
        if matches!(self, Self::AllExpanded) {
            *self = Self::Explicit(collect_container_paths(root).into_iter().collect());
        }
        if let Self::Explicit(paths) = self {
            if !paths.remove(path) {
                paths.insert(path.to_string());
            }
        }
    }

    pub fn expand_all(&mut self) {
        *self = Self::AllExpanded;
    }

    /// Back to just the root, so the root row stays open.
    pub fn collapse_all(&mut self) {
        self.reset();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Opens every ancestor of `path` so the node itself becomes visible.
    pub fn ensure_ancestors_expanded(&mut self, path: &str) {
        if let Self::Explicit(paths) = self {
            paths.extend(path::parent_paths(path));
        }
    }

    /// The explicit member paths, `None` under [`ExpansionSet::AllExpanded`].
    pub fn explicit_paths(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::AllExpanded => None,
            Self::Explicit(paths) => Some(paths),
        }
    }
}
