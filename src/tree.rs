use std::collections::HashSet;

use crate::{
    expansion::ExpansionSet,
    path::{self, Segment},
    search::SearchState,
    types::{ContainerKind, Row, RowKind},
    value::{number_text, JsonValue},
};

/// Children shown per expanded array; the rest collapse into one ellipsis row.
pub const MAX_ARRAY_DISPLAY: usize = 100;

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

pub fn primitive_preview(value: &JsonValue, string_limit: usize) -> String {
    match value {
        JsonValue::String(s) => format!("\"{}\"", truncate(s, string_limit)),
        JsonValue::Number(n) => number_text(*n),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Null => "null".into(),
        JsonValue::Array(items) => container_badge(ContainerKind::Array, items.len()),
        JsonValue::Object(members) => container_badge(ContainerKind::Object, members.len()),
    }
}

pub fn container_badge(container: ContainerKind, child_count: usize) -> String {
    match container {
        ContainerKind::Array => format!("[ {child_count} items ]"),
        ContainerKind::Object => format!("{{ {child_count} keys }}"),
    }
}

/// Every container path under `root`, in pre-order.
pub fn collect_container_paths(root: &JsonValue) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths_recursive(root, path::ROOT.to_string(), &mut paths);
    paths
}

fn collect_paths_recursive(value: &JsonValue, current: String, paths: &mut Vec<String>) {
    match value {
        JsonValue::Array(items) => {
            paths.push(current.clone());
            for (index, item) in items.iter().enumerate() {
                collect_paths_recursive(item, path::append(&current, Segment::Index(index)), paths);
            }
        }
        JsonValue::Object(members) => {
            paths.push(current.clone());
            for (key, val) in members {
                collect_paths_recursive(val, path::append(&current, Segment::Key(key)), paths);
            }
        }
        _ => {}
    }
}

/// Flattens `root` into the rows currently visible under `expansion`, flagging
/// search matches from `search`.
pub fn project(
    root: &JsonValue,
    expansion: &ExpansionSet,
    search: &SearchState,
    string_preview_chars: usize,
) -> Vec<Row> {
    let (matches, current): (HashSet<&str>, Option<&str>) = if search.is_active() {
        (
            search.matches().iter().map(String::as_str).collect(),
            search.current_match(),
        )
    } else {
        (HashSet::new(), None)
    };
    let mut projector = Projector {
        expansion,
        matches,
        current,
        string_preview_chars,
        rows: Vec::new(),
    };
    projector.visit(None, root, path::ROOT.to_string(), 0);
    projector.rows
}

struct Projector<'a> {
    expansion: &'a ExpansionSet,
    matches: HashSet<&'a str>,
    current: Option<&'a str>,
    string_preview_chars: usize,
    rows: Vec<Row>,
}

impl Projector<'_> {
    fn visit(&mut self, key: Option<String>, value: &JsonValue, path: String, depth: usize) {
        let (container, child_count) = match value {
            JsonValue::Array(items) => (ContainerKind::Array, items.len()),
            JsonValue::Object(members) => (ContainerKind::Object, members.len()),
            scalar => {
                let preview = primitive_preview(scalar, self.string_preview_chars);
                self.push_node(key, path, depth, RowKind::Primitive, Some(scalar.clone()), preview, false);
                return;
            }
        };

        if !self.expansion.is_expanded(&path) {
            let badge = container_badge(container, child_count);
            let kind = RowKind::ContainerCollapsed { container, child_count };
            self.push_node(key, path, depth, kind, None, badge, false);
            return;
        }

        let kind = RowKind::ContainerOpenBracket { container, child_count };
        let open = container.open_bracket().to_string();
        self.push_node(key, path.clone(), depth, kind, None, open, true);

        match value {
            JsonValue::Array(items) => {
                for (index, item) in items.iter().enumerate().take(MAX_ARRAY_DISPLAY) {
                    let child_path = path::append(&path, Segment::Index(index));
                    self.visit(Some(index.to_string()), item, child_path, depth + 1);
                }
                if items.len() > MAX_ARRAY_DISPLAY {
                    let remaining = items.len() - MAX_ARRAY_DISPLAY;
                    self.push_structural(
                        path.clone(),
                        depth + 1,
                        RowKind::Ellipsis { remaining },
                        format!("... and {remaining} more items"),
                        false,
                    );
                }
            }
            JsonValue::Object(members) => {
                for (k, v) in members {
                    let child_path = path::append(&path, Segment::Key(k));
                    self.visit(Some(k.clone()), v, child_path, depth + 1);
                }
            }
            _ => {}
        }

        let close = container.close_bracket().to_string();
        self.push_structural(path, depth, RowKind::ContainerCloseBracket { container }, close, true);
    }

    #[allow(clippy::too_many_arguments)]
    fn push_node(
        &mut self,
        key: Option<String>,
        path: String,
        depth: usize,
        kind: RowKind,
        value: Option<JsonValue>,
        preview: String,
        is_expanded: bool,
    ) {
        let is_search_match = self.matches.contains(path.as_str());
        let is_current_match = self.current == Some(path.as_str());
        self.rows.push(Row {
            path,
            key,
            depth,
            kind,
            value,
            preview,
            is_expanded,
            is_search_match,
            is_current_match,
        });
    }

    // close brackets and ellipsis rows are not nodes and never highlight
    fn push_structural(&mut self, path: String, depth: usize, kind: RowKind, preview: String, is_expanded: bool) {
        self.rows.push(Row {
            path,
            key: None,
            depth,
            kind,
            value: None,
            preview,
            is_expanded,
            is_search_match: false,
            is_current_match: false,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::find_matches;

    fn doc(text: &str) -> JsonValue {
        serde_json::from_str(text).unwrap()
    }

    fn render(root: &JsonValue, expansion: &ExpansionSet) -> Vec<Row> {
        project(root, expansion, &SearchState::default(), 80)
    }

    fn paths(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn collapsed_root_is_a_single_badge_row() {
        let root = doc(r#"{"a":1,"b":2}"#);
        let rows = render(&root, &ExpansionSet::Explicit(Default::default()));
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].kind,
            RowKind::ContainerCollapsed {
                container: ContainerKind::Object,
                child_count: 2
            }
        );
        assert_eq!(rows[0].preview, "{ 2 keys }");
        assert_eq!(rows[0].key, None);
    }

    #[test]
    fn expanded_containers_get_open_and_close_rows() {
        let root = doc(r#"{"a":1,"b":[true,null]}"#);
        let rows = render(&root, &ExpansionSet::AllExpanded);
        assert_eq!(paths(&rows), vec!["$", "$.a", "$.b", "$.b[0]", "$.b[1]", "$.b", "$"]);
        let depths: Vec<usize> = rows.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 1, 1, 2, 2, 1, 0]);
        assert_eq!(rows[3].key.as_deref(), Some("0"));
        assert_eq!(rows[3].value, Some(JsonValue::Bool(true)));
        assert_eq!(rows[5].preview, "]");
        assert_eq!(rows[6].kind, RowKind::ContainerCloseBracket { container: ContainerKind::Object });
    }

    #[test]
    fn long_arrays_stop_at_the_display_cap() {
        let items: Vec<String> = (0..150).map(|i| i.to_string()).collect();
        let root = doc(&format!("[{}]", items.join(",")));
        let rows = render(&root, &ExpansionSet::default());

        let primitives = rows.iter().filter(|r| r.kind == RowKind::Primitive).count();
        assert_eq!(primitives, 100);
        let ellipsis: Vec<&Row> = rows
            .iter()
            .filter(|r| matches!(r.kind, RowKind::Ellipsis { .. }))
            .collect();
        assert_eq!(ellipsis.len(), 1);
        assert_eq!(ellipsis[0].kind, RowKind::Ellipsis { remaining: 50 });
        assert_eq!(ellipsis[0].preview, "... and 50 more items");
        assert_eq!(rows.len(), 1 + 100 + 1 + 1);
    }

    #[test]
    fn string_previews_are_quoted_and_truncated() {
        let root = doc(r#"{"s":"abcdefghij","n":2.50}"#);
        let rows = project(&root, &ExpansionSet::default(), &SearchState::default(), 5);
        assert_eq!(rows[1].preview, "\"abcd…\"");
        assert_eq!(rows[2].preview, "2.5");
    }

    #[test]
    fn highlights_matches_and_current_match() {
        let root = doc(r#"{"a":"foo","b":{"c":"foo"}}"#);
        let mut search = SearchState::new("foo", find_matches(&root, "foo"));
        search.next();
        let rows = project(&root, &ExpansionSet::AllExpanded, &search, 80);

        let a = rows.iter().find(|r| r.path == "$.a").unwrap();
        assert!(a.is_search_match && !a.is_current_match);
        let c = rows.iter().find(|r| r.path == "$.b.c").unwrap();
        assert!(c.is_search_match && c.is_current_match);
        let b_close = rows
            .iter()
            .find(|r| r.path == "$.b" && matches!(r.kind, RowKind::ContainerCloseBracket { .. }))
            .unwrap();
        assert!(!b_close.is_search_match);
    }

    #[test]
    fn empty_query_suppresses_flags() {
        let root = doc(r#"{"a":"foo"}"#);
        let search = SearchState::new("", vec!["$.a".into()]);
        let rows = project(&root, &ExpansionSet::AllExpanded, &search, 80);
        assert!(rows.iter().all(|r| !r.is_search_match && !r.is_current_match));
    }

    #[test]
    fn node_paths_are_unique() {
        let root = doc(r#"{"a":[1,{"b":[2,3]}],"c":{"d":null,"e":[[]]},"0":[4]}"#);
        let rows = render(&root, &ExpansionSet::AllExpanded);
        let node_paths: Vec<&str> = rows
            .iter()
            .filter(|r| !matches!(r.kind, RowKind::ContainerCloseBracket { .. } | RowKind::Ellipsis { .. }))
            .map(|r| r.path.as_str())
            .collect();
        let unique: HashSet<&str> = node_paths.iter().copied().collect();
        assert_eq!(unique.len(), node_paths.len());
        assert_eq!(node_paths.len(), root.node_count());
    }

    #[test]
    fn collects_container_paths_in_pre_order() {
        let root = doc(r#"{"a":[1,{"b":{}}],"c":"x"}"#);
        assert_eq!(collect_container_paths(&root), vec!["$", "$.a", "$.a[1]", "$.a[1].b"]);
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("héllo", 5), "héllo");
        assert_eq!(truncate("héllo wörld", 4), "hél…");
    }
}
