use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::{
    path::{self, Segment},
    value::{number_text, JsonValue},
};

/// Matching knobs. The default is a case-insensitive substring match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub regex: bool,
}

struct Matcher {
    needle: String,
    re: Option<Regex>,
    case_sensitive: bool,
    whole_word: bool,
}

impl Matcher {
    fn new(query: &str, options: &SearchOptions) -> Self {
        // an invalid pattern degrades to a plain substring search
        let re = if options.regex {
            RegexBuilder::new(query)
                .case_insensitive(!options.case_sensitive)
                .build()
                .map_err(|e| log::debug!("regex rejected, using substring match: {e}"))
                .ok()
        } else {
            None
        };
        let needle = if options.case_sensitive {
            query.to_string()
        } else {
            query.to_lowercase()
        };
        Self {
            needle,
            re,
            case_sensitive: options.case_sensitive,
            whole_word: options.whole_word,
        }
    }

    fn is_match(&self, text: &str) -> bool {
        if let Some(re) = &self.re {
            return re.is_match(text);
        }
        let lowered;
        let hay = if self.case_sensitive {
            text
        } else {
            lowered = text.to_lowercase();
            &lowered
        };
        if self.whole_word {
            hay.split(|c: char| !c.is_alphanumeric())
                .any(|word| word == self.needle)
        } else {
            hay.contains(&self.needle)
        }
    }
}

/// Case-insensitive substring search with default options.
pub fn find_matches(root: &JsonValue, query: &str) -> Vec<String> {
    search(root, query, &SearchOptions::default())
}

/// Paths of every node matching `query`, in depth-first pre-order.
///
/// Scalars match on their text. A member name or array index that matches
/// records the child's path and the child is not searched further.
pub fn search(root: &JsonValue, query: &str, options: &SearchOptions) -> Vec<String> {
    if query.is_empty() {
        return Vec::new();
    }
    let matcher = Matcher::new(query, options);
    let mut results = Vec::new();
    search_recursive(root, path::ROOT, &matcher, &mut results);
    log::debug!("search {query:?}: {} matches", results.len());
    results
}

fn search_recursive(value: &JsonValue, current_path: &str, matcher: &Matcher, results: &mut Vec<String>) {
    match value {
        JsonValue::Null => {
            if matcher.is_match("null") {
                results.push(current_path.to_string());
            }
        }
        JsonValue::Bool(b) => {
            if matcher.is_match(if *b { "true" } else { "false" }) {
                results.push(current_path.to_string());
            }
        }
        JsonValue::Number(n) => {
            if matcher.is_match(&number_text(*n)) {
                results.push(current_path.to_string());
            }
        }
        JsonValue::String(s) => {
            if matcher.is_match(s) {
                results.push(current_path.to_string());
            }
        }
        JsonValue::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                let child_path = path::append(current_path, Segment::Index(index));
                if matcher.is_match(&index.to_string()) {
                    results.push(child_path);
                } else {
                    search_recursive(item, &child_path, matcher, results);
                }
            }
        }
        JsonValue::Object(members) => {
            for (key, val) in members {
                let child_path = path::append(current_path, Segment::Key(key));
                if matcher.is_match(key) {
                    results.push(child_path);
                } else {
                    search_recursive(val, &child_path, matcher, results);
                }
            }
        }
    }
}

/// The active query, its matches and the cursor over them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchState {
    query: String,
    matches: Vec<String>,
    current_index: usize,
}

impl SearchState {
    pub fn new(query: impl Into<String>, matches: Vec<String>) -> Self {
        Self {
            query: query.into(),
            matches,
            current_index: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[String] {
        &self.matches
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Highlighting applies only while a query is typed.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn current_match(&self) -> Option<&str> {
        self.matches.get(self.current_index).map(String::as_str)
    }

    /// Moves to the next match, wrapping at the end.
    pub fn next(&mut self) -> Option<&str> {
        if self.matches.is_empty() {
            return None;
        }
        self.current_index = (self.current_index + 1) % self.matches.len();
        self.current_match()
    }

    /// Moves to the previous match, wrapping at the start.
    pub fn prev(&mut self) -> Option<&str> {
        if self.matches.is_empty() {
            return None;
        }
        self.current_index = match self.current_index {
            0 => self.matches.len() - 1,
            i => i - 1,
        };
        self.current_match()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(text: &str) -> JsonValue {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn empty_query_matches_nothing() {
        assert!(find_matches(&doc(r#"{"a":"b"}"#), "").is_empty());
    }

    #[test]
    fn finds_nested_string_values() {
        let root = doc(r#"{"x":{"y":{"z":"needle"}}}"#);
        assert_eq!(find_matches(&root, "needle"), vec!["$.x.y.z"]);
        assert_eq!(find_matches(&root, "NEEDLE"), vec!["$.x.y.z"]);
    }

    #[test]
    fn matches_scalars_by_their_text() {
        let root = doc(r#"{"n":12.0,"t":true,"f":false,"z":null,"e":1e21}"#);
        assert_eq!(find_matches(&root, "12"), vec!["$.n"]);
        assert!(find_matches(&root, "12.0").is_empty());
        assert_eq!(find_matches(&root, "TRUE"), vec!["$.t"]);
        assert_eq!(find_matches(&root, "fal"), vec!["$.f"]);
        assert_eq!(find_matches(&root, "null"), vec!["$.z"]);
        assert_eq!(find_matches(&root, "e+21"), vec!["$.e"]);
    }

    #[test]
    fn key_match_records_child_and_stops_descending() {
        let root = doc(r#"{"name":{"name":"name"},"other":"name"}"#);
        assert_eq!(find_matches(&root, "name"), vec!["$.name", "$.other"]);
    }

    #[test]
    fn array_index_match_records_element() {
        let root = doc(r#"["a","b",["c"]]"#);
        assert_eq!(find_matches(&root, "1"), vec!["$[1]"]);
        // index 0 of the inner array matches before its value is looked at
        assert_eq!(find_matches(&root, "0"), vec!["$[0]", "$[2][0]"]);
    }

    #[test]
    fn scalar_root_can_match() {
        assert_eq!(find_matches(&doc("\"hello\""), "ell"), vec!["$"]);
    }

    #[test]
    fn results_follow_document_order_and_are_stable() {
        let root = doc(r#"{"b":"foo","a":["foo",{"c":"foo"}],"d":"food"}"#);
        let first = find_matches(&root, "foo");
        assert_eq!(first, vec!["$.b", "$.a[0]", "$.a[1].c", "$.d"]);
        assert_eq!(find_matches(&root, "foo"), first);
    }

    #[test]
    fn options_change_matching() {
        let root = doc(r#"{"k":"Foo bar","j":"foobar"}"#);
        let case = SearchOptions {
            case_sensitive: true,
            ..Default::default()
        };
        assert_eq!(search(&root, "Foo", &case), vec!["$.k"]);

        let word = SearchOptions {
            whole_word: true,
            ..Default::default()
        };
        assert_eq!(search(&root, "bar", &word), vec!["$.k"]);

        let re = SearchOptions {
            regex: true,
            ..Default::default()
        };
        assert_eq!(search(&root, "^foo", &re), vec!["$.k", "$.j"]);
        // unbalanced pattern falls back to substring
        assert!(search(&root, "foo(", &re).is_empty());
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut state = SearchState::new("q", vec!["$.a".into(), "$.b".into(), "$.c".into()]);
        assert_eq!(state.current_match(), Some("$.a"));
        assert_eq!(state.prev(), Some("$.c"));
        assert_eq!(state.next(), Some("$.a"));
        for _ in 0..3 {
            state.next();
        }
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn navigation_without_matches_is_a_no_op() {
        let mut state = SearchState::new("q", Vec::new());
        assert_eq!(state.next(), None);
        assert_eq!(state.prev(), None);
        assert_eq!(state.current_index(), 0);
        assert!(state.is_active());
    }
}
