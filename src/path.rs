//! Canonical node addresses: `$` for the root, `.name` for object members and
//! `[index]` for array elements, e.g. `$.profile.tags[1]`.
//!
//! Member names are written verbatim. A name containing `.` or `[` produces a
//! path whose lexical ancestors include prefixes that are not real nodes.

pub const ROOT: &str = "$";

/// One step below a container. The container kind picks the syntax, never the
/// lexical shape of the key: an object member named `"0"` is still `.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

pub fn append(parent: &str, segment: Segment<'_>) -> String {
    debug_assert!(parent.starts_with(ROOT), "path must start with `$`: {parent}");
    match segment {
        Segment::Key(key) => format!("{parent}.{key}"),
        Segment::Index(index) => format!("{parent}[{index}]"),
    }
}

/// Every strict prefix of `path` that ends at a segment boundary, shortest
/// first. `$.x.y[2]` yields `$`, `$.x`, `$.x.y`.
pub fn parent_paths(path: &str) -> Vec<String> {
    debug_assert!(path.starts_with(ROOT), "path must start with `$`: {path}");
    path.char_indices()
        .skip(1)
        .filter(|(_, ch)| *ch == '.' || *ch == '[')
        .map(|(i, _)| path[..i].to_string())
        .collect()
}
