use serde::{Deserialize, Serialize};

use crate::{document::JsonDocument, error::PryError, services::Clipboard, value::JsonValue};

/// What a copy action puts on the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyTarget {
    /// Strings raw, anything else as compact JSON.
    Value,
    Path,
    /// Pretty-printed JSON with two-space indent.
    Subtree,
}

pub fn get_node_value<'a>(doc: &'a JsonDocument, path: &str) -> Result<&'a JsonValue, PryError> {
    doc.value()
        .at_path(path)
        .ok_or_else(|| PryError::InvalidPath(path.to_string()))
}

/// The text a copy action would produce for the node at `path`.
pub fn copy_text(doc: &JsonDocument, path: &str, target: CopyTarget) -> Result<String, PryError> {
    let value = get_node_value(doc, path)?;
    let text = match target {
        CopyTarget::Value => match value {
            JsonValue::String(s) => s.clone(),
            other => serde_json::to_string(other)?,
        },
        CopyTarget::Path => path.to_string(),
        CopyTarget::Subtree => serde_json::to_string_pretty(value)?,
    };
    Ok(text)
}

pub fn copy_node(
    doc: &JsonDocument,
    path: &str,
    target: CopyTarget,
    clipboard: &mut dyn Clipboard,
) -> Result<(), PryError> {
    let text = copy_text(doc, path, target)?;
    clipboard.write_text(&text)?;
    log::debug!("copied {target:?} of {path} ({} bytes)", text.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryClipboard;

    fn doc() -> JsonDocument {
        JsonDocument::parse(r#"{"name":"Test","scores":[100,85.5],"nested":{"ok":true}}"#).unwrap()
    }

    #[test]
    fn value_copies_strings_raw() {
        assert_eq!(copy_text(&doc(), "$.name", CopyTarget::Value).unwrap(), "Test");
        assert_eq!(copy_text(&doc(), "$.scores", CopyTarget::Value).unwrap(), "[100,85.5]");
        assert_eq!(copy_text(&doc(), "$.nested.ok", CopyTarget::Value).unwrap(), "true");
    }

    #[test]
    fn subtree_is_pretty_printed() {
        let text = copy_text(&doc(), "$.nested", CopyTarget::Subtree).unwrap();
        assert_eq!(text, "{\n  \"ok\": true\n}");
    }

    #[test]
    fn path_copies_the_address() {
        assert_eq!(copy_text(&doc(), "$.scores[1]", CopyTarget::Path).unwrap(), "$.scores[1]");
    }

    #[test]
    fn unknown_path_is_an_error() {
        let err = copy_text(&doc(), "$.missing", CopyTarget::Path).unwrap_err();
        assert!(matches!(err, PryError::InvalidPath(p) if p == "$.missing"));
    }

    #[test]
    fn copy_node_writes_the_clipboard() {
        let mut clipboard = MemoryClipboard::default();
        copy_node(&doc(), "$.scores[0]", CopyTarget::Value, &mut clipboard).unwrap();
        assert_eq!(clipboard.contents, "100");
    }
}
