use std::time::Instant;

use serde::Serialize;
use thiserror::Error;

use crate::value::JsonValue;

/// Malformed input. The raw text stays with the caller for display.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub byte_size: usize,
    pub parse_time_ms: f64,
}

/// Size and timing figures shown in the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DocumentStats {
    pub node_count: usize,
    pub byte_size: usize,
    pub parse_time_ms: f64,
}

/// A successfully parsed document. Never mutated; a new load replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonDocument {
    value: JsonValue,
    stats: DocumentStats,
}

impl JsonDocument {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let byte_size = text.len();
        let started = Instant::now();
        match serde_json::from_str::<JsonValue>(text) {
            Ok(value) => {
                let parse_time_ms = elapsed_ms(started);
                let node_count = value.node_count();
                log::info!(
                    "parsed document: {node_count} nodes, {byte_size} bytes in {parse_time_ms:.2}ms"
                );
                Ok(Self {
                    value,
                    stats: DocumentStats {
                        node_count,
                        byte_size,
                        parse_time_ms,
                    },
                })
            }
            Err(e) => {
                let parse_time_ms = elapsed_ms(started);
                log::warn!("parse failed after {parse_time_ms:.2}ms: {e}");
                Err(ParseError {
                    message: e.to_string(),
                    byte_size,
                    parse_time_ms,
                })
            }
        }
    }

    pub fn value(&self) -> &JsonValue {
        &self.value
    }

    pub fn stats(&self) -> DocumentStats {
        self.stats
    }

    pub fn node_count(&self) -> usize {
        self.stats.node_count
    }

    pub fn byte_size(&self) -> usize {
        self.stats.byte_size
    }

    pub fn parse_time_ms(&self) -> f64 {
        self.stats.parse_time_ms
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reports_metrics() {
        let text = r#"{"a":1,"b":[true,null]}"#;
        let doc = JsonDocument::parse(text).unwrap();
        assert_eq!(doc.node_count(), 5);
        assert_eq!(doc.byte_size(), text.len());
        assert!(doc.parse_time_ms() >= 0.0);
    }

    #[test]
    fn parse_error_carries_message_and_size() {
        let err = JsonDocument::parse("not json").unwrap_err();
        assert!(!err.message.is_empty());
        assert_eq!(err.byte_size, 8);
        assert_eq!(err.to_string(), err.message);
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(JsonDocument::parse("[1,2] x").is_err());
        assert!(JsonDocument::parse("").is_err());
    }

    #[test]
    fn scalar_documents_are_valid() {
        let doc = JsonDocument::parse("  \"hi\" ").unwrap();
        assert_eq!(doc.value(), &JsonValue::String("hi".into()));
        assert_eq!(doc.node_count(), 1);
    }
}
