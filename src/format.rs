use serde::Serialize;

use crate::document::DocumentStats;

/// `1234567` -> `1,234,567`.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Bytes below 1 KiB verbatim, otherwise KB or MB floored to one decimal.
pub fn format_bytes(n: usize) -> String {
    const KIB: usize = 1024;
    if n < KIB {
        return format!("{n} B");
    }
    let (tenths, unit) = if n < KIB * KIB {
        (n * 10 / KIB, "KB")
    } else {
        (n * 10 / (KIB * KIB), "MB")
    };
    if tenths % 10 == 0 {
        format!("{} {unit}", tenths / 10)
    } else {
        format!("{}.{} {unit}", tenths / 10, tenths % 10)
    }
}

pub fn format_duration_ms(ms: f64) -> String {
    if ms < 1.0 {
        "<1ms".to_string()
    } else if ms < 1000.0 {
        format!("{}ms", ms.floor() as u64)
    } else {
        let tenths = (ms / 100.0).floor() as u64;
        if tenths % 10 == 0 {
            format!("{}s", tenths / 10)
        } else {
            format!("{}.{}s", tenths / 10, tenths % 10)
        }
    }
}

pub fn status_line(stats: &DocumentStats) -> String {
    format!(
        "{} nodes  ·  {}  ·  parsed in {}",
        format_count(stats.node_count),
        format_bytes(stats.byte_size),
        format_duration_ms(stats.parse_time_ms)
    )
}

/// What the error panel shows after a failed load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorView {
    pub message: String,
    pub preview: String,
}

impl ErrorView {
    pub fn new(message: &str, raw_text: &str, preview_chars: usize) -> Self {
        let preview = if raw_text.chars().count() > preview_chars {
            let head: String = raw_text.chars().take(preview_chars).collect();
            format!("{head}...")
        } else {
            raw_text.to_string()
        };
        Self {
            message: message.to_string(),
            preview,
        }
    }
}
