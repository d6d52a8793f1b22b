//! Logging helpers
//!
//! Mock payloads routinely carry fake credentials (session tokens, api keys),
//! so anything echoed into trace output goes through `sanitize_for_logging`.

use regex::Regex;
use std::sync::OnceLock;

/// Characters kept by `preview` before truncating
pub const PREVIEW_CHARS: usize = 80;

fn redaction_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (r"(?i)(api[\s_-]?key|apikey)\s*[:=]\s*\S+", "$1: [REDACTED]"),
            (r"(?i)(password|passwd|pwd)\s*[:=]\s*\S+", "$1: [REDACTED]"),
            (r"(?i)(token)\s*[:=]\s*\S+", "$1: [REDACTED]"),
            (r"(?i)(secret)\s*[:=]\s*\S+", "$1: [REDACTED]"),
            (
                r"(?i)(authorization|auth)\s*:\s*bearer\s+\S+",
                "$1: Bearer [REDACTED]",
            ),
        ]
        .into_iter()
        .filter_map(|(pattern, replacement)| {
            Regex::new(pattern).ok().map(|re| (re, replacement))
        })
        .collect()
    })
}

/// Replace common secret patterns with redaction markers
///
/// ```rust
/// use toolstate::logging::sanitize_for_logging;
///
/// let sanitized = sanitize_for_logging("token=sess_abc123xyz456");
/// assert!(sanitized.contains("[REDACTED]"));
/// ```
pub fn sanitize_for_logging(input: &str) -> String {
    let mut result = input.to_string();
    for (re, replacement) in redaction_patterns() {
        result = re.replace_all(&result, *replacement).to_string();
    }
    result
}

/// Sanitized, single-line, truncated view of some content
pub fn preview(content: &str) -> String {
    let flat = content.replace('\n', "\\n");
    let sanitized = sanitize_for_logging(&flat);
    if sanitized.chars().count() <= PREVIEW_CHARS {
        sanitized
    } else {
        let truncated: String = sanitized.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", truncated)
    }
}

/// Format bytes in human-readable form
///
/// ```rust
/// use toolstate::logging::format_bytes;
///
/// assert_eq!(format_bytes(500), "500 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// ```
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
