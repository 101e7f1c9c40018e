//! Request body analysis
//!
//! Format sniffing is best effort: it looks at the payload itself, not at
//! the declared Content-Type.

use once_cell::sync::Lazy;
use regex::RegexSet;
use serde::Serialize;

use crate::json::is_json;
use crate::xml::is_xml;

/// Bodies above this size get a size warning
pub const LARGE_BODY_BYTES: usize = 1_000_000;

/// Number of characters kept in the preview
pub const PREVIEW_CHARS: usize = 200;

static SENSITIVE_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        // Email
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b",
        // Phone numbers
        r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b",
        // SSN-like
        r"\b\d{3}-?\d{2}-?\d{4}\b",
        r"(?i)\b(password|secret|key|token|auth)\b",
    ])
    .expect("valid sensitive data patterns")
});

/// Sniffed payload format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyFormat {
    Json,
    Xml,
    Raw,
}

impl BodyFormat {
    /// Try JSON first, then XML, else raw
    pub fn sniff(body: &str) -> Self {
        if is_json(body) {
            BodyFormat::Json
        } else if is_xml(body) {
            BodyFormat::Xml
        } else {
            BodyFormat::Raw
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodyAnalysis {
    pub present: bool,
    pub size_bytes: usize,
    pub content_type: BodyFormat,
    pub content_preview: String,
    pub security_analysis: BodySecurity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BodySecurity {
    pub contains_sensitive_data: bool,
    pub size_warning: bool,
    pub recommendations: Vec<String>,
}

/// Analyze a non-empty request body
pub fn analyze_body(body: &str) -> BodyAnalysis {
    let size_bytes = body.len();
    let contains_sensitive_data = contains_sensitive_data(body);
    let size_warning = size_bytes > LARGE_BODY_BYTES;

    let mut recommendations = Vec::new();
    if contains_sensitive_data {
        recommendations.push(
            "Body looks like it carries personal data or credentials; send it only over HTTPS".to_string(),
        );
    }
    if size_warning {
        recommendations.push("Payload exceeds 1 MB; consider compression or chunked uploads".to_string());
    }

    BodyAnalysis {
        present: true,
        size_bytes,
        content_type: BodyFormat::sniff(body),
        content_preview: preview(body),
        security_analysis: BodySecurity {
            contains_sensitive_data,
            size_warning,
            recommendations,
        },
    }
}

/// Check if content contains potentially sensitive information patterns
pub fn contains_sensitive_data(content: &str) -> bool {
    SENSITIVE_PATTERNS.is_match(content)
}

fn preview(body: &str) -> String {
    match body.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
