//! Response analysis
//!
//! Turns a [`RawResponse`] and its processed body into a [`ResponseAnalysis`]:
//! decoded content, size, timings, cookies, security headers and performance.

pub mod decode;
pub mod health;
pub mod performance;
pub mod security;

pub use decode::{decode_content, process_body, Content, ProcessedBody};
pub use health::{assess_health, optimization_suggestions, ApiHealth, HealthCheck, HealthStatus};
pub use performance::{PerformanceMetrics, PERFORMANCE_RULES};
pub use security::analyze_security_headers;

use cookie::Cookie;
use indexmap::IndexMap;
use reqwest::header::{HeaderMap, SET_COOKIE};
use serde::Serialize;
use tracing::debug;

use crate::analysis::{BodyFormat, SecurityHeaderFinding};
use crate::binary::format_size;
use crate::client::{PhaseTimings, RawResponse};
use performance::PerformanceInputs;

/// Everything measured or derived about a response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseMetadata {
    pub encoding: String,
    /// Human readable, e.g. `"1.50 KB"`
    pub size: String,
    pub size_bytes: u64,
    pub binary: bool,
    pub timing: PhaseTimings,
    pub redirect_count: usize,
    pub final_url: String,
    pub cookies: IndexMap<String, String>,
    pub security_analysis: IndexMap<&'static str, SecurityHeaderFinding>,
    pub performance: PerformanceMetrics,
}

/// Analysis of an executed request's response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseAnalysis {
    pub status_code: u16,
    pub reason: String,
    /// Lowercased names; repeated headers are joined with `", "`
    pub headers: IndexMap<String, String>,
    pub content_type: String,
    pub content: Content,
    pub content_format: BodyFormat,
    pub raw: String,
    pub metadata: ResponseMetadata,
}

impl ResponseAnalysis {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }
}

/// Build the response analysis from a processed body and final timings
pub fn analyze_response(raw: &RawResponse, body: ProcessedBody, timings: PhaseTimings) -> ResponseAnalysis {
    let performance = performance::evaluate(&PerformanceInputs::from_response(
        timings,
        &raw.headers,
        body.size_bytes,
    ));

    let metadata = ResponseMetadata {
        encoding: body.encoding,
        size: format_size(body.size_bytes),
        size_bytes: body.size_bytes,
        binary: body.binary,
        timing: timings,
        redirect_count: raw.redirect_count,
        final_url: raw.final_url.clone(),
        cookies: parse_cookies(&raw.headers),
        security_analysis: analyze_security_headers(&raw.headers),
        performance,
    };

    debug!(
        status = raw.status,
        format = ?body.content.format(),
        size = %metadata.size,
        performance = metadata.performance.score,
        "Response analyzed"
    );

    ResponseAnalysis {
        status_code: raw.status,
        reason: raw.reason.clone(),
        headers: flatten_headers(&raw.headers),
        content_type: raw.header("content-type").unwrap_or("").to_lowercase(),
        content_format: body.content.format(),
        content: body.content,
        raw: body.text,
        metadata,
    }
}

/// Collapse a header map into one string per name
pub fn flatten_headers(headers: &HeaderMap) -> IndexMap<String, String> {
    let mut flat: IndexMap<String, String> = IndexMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        flat.entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    flat
}

/// Cookie name to value for every parseable `Set-Cookie` header
pub fn parse_cookies(headers: &HeaderMap) -> IndexMap<String, String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|s| Cookie::parse(s.to_string()).ok())
        .map(|c| (c.name().to_string(), c.value().to_string()))
        .collect()
}
