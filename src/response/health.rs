//! API health summary and optimization hints

use serde::Serialize;

use super::security::missing_headers;
use super::ResponseAnalysis;
use crate::models::ParsedRequest;

const LARGE_RESPONSE_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Good,
    Warning,
    Poor,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Good => "good",
            HealthStatus::Warning => "warning",
            HealthStatus::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: HealthStatus,
    pub message: String,
    pub recommendations: Vec<String>,
}

/// Health of an API judged from one response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiHealth {
    pub performance: HealthCheck,
    pub reliability: HealthCheck,
    pub security: HealthCheck,
    pub best_practices: HealthCheck,
}

impl ApiHealth {
    pub fn checks(&self) -> [(&'static str, &HealthCheck); 4] {
        [
            ("performance", &self.performance),
            ("reliability", &self.reliability),
            ("security", &self.security),
            ("best_practices", &self.best_practices),
        ]
    }
}

pub fn assess_health(response: &ResponseAnalysis) -> ApiHealth {
    ApiHealth {
        performance: performance_check(response),
        reliability: reliability_check(response.status_code),
        security: security_check(response),
        best_practices: best_practices_check(response),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn performance_check(response: &ResponseAnalysis) -> HealthCheck {
    let total = response.metadata.timing.total_time;
    let status = match total.as_f64() {
        t if t < 1000.0 => HealthStatus::Good,
        t if t < 3000.0 => HealthStatus::Warning,
        _ => HealthStatus::Poor,
    };
    let recommendations = if total.as_f64() > 1000.0 {
        strings(&[
            "Consider implementing caching mechanisms",
            "Optimize database queries if applicable",
            "Enable compression for large responses",
        ])
    } else {
        Vec::new()
    };
    HealthCheck {
        status,
        message: format!("Response time is {}", total),
        recommendations,
    }
}

fn reliability_check(status_code: u16) -> HealthCheck {
    let status = match status_code {
        200..=299 => HealthStatus::Good,
        0..=499 => HealthStatus::Warning,
        _ => HealthStatus::Poor,
    };
    let recommendations = if status_code >= 400 {
        strings(&[
            "Implement proper error handling",
            "Add retry mechanisms for failed requests",
            "Include detailed error messages in responses",
        ])
    } else {
        Vec::new()
    };
    HealthCheck {
        status,
        message: format!("Status code: {}", status_code),
        recommendations,
    }
}

fn security_check(response: &ResponseAnalysis) -> HealthCheck {
    let missing = missing_headers(&response.metadata.security_analysis);
    let status = match missing.len() {
        0 => HealthStatus::Good,
        1..=2 => HealthStatus::Warning,
        _ => HealthStatus::Poor,
    };
    HealthCheck {
        status,
        message: format!("Missing {} security headers", missing.len()),
        recommendations: missing
            .iter()
            .map(|name| format!("Add {} header for better security", name))
            .collect(),
    }
}

fn best_practices_check(response: &ResponseAnalysis) -> HealthCheck {
    let mut issues = Vec::new();
    if response.header("content-type").is_none() {
        issues.push("Specify Content-Type header".to_string());
    }
    if response.header("cache-control").is_none() {
        issues.push("Add Cache-Control header for better caching".to_string());
    }
    if response.metadata.size_bytes > LARGE_RESPONSE_BYTES {
        issues.push("Large response size - consider pagination or data filtering".to_string());
    }

    HealthCheck {
        status: if issues.is_empty() { HealthStatus::Good } else { HealthStatus::Warning },
        message: format!("Found {} best practice issues", issues.len()),
        recommendations: issues,
    }
}

/// Suggestions spanning both the request and its response
pub fn optimization_suggestions(request: &ParsedRequest, response: &ResponseAnalysis) -> Vec<String> {
    let mut suggestions = Vec::new();

    if !request.has_header("Accept-Encoding") {
        suggestions.push("Add 'Accept-Encoding' header to enable compression".to_string());
    }
    if !request.has_header("If-None-Match") && response.header("etag").is_some() {
        suggestions.push("Implement ETag-based caching to reduce bandwidth".to_string());
    }
    if response.metadata.redirect_count > 0 {
        suggestions.push("Multiple redirects detected - consider using direct URLs".to_string());
    }
    if response.metadata.timing.request_time.as_f64() > 500.0 {
        suggestions.push("High request time - consider implementing request caching or CDN".to_string());
    }

    suggestions
}
