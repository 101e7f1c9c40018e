//! Request header analysis
//!
//! Covers the fixed security-header checklist, the content negotiation
//! headers, and the CORS and caching blocks. Header names are matched
//! case-insensitively; the request keeps them exactly as typed.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::findings::{RiskLevel, SecurityHeaderFinding};
use crate::mime::parse_content_type_header;
use crate::models::request::header_lookup;
use crate::models::HeadersDict;

/// Valid `Referrer-Policy` tokens
pub const REFERRER_POLICY_TOKENS: &[&str] = &[
    "no-referrer",
    "no-referrer-when-downgrade",
    "origin",
    "origin-when-cross-origin",
    "same-origin",
    "strict-origin",
    "strict-origin-when-cross-origin",
    "unsafe-url",
];

static HSTS_MAX_AGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*max-age=\d+").expect("valid HSTS regex")
});

/// One entry of the request security checklist
pub struct ChecklistRule {
    pub name: &'static str,
    pub description: &'static str,
    pub remediation: &'static str,
    pub risk_level: RiskLevel,
    validator: Option<fn(&str) -> bool>,
}

/// The fixed request security checklist, in evaluation order
pub static SECURITY_CHECKLIST: &[ChecklistRule] = &[
    ChecklistRule {
        name: "x-csrf-token",
        description: "Anti-CSRF token sent with state-changing requests",
        remediation: "Send an X-CSRF-Token header issued by the server for state-changing requests",
        risk_level: RiskLevel::High,
        validator: None,
    },
    ChecklistRule {
        name: "x-xss-protection",
        description: "Legacy browser XSS filter control",
        remediation: "Set X-XSS-Protection to '1; mode=block'",
        risk_level: RiskLevel::Low,
        validator: Some(valid_xss_protection),
    },
    ChecklistRule {
        name: "x-content-type-options",
        description: "Prevents MIME type sniffing",
        remediation: "Set X-Content-Type-Options to 'nosniff'",
        risk_level: RiskLevel::Medium,
        validator: Some(valid_content_type_options),
    },
    ChecklistRule {
        name: "strict-transport-security",
        description: "Forces HTTPS connections for future requests",
        remediation: "Set Strict-Transport-Security to 'max-age=31536000; includeSubDomains'",
        risk_level: RiskLevel::High,
        validator: Some(valid_hsts),
    },
    ChecklistRule {
        name: "x-frame-options",
        description: "Protects against clickjacking",
        remediation: "Set X-Frame-Options to 'DENY' or 'SAMEORIGIN'",
        risk_level: RiskLevel::Medium,
        validator: Some(valid_frame_options),
    },
    ChecklistRule {
        name: "permissions-policy",
        description: "Restricts access to browser features",
        remediation: "Declare a Permissions-Policy such as 'geolocation=(), camera=()'",
        risk_level: RiskLevel::Low,
        validator: None,
    },
    ChecklistRule {
        name: "content-security-policy",
        description: "Restricts the sources content may be loaded from",
        remediation: "Define a Content-Security-Policy, starting from \"default-src 'self'\"",
        risk_level: RiskLevel::High,
        validator: Some(valid_csp),
    },
    ChecklistRule {
        name: "referrer-policy",
        description: "Controls how much referrer information is shared",
        remediation: "Set Referrer-Policy to 'strict-origin-when-cross-origin' or stricter",
        risk_level: RiskLevel::Low,
        validator: Some(valid_referrer_policy),
    },
];

fn valid_xss_protection(value: &str) -> bool {
    matches!(value, "1" | "1; mode=block")
}

fn valid_content_type_options(value: &str) -> bool {
    value.to_lowercase() == "nosniff"
}

fn valid_hsts(value: &str) -> bool {
    HSTS_MAX_AGE.is_match(value)
}

fn valid_frame_options(value: &str) -> bool {
    matches!(value.to_uppercase().as_str(), "DENY" | "SAMEORIGIN")
}

fn valid_csp(value: &str) -> bool {
    !value.trim().is_empty()
}

fn valid_referrer_policy(value: &str) -> bool {
    REFERRER_POLICY_TOKENS.contains(&value.to_lowercase().as_str())
}

/// Header analysis section of a request analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderAnalysis {
    pub count: usize,
    pub details: HeadersDict,
    pub security_analysis: HeaderSecurityAnalysis,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderSecurityAnalysis {
    pub content_type: ContentTypeInfo,
    pub accept: AcceptInfo,
    pub accept_encoding: AcceptEncodingInfo,
    pub accept_language: AcceptLanguageInfo,
    pub cors: CorsInfo,
    pub cache: CacheInfo,
    /// Checklist findings keyed by lowercase header name, in checklist order
    pub security_headers: IndexMap<&'static str, SecurityHeaderFinding>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentTypeInfo {
    pub present: bool,
    pub mime_type: Option<String>,
    pub charset: Option<String>,
    pub xss_risk: bool,
    pub injection_risk: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AcceptInfo {
    pub present: bool,
    pub types: Vec<String>,
    pub accepts_any: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AcceptEncodingInfo {
    pub present: bool,
    pub gzip: bool,
    pub br: bool,
    pub deflate: bool,
    pub optimization_score: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AcceptLanguageInfo {
    pub present: bool,
    pub primary: Option<String>,
    pub has_quality_weights: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CorsInfo {
    pub present: bool,
    pub origin: Option<String>,
    pub request_method: Option<String>,
    pub request_headers: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheInfo {
    pub present: bool,
    pub value: Option<String>,
    pub no_store: bool,
    pub private: bool,
}

/// Analyze request headers for security and best practices
pub fn analyze_headers(headers: &HeadersDict) -> HeaderAnalysis {
    let security_analysis = HeaderSecurityAnalysis {
        content_type: analyze_content_type(header_lookup(headers, "content-type")),
        accept: analyze_accept(header_lookup(headers, "accept")),
        accept_encoding: analyze_accept_encoding(header_lookup(headers, "accept-encoding")),
        accept_language: analyze_accept_language(header_lookup(headers, "accept-language")),
        cors: analyze_cors(headers),
        cache: analyze_cache(header_lookup(headers, "cache-control")),
        security_headers: check_security_headers(headers),
    };
    let recommendations = header_recommendations(&security_analysis);

    HeaderAnalysis {
        count: headers.len(),
        details: headers.clone(),
        security_analysis,
        recommendations,
    }
}

/// Evaluate the fixed checklist against the request headers
pub fn check_security_headers(headers: &HeadersDict) -> IndexMap<&'static str, SecurityHeaderFinding> {
    SECURITY_CHECKLIST
        .iter()
        .map(|rule| {
            let value = header_lookup(headers, rule.name);
            let valid = match (value, rule.validator) {
                (Some(v), Some(check)) => Some(check(v)),
                _ => None,
            };
            let finding = SecurityHeaderFinding {
                present: value.is_some(),
                value: None,
                valid,
                description: rule.description,
                remediation: rule.remediation,
                risk_level: rule.risk_level,
            };
            (rule.name, finding)
        })
        .collect()
}

fn analyze_content_type(value: Option<&str>) -> ContentTypeInfo {
    let Some(value) = value else {
        return ContentTypeInfo::default();
    };
    let (mime_type, mut params) = parse_content_type_header(value);
    let xss_risk = matches!(mime_type.as_str(), "text/html" | "application/javascript");
    let injection_risk = mime_type == "application/x-www-form-urlencoded";

    ContentTypeInfo {
        present: true,
        charset: params.remove("charset"),
        mime_type: Some(mime_type),
        xss_risk,
        injection_risk,
    }
}

/// Split a comma-separated header into its items, without parameters
fn list_items(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(|item| item.split(';').next().unwrap_or("").trim().to_string())
        .filter(|item| !item.is_empty())
}

fn analyze_accept(value: Option<&str>) -> AcceptInfo {
    let Some(value) = value else {
        return AcceptInfo::default();
    };
    let types: Vec<String> = list_items(value).collect();
    let accepts_any = types.iter().any(|t| t == "*/*");
    AcceptInfo { present: true, types, accepts_any }
}

fn analyze_accept_encoding(value: Option<&str>) -> AcceptEncodingInfo {
    let Some(value) = value else {
        return AcceptEncodingInfo::default();
    };
    let encodings: Vec<String> = list_items(value).map(|e| e.to_lowercase()).collect();
    let has = |name: &str| encodings.iter().any(|e| e == name);
    let (gzip, br, deflate) = (has("gzip"), has("br"), has("deflate"));
    let count = [gzip, br, deflate].iter().filter(|&&b| b).count() as u8;

    AcceptEncodingInfo {
        present: true,
        gzip,
        br,
        deflate,
        optimization_score: (count * 25).min(100),
    }
}

fn analyze_accept_language(value: Option<&str>) -> AcceptLanguageInfo {
    let Some(value) = value else {
        return AcceptLanguageInfo::default();
    };
    AcceptLanguageInfo {
        present: true,
        primary: list_items(value).next(),
        has_quality_weights: value.contains("q="),
    }
}

fn analyze_cors(headers: &HeadersDict) -> CorsInfo {
    let Some(origin) = header_lookup(headers, "origin") else {
        return CorsInfo::default();
    };
    CorsInfo {
        present: true,
        origin: Some(origin.to_string()),
        request_method: header_lookup(headers, "access-control-request-method").map(String::from),
        request_headers: header_lookup(headers, "access-control-request-headers").map(String::from),
    }
}

fn analyze_cache(value: Option<&str>) -> CacheInfo {
    let Some(value) = value else {
        return CacheInfo::default();
    };
    let lower = value.to_lowercase();
    CacheInfo {
        present: true,
        value: Some(value.to_string()),
        no_store: lower.contains("no-store"),
        private: lower.contains("private"),
    }
}

fn header_recommendations(analysis: &HeaderSecurityAnalysis) -> Vec<String> {
    let mut recommendations = Vec::new();

    for (name, finding) in &analysis.security_headers {
        if finding.valid == Some(false) {
            recommendations.push(format!("Invalid {} value: {}", name, finding.remediation));
        }
    }
    if analysis.content_type.xss_risk {
        recommendations.push("Content-Type allows script execution; make sure the payload is sanitized".to_string());
    }
    if analysis.content_type.injection_risk {
        recommendations.push("Form-encoded payloads are prone to injection; validate fields server-side".to_string());
    }
    if analysis.accept.accepts_any {
        recommendations.push("Replace the */* Accept wildcard with the media types you expect".to_string());
    }
    if !analysis.accept_encoding.present {
        recommendations.push("Add an Accept-Encoding header to enable response compression".to_string());
    }

    recommendations
}
