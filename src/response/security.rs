//! Response security headers
//!
//! Presence and raw value only. Unlike the request checklist, values are not
//! validated.

use indexmap::IndexMap;
use reqwest::header::HeaderMap;

use crate::analysis::{RiskLevel, SecurityHeaderFinding};

struct ResponseHeaderRule {
    name: &'static str,
    description: &'static str,
    remediation: &'static str,
    risk_level: RiskLevel,
}

const RESPONSE_SECURITY_HEADERS: &[ResponseHeaderRule] = &[
    ResponseHeaderRule {
        name: "Content-Security-Policy",
        description: "Helps prevent XSS attacks",
        remediation: "Define a Content-Security-Policy restricting script and resource origins",
        risk_level: RiskLevel::High,
    },
    ResponseHeaderRule {
        name: "X-Content-Type-Options",
        description: "Prevents MIME type sniffing",
        remediation: "Set X-Content-Type-Options to 'nosniff'",
        risk_level: RiskLevel::Medium,
    },
    ResponseHeaderRule {
        name: "X-Frame-Options",
        description: "Prevents clickjacking attacks",
        remediation: "Set X-Frame-Options to 'DENY' or 'SAMEORIGIN'",
        risk_level: RiskLevel::Medium,
    },
    ResponseHeaderRule {
        name: "Strict-Transport-Security",
        description: "Enforces HTTPS connections",
        remediation: "Set Strict-Transport-Security with a long max-age",
        risk_level: RiskLevel::High,
    },
    ResponseHeaderRule {
        name: "X-XSS-Protection",
        description: "Provides XSS filtering",
        remediation: "Set X-XSS-Protection to '1; mode=block'",
        risk_level: RiskLevel::Low,
    },
];

/// Check the fixed set of response security headers
pub fn analyze_security_headers(headers: &HeaderMap) -> IndexMap<&'static str, SecurityHeaderFinding> {
    RESPONSE_SECURITY_HEADERS
        .iter()
        .map(|rule| {
            let value = headers
                .get(rule.name)
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());
            let finding = SecurityHeaderFinding {
                present: value.is_some(),
                value,
                valid: None,
                description: rule.description,
                remediation: rule.remediation,
                risk_level: rule.risk_level,
            };
            (rule.name, finding)
        })
        .collect()
}

/// Names of the response security headers that are absent
pub fn missing_headers(findings: &IndexMap<&'static str, SecurityHeaderFinding>) -> Vec<&'static str> {
    findings
        .iter()
        .filter(|(_, f)| !f.present)
        .map(|(name, _)| *name)
        .collect()
}
