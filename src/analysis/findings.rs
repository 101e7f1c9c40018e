//! Shared finding types for request and response security checks

use serde::Serialize;

/// Risk carried by a missing or misconfigured security header
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Result of checking one well-known security header
///
/// `valid` is only set when the header has a defined set of correct values
/// and is present; `value` is only recorded for response headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityHeaderFinding {
    pub present: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    pub description: &'static str,
    pub remediation: &'static str,
    pub risk_level: RiskLevel,
}

impl SecurityHeaderFinding {
    /// Whether the header is present and not known to be misconfigured
    pub fn is_satisfied(&self) -> bool {
        self.present && self.valid != Some(false)
    }
}
