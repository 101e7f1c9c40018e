//! Authentication detection

use serde::Serialize;

use crate::models::ParsedRequest;

/// Strength of the detected authentication scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    #[default]
    None,
    Medium,
    High,
}

impl SecurityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityLevel::None => "none",
            SecurityLevel::Medium => "medium",
            SecurityLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthenticationInfo {
    pub present: bool,
    #[serde(rename = "type")]
    pub auth_type: Option<String>,
    pub security_level: SecurityLevel,
}

/// A header-based authentication scheme
struct AuthRule {
    header: &'static str,
    prefix: Option<&'static str>,
    auth_type: &'static str,
    security_level: SecurityLevel,
}

/// Evaluated in order; a later match overwrites an earlier one
const AUTH_RULES: &[AuthRule] = &[
    AuthRule {
        header: "Authorization",
        prefix: Some("Bearer "),
        auth_type: "Bearer Token",
        security_level: SecurityLevel::High,
    },
    AuthRule {
        header: "Authorization",
        prefix: Some("Basic "),
        auth_type: "Basic Auth",
        security_level: SecurityLevel::Medium,
    },
    AuthRule {
        header: "X-API-Key",
        prefix: None,
        auth_type: "API Key",
        security_level: SecurityLevel::Medium,
    },
];

/// Detect which authentication scheme the request carries
///
/// An `Authorization` header with any other scheme is not recognized.
pub fn detect_authentication(request: &ParsedRequest) -> AuthenticationInfo {
    let mut info = AuthenticationInfo::default();

    for rule in AUTH_RULES {
        let Some(value) = request.header(rule.header) else {
            continue;
        };
        if rule.prefix.is_some_and(|prefix| !value.starts_with(prefix)) {
            continue;
        }
        info = AuthenticationInfo {
            present: true,
            auth_type: Some(rule.auth_type.to_string()),
            security_level: rule.security_level,
        };
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curl::parse_curl_command;

    fn detect(cmd: &str) -> AuthenticationInfo {
        detect_authentication(&parse_curl_command(cmd).unwrap())
    }

    #[test]
    fn test_bearer() {
        let info = detect("curl https://a.b -H 'Authorization: Bearer tok'");
        assert!(info.present);
        assert_eq!(info.auth_type.as_deref(), Some("Bearer Token"));
        assert_eq!(info.security_level, SecurityLevel::High);
    }

    #[test]
    fn test_basic() {
        let info = detect("curl https://a.b -H 'Authorization: Basic dXNlcjpwYXNz'");
        assert_eq!(info.auth_type.as_deref(), Some("Basic Auth"));
        assert_eq!(info.security_level, SecurityLevel::Medium);
    }

    #[test]
    fn test_api_key_header_case() {
        let info = detect("curl https://a.b -H 'x-api-key: 123'");
        assert_eq!(info.auth_type.as_deref(), Some("API Key"));
        assert_eq!(info.security_level, SecurityLevel::Medium);
    }

    #[test]
    fn test_last_match_wins() {
        let info = detect("curl https://a.b -H 'Authorization: Bearer tok' -H 'X-API-Key: k'");
        assert_eq!(info.auth_type.as_deref(), Some("API Key"));
        assert_eq!(info.security_level, SecurityLevel::Medium);
    }

    #[test]
    fn test_none() {
        let info = detect("curl https://a.b");
        assert_eq!(info, AuthenticationInfo::default());
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["type"], serde_json::Value::Null);
        assert_eq!(json["security_level"], "none");
    }

    #[test]
    fn test_unknown_scheme_not_detected() {
        let info = detect("curl https://a.b -H 'Authorization: Digest abc'");
        assert!(!info.present);
        let lowercase = detect("curl https://a.b -H 'Authorization: bearer tok'");
        assert!(!lowercase.present);
    }
}
