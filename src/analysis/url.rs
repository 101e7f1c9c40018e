//! URL decomposition and query-string checks

use serde::Serialize;
use url::Url;

/// Keywords that mark a query parameter as sensitive
pub const SENSITIVE_PARAM_KEYWORDS: &[&str] = &[
    "password", "token", "key", "secret", "auth", "pwd", "pass", "credential", "private",
];

/// Structural breakdown of the request URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlAnalysis {
    pub scheme: String,
    /// Authority as written, including any userinfo and explicit port
    pub host: String,
    pub path: String,
    pub query_params: String,
    pub fragment: String,
    pub security: UrlSecurity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlSecurity {
    pub uses_https: bool,
    pub has_sensitive_params: bool,
    /// Username or password embedded in the URL
    pub has_credentials: bool,
    pub recommendations: Vec<String>,
}

/// Break a URL into its components
///
/// An unparseable URL yields empty components rather than an error; the
/// parser has already rejected those for requests it built.
pub fn analyze_url(raw: &str) -> UrlAnalysis {
    let parsed = Url::parse(raw).ok();

    let scheme = parsed.as_ref().map(|u| u.scheme().to_string()).unwrap_or_default();
    let host = parsed.as_ref().map(|_| authority(raw).to_string()).unwrap_or_default();
    let path = parsed.as_ref().map(|u| u.path().to_string()).unwrap_or_default();
    let query_params = parsed.as_ref().and_then(Url::query).unwrap_or("").to_string();
    let fragment = parsed.as_ref().and_then(Url::fragment).unwrap_or("").to_string();

    let uses_https = scheme == "https";
    let has_sensitive_params = has_sensitive_params(&query_params);
    let has_credentials = parsed
        .as_ref()
        .is_some_and(|u| !u.username().is_empty() || u.password().is_some());

    let mut recommendations = Vec::new();
    if !uses_https {
        recommendations.push("Consider using HTTPS for secure data transmission".to_string());
    }
    if has_sensitive_params {
        recommendations.push("Move credentials and secrets out of the query string".to_string());
    }
    if has_credentials {
        recommendations.push("Remove credentials embedded in the URL; send them in a header".to_string());
    }

    UrlAnalysis {
        scheme,
        host,
        path,
        query_params,
        fragment,
        security: UrlSecurity {
            uses_https,
            has_sensitive_params,
            has_credentials,
            recommendations,
        },
    }
}

/// Check if query parameters contain potentially sensitive information
pub fn has_sensitive_params(query: &str) -> bool {
    query
        .to_lowercase()
        .split('&')
        .any(|param| SENSITIVE_PARAM_KEYWORDS.iter().any(|kw| param.contains(kw)))
}

/// Text between `scheme://` and the path, query or fragment
fn authority(raw: &str) -> &str {
    let rest = raw.split_once("://").map_or("", |(_, rest)| rest);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}
