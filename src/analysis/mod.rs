//! Request analysis
//!
//! Derives a [`RequestAnalysis`] from a [`ParsedRequest`] without touching the
//! network. The result depends on nothing but the request, so analyzing the
//! same request twice gives identical records.

pub mod auth;
pub mod body;
pub mod findings;
pub mod headers;
pub mod score;
pub mod url;

pub use auth::{detect_authentication, AuthenticationInfo, SecurityLevel};
pub use body::{analyze_body, BodyAnalysis, BodyFormat};
pub use findings::{RiskLevel, SecurityHeaderFinding};
pub use headers::{analyze_headers, HeaderAnalysis, SECURITY_CHECKLIST};
pub use score::{score, Grade, SecurityScore};
pub use self::url::{analyze_url, UrlAnalysis};

use serde::Serialize;

use crate::http::Method;
use crate::models::ParsedRequest;

/// Structural and security analysis of a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestAnalysis {
    pub method: Method,
    pub url_analysis: UrlAnalysis,
    pub headers: HeaderAnalysis,
    pub authentication: AuthenticationInfo,
    /// Only set for a non-empty body
    pub body: Option<BodyAnalysis>,
    pub security_score: SecurityScore,
}

/// Analyze the request data with security insights
pub fn analyze_request(request: &ParsedRequest) -> RequestAnalysis {
    let mut analysis = RequestAnalysis {
        method: request.method.clone(),
        url_analysis: analyze_url(&request.url),
        headers: analyze_headers(&request.headers),
        authentication: detect_authentication(request),
        body: request.non_empty_body().map(analyze_body),
        security_score: SecurityScore::default(),
    };
    analysis.security_score = score(&analysis);

    tracing::debug!(
        url = %request.url,
        score = analysis.security_score.score,
        grade = %analysis.security_score.grade,
        "Request analyzed"
    );

    analysis
}
