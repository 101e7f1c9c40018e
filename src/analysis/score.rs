//! Request security scoring
//!
//! Pure deduction from 100; every deduction adds one recommendation, in the
//! order the checks run.

use serde::{Serialize, Serializer};
use std::fmt;

use super::auth::SecurityLevel;
use super::RequestAnalysis;

const HTTPS_PENALTY: i32 = 20;
const NO_AUTH_PENALTY: i32 = 30;
const MEDIUM_AUTH_PENALTY: i32 = 15;
const MISSING_HEADER_PENALTY: i32 = 5;
const SENSITIVE_PARAMS_PENALTY: i32 = 10;

/// Letter grade derived from the numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Grade {
    #[default]
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => Grade::A,
            80..=89 => Grade::B,
            70..=79 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Grade::A => 'A',
            Grade::B => 'B',
            Grade::C => 'C',
            Grade::D => 'D',
            Grade::F => 'F',
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Serialize for Grade {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecurityScore {
    pub score: u8,
    pub grade: Grade,
    pub recommendations: Vec<String>,
}

impl Default for SecurityScore {
    fn default() -> Self {
        Self {
            score: 100,
            grade: Grade::A,
            recommendations: Vec::new(),
        }
    }
}

/// Calculate the overall security score of an analyzed request
pub fn score(analysis: &RequestAnalysis) -> SecurityScore {
    let mut score: i32 = 100;
    let mut recommendations = Vec::new();

    if !analysis.url_analysis.security.uses_https {
        score -= HTTPS_PENALTY;
        recommendations.push("Switch to HTTPS for secure communication".to_string());
    }

    if !analysis.authentication.present {
        score -= NO_AUTH_PENALTY;
        recommendations.push("Implement authentication for secure access".to_string());
    } else if analysis.authentication.security_level == SecurityLevel::Medium {
        score -= MEDIUM_AUTH_PENALTY;
        recommendations.push("Consider using stronger authentication method".to_string());
    }

    // Presence only; a present but invalid header is reported by the header analysis
    for (name, finding) in &analysis.headers.security_analysis.security_headers {
        if !finding.present {
            score -= MISSING_HEADER_PENALTY;
            recommendations.push(format!("Add {} security header", name));
        }
    }

    if analysis.url_analysis.security.has_sensitive_params {
        score -= SENSITIVE_PARAMS_PENALTY;
        recommendations.push("Remove sensitive data from URL parameters".to_string());
    }

    let score = score.clamp(0, 100) as u8;
    SecurityScore {
        score,
        grade: Grade::from_score(score),
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze_request;
    use crate::curl::parse_curl_command;

    fn score_of(cmd: &str) -> SecurityScore {
        analyze_request(&parse_curl_command(cmd).unwrap()).security_score
    }

    const ALL_HEADERS: &str = "-H 'X-CSRF-Token: t' -H 'X-XSS-Protection: 1' \
        -H 'X-Content-Type-Options: nosniff' -H 'Strict-Transport-Security: max-age=1' \
        -H 'X-Frame-Options: DENY' -H 'Permissions-Policy: camera=()' \
        -H 'Content-Security-Policy: default-src self' -H 'Referrer-Policy: no-referrer'";

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_score(100), Grade::A);
        assert_eq!(Grade::from_score(90), Grade::A);
        assert_eq!(Grade::from_score(89), Grade::B);
        assert_eq!(Grade::from_score(80), Grade::B);
        assert_eq!(Grade::from_score(70), Grade::C);
        assert_eq!(Grade::from_score(60), Grade::D);
        assert_eq!(Grade::from_score(59), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
        assert_eq!(serde_json::to_string(&Grade::B).unwrap(), "\"B\"");
    }

    #[test]
    fn test_perfect_request() {
        let s = score_of(&format!("curl https://a.b {} -H 'Authorization: Bearer x'", ALL_HEADERS));
        assert_eq!(s.score, 100);
        assert_eq!(s.grade, Grade::A);
        assert!(s.recommendations.is_empty());
    }

    #[test]
    fn test_worst_request_clamps_to_zero() {
        let s = score_of("curl 'http://a.b/?password=1'");
        // 100 - 20 - 30 - 8*5 - 10 = 0
        assert_eq!(s.score, 0);
        assert_eq!(s.grade, Grade::F);
        assert_eq!(s.recommendations.len(), 1 + 1 + 8 + 1);
        assert_eq!(s.recommendations[0], "Switch to HTTPS for secure communication");
        assert_eq!(s.recommendations[1], "Implement authentication for secure access");
        assert_eq!(s.recommendations[2], "Add x-csrf-token security header");
        assert_eq!(s.recommendations[10], "Remove sensitive data from URL parameters");
    }

    #[test]
    fn test_medium_auth_penalty() {
        let s = score_of(&format!("curl https://a.b {} -H 'X-API-Key: k'", ALL_HEADERS));
        assert_eq!(s.score, 85);
        assert_eq!(s.grade, Grade::B);
        assert_eq!(s.recommendations, vec!["Consider using stronger authentication method"]);
    }

    #[test]
    fn test_invalid_header_counts_as_present() {
        let s = score_of(&format!(
            "curl https://a.b {} -H 'Authorization: Bearer x' -H 'X-Frame-Options: nope'",
            ALL_HEADERS
        ));
        assert_eq!(s.score, 100);
    }

    #[test]
    fn test_adding_headers_never_lowers_score() {
        let mut cmd = "curl http://a.b".to_string();
        let mut previous = score_of(&cmd).score;
        for header in ["X-CSRF-Token: t", "X-Frame-Options: DENY", "Referrer-Policy: origin", "Authorization: Basic x"] {
            cmd.push_str(&format!(" -H '{}'", header));
            let current = score_of(&cmd).score;
            assert!(current >= previous, "{} < {} after {}", current, previous, header);
            previous = current;
        }
    }
}
