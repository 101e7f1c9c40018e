//! Response performance scoring
//!
//! Score deductions and recommendations are both driven by [`PERFORMANCE_RULES`].
//! For each metric only the first rule it exceeds applies, so rules for the
//! same metric are listed from the highest threshold down.

use reqwest::header::HeaderMap;
use serde::Serialize;

use crate::client::PhaseTimings;

/// Quantity a performance rule looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Total cycle time in milliseconds
    TotalTime,
    /// DNS resolution in milliseconds
    DnsLookup,
    /// Approximated TLS handshake in milliseconds, https only
    TlsHandshake,
    /// 1 when the response is not gzip-compressed
    Uncompressed,
    /// 1 when the server did not keep the connection alive
    NotKeptAlive,
    /// Decoded body size in bytes
    ResponseSize,
}

/// One row of the performance table
#[derive(Debug)]
pub struct PerformanceRule {
    pub metric: Metric,
    /// Applies when the metric value is strictly greater
    pub threshold: f64,
    pub penalty: u8,
    pub recommendation: Option<&'static str>,
}

const CACHING: &str = "Consider implementing response caching to reduce total response time";
const DNS: &str = "Use DNS pre-fetching or a CDN to reduce DNS lookup time";
const TLS: &str = "Enable TLS session resumption to shorten handshakes";
const COMPRESSION: &str = "Enable gzip compression for responses";
const KEEP_ALIVE: &str = "Enable HTTP keep-alive to reuse connections";
const PAGINATION: &str = "Large response size - consider pagination or data filtering";

pub static PERFORMANCE_RULES: &[PerformanceRule] = &[
    PerformanceRule { metric: Metric::TotalTime, threshold: 3000.0, penalty: 30, recommendation: Some(CACHING) },
    PerformanceRule { metric: Metric::TotalTime, threshold: 1000.0, penalty: 15, recommendation: Some(CACHING) },
    PerformanceRule { metric: Metric::TotalTime, threshold: 500.0, penalty: 5, recommendation: None },
    PerformanceRule { metric: Metric::DnsLookup, threshold: 500.0, penalty: 10, recommendation: Some(DNS) },
    PerformanceRule { metric: Metric::DnsLookup, threshold: 200.0, penalty: 5, recommendation: Some(DNS) },
    PerformanceRule { metric: Metric::TlsHandshake, threshold: 300.0, penalty: 10, recommendation: Some(TLS) },
    PerformanceRule { metric: Metric::TlsHandshake, threshold: 100.0, penalty: 5, recommendation: Some(TLS) },
    PerformanceRule { metric: Metric::Uncompressed, threshold: 0.0, penalty: 10, recommendation: Some(COMPRESSION) },
    PerformanceRule { metric: Metric::NotKeptAlive, threshold: 0.0, penalty: 5, recommendation: Some(KEEP_ALIVE) },
    PerformanceRule { metric: Metric::ResponseSize, threshold: 5_000_000.0, penalty: 15, recommendation: Some(PAGINATION) },
    PerformanceRule { metric: Metric::ResponseSize, threshold: 1_000_000.0, penalty: 5, recommendation: Some(PAGINATION) },
];

/// Observed values the rules are evaluated against
#[derive(Debug, Clone, Copy)]
pub struct PerformanceInputs {
    pub timings: PhaseTimings,
    pub is_compressed: bool,
    pub connection_reused: bool,
    pub size_bytes: u64,
}

impl PerformanceInputs {
    /// Collect inputs from the response headers
    pub fn from_response(timings: PhaseTimings, headers: &HeaderMap, size_bytes: u64) -> Self {
        let header_contains = |name: &str, needle: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_lowercase().contains(needle))
                .unwrap_or(false)
        };
        Self {
            timings,
            is_compressed: header_contains("content-encoding", "gzip"),
            connection_reused: header_contains("connection", "keep-alive"),
            size_bytes,
        }
    }

    fn value(&self, metric: Metric) -> Option<f64> {
        let flag = |set: bool| if set { 1.0 } else { 0.0 };
        match metric {
            Metric::TotalTime => Some(self.timings.total_time.as_f64()),
            Metric::DnsLookup => Some(self.timings.dns_lookup.as_f64()),
            Metric::TlsHandshake => self.timings.tls_handshake.map(|t| t.as_f64()),
            Metric::Uncompressed => Some(flag(!self.is_compressed)),
            Metric::NotKeptAlive => Some(flag(!self.connection_reused)),
            Metric::ResponseSize => Some(self.size_bytes as f64),
        }
    }
}

/// Performance block of the response metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceMetrics {
    pub score: u8,
    pub is_compressed: bool,
    pub connection_reused: bool,
    pub size_bytes: u64,
    pub recommendations: Vec<String>,
}

/// Evaluate the performance table
pub fn evaluate(inputs: &PerformanceInputs) -> PerformanceMetrics {
    let mut score: i32 = 100;
    let mut recommendations: Vec<String> = Vec::new();
    let mut settled: Vec<Metric> = Vec::new();

    for rule in PERFORMANCE_RULES {
        if settled.contains(&rule.metric) {
            continue;
        }
        let Some(value) = inputs.value(rule.metric) else {
            continue;
        };
        if value > rule.threshold {
            settled.push(rule.metric);
            score -= i32::from(rule.penalty);
            if let Some(message) = rule.recommendation {
                recommendations.push(message.to_string());
            }
        }
    }

    PerformanceMetrics {
        score: score.clamp(0, 100) as u8,
        is_compressed: inputs.is_compressed,
        connection_reused: inputs.connection_reused,
        size_bytes: inputs.size_bytes,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Millis;

    fn inputs(total: f64, dns: f64, tls: Option<f64>) -> PerformanceInputs {
        PerformanceInputs {
            timings: PhaseTimings {
                total_time: Millis(total),
                dns_lookup: Millis(dns),
                tls_handshake: tls.map(Millis),
                ..Default::default()
            },
            is_compressed: true,
            connection_reused: true,
            size_bytes: 100,
        }
    }

    #[test]
    fn test_fast_response_scores_full() {
        let metrics = evaluate(&inputs(50.0, 1.0, None));
        assert_eq!(metrics.score, 100);
        assert!(metrics.recommendations.is_empty());
    }

    #[test]
    fn test_only_highest_tier_applies() {
        assert_eq!(evaluate(&inputs(3500.0, 0.0, None)).score, 70);
        assert_eq!(evaluate(&inputs(1500.0, 0.0, None)).score, 85);
        assert_eq!(evaluate(&inputs(700.0, 0.0, None)).score, 95);
        assert_eq!(evaluate(&inputs(3500.0, 0.0, None)).recommendations, vec![CACHING]);
    }

    #[test]
    fn test_tls_only_counts_when_present() {
        assert_eq!(evaluate(&inputs(0.0, 0.0, Some(400.0))).score, 90);
        assert_eq!(evaluate(&inputs(0.0, 0.0, Some(150.0))).score, 95);
        assert_eq!(evaluate(&inputs(0.0, 0.0, None)).score, 100);
    }

    #[test]
    fn test_uncompressed_and_closed_connection() {
        let mut i = inputs(0.0, 0.0, None);
        i.is_compressed = false;
        i.connection_reused = false;
        let metrics = evaluate(&i);
        assert_eq!(metrics.score, 85);
        assert_eq!(metrics.recommendations, vec![COMPRESSION, KEEP_ALIVE]);
    }

    #[test]
    fn test_recommendations_follow_deductions() {
        // Every deduction with a message yields exactly that message
        let mut i = inputs(5000.0, 600.0, Some(500.0));
        i.is_compressed = false;
        i.connection_reused = false;
        i.size_bytes = 6_000_000;
        let metrics = evaluate(&i);
        assert_eq!(metrics.score, 20);
        assert_eq!(
            metrics.recommendations,
            vec![CACHING, DNS, TLS, COMPRESSION, KEEP_ALIVE, PAGINATION]
        );
    }

    #[test]
    fn test_header_detection() {
        let mut headers = HeaderMap::new();
        headers.insert("content-encoding", "GZIP".parse().unwrap());
        headers.insert("connection", "Keep-Alive".parse().unwrap());
        let i = PerformanceInputs::from_response(PhaseTimings::default(), &headers, 10);
        assert!(i.is_compressed);
        assert!(i.connection_reused);
        assert_eq!(evaluate(&i).score, 100);
    }
}
