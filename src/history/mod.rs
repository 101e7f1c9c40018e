//! Analysis records and an in-memory history
//!
//! [`AnalysisRecord`] is the JSON shape handed to whatever persists results.
//! [`HistoryStore`] is owned by the caller and passed around explicitly.

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

use crate::analysis::RequestAnalysis;
use crate::client::Millis;
use crate::cycle::AnalysisResult;
use crate::models::ParsedRequest;
use crate::response::ResponseAnalysis;

/// Records kept by a [`HistoryStore`]
pub const MAX_ENTRIES: usize = 50;

/// One analysis cycle, successful or not
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRecord {
    pub timestamp: DateTime<Utc>,
    pub curl_command: String,
    pub request_info: Option<RequestAnalysis>,
    pub response_info: Option<ResponseAnalysis>,
    pub status_code: Option<u16>,
    pub execution_time: Millis,
    /// The cycle ran to completion, whatever the status code
    pub success: bool,
    pub endpoint: Option<String>,
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisRecord {
    pub fn new(curl_command: &str, result: &AnalysisResult, execution_time: Millis) -> Self {
        Self {
            timestamp: Utc::now(),
            curl_command: curl_command.to_string(),
            request_info: Some(result.request.clone()),
            response_info: Some(result.response.clone()),
            status_code: Some(result.response.status_code),
            execution_time,
            success: true,
            endpoint: Some(result.parsed.url.clone()),
            method: Some(result.parsed.method.to_string()),
            error: None,
        }
    }

    /// Record a request that was analyzed but not sent
    pub fn request_only(
        curl_command: &str,
        parsed: &ParsedRequest,
        request_info: RequestAnalysis,
        execution_time: Millis,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            curl_command: curl_command.to_string(),
            request_info: Some(request_info),
            response_info: None,
            status_code: None,
            execution_time,
            success: true,
            endpoint: Some(parsed.url.clone()),
            method: Some(parsed.method.to_string()),
            error: None,
        }
    }

    /// Record a cycle that stopped at `error`
    ///
    /// `parsed` is available when the failure came after parsing.
    pub fn failed(
        curl_command: &str,
        parsed: Option<&ParsedRequest>,
        request_info: Option<RequestAnalysis>,
        error: &dyn fmt::Display,
        execution_time: Millis,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            curl_command: curl_command.to_string(),
            request_info,
            response_info: None,
            status_code: None,
            execution_time,
            success: false,
            endpoint: parsed.map(|p| p.url.clone()),
            method: parsed.map(|p| p.method.to_string()),
            error: Some(error.to_string()),
        }
    }
}

/// Header differences between two responses
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct HeaderDifferences {
    pub only_in_first: Vec<String>,
    pub only_in_second: Vec<String>,
    pub different_values: Vec<String>,
}

/// How two recorded responses differ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseComparison {
    pub status_code_match: bool,
    pub timing_difference: Millis,
    pub header_differences: HeaderDifferences,
    /// Second minus first, when both records carry a response
    pub content_size_difference: Option<i64>,
}

/// Most recent analysis records, oldest first
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<AnalysisRecord>,
    max_entries: usize,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_capacity(MAX_ENTRIES)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_entries),
            max_entries: max_entries.max(1),
        }
    }

    /// Append a record, dropping the oldest once full
    pub fn push(&mut self, record: AnalysisRecord) {
        if self.entries.len() == self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(record);
    }

    pub fn entries(&self) -> impl Iterator<Item = &AnalysisRecord> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&AnalysisRecord> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Compare the responses of two records
    pub fn compare(first: &AnalysisRecord, second: &AnalysisRecord) -> ResponseComparison {
        let header_differences = match (&first.response_info, &second.response_info) {
            (Some(a), Some(b)) => diff_headers(a, b),
            _ => HeaderDifferences::default(),
        };
        let content_size_difference = match (&first.response_info, &second.response_info) {
            (Some(a), Some(b)) => Some(b.metadata.size_bytes as i64 - a.metadata.size_bytes as i64),
            _ => None,
        };

        ResponseComparison {
            status_code_match: first.status_code == second.status_code,
            timing_difference: Millis((first.execution_time.0 - second.execution_time.0).abs()),
            header_differences,
            content_size_difference,
        }
    }
}

fn diff_headers(first: &ResponseAnalysis, second: &ResponseAnalysis) -> HeaderDifferences {
    let a: IndexSet<&String> = first.headers.keys().collect();
    let b: IndexSet<&String> = second.headers.keys().collect();

    HeaderDifferences {
        only_in_first: a.difference(&b).map(|s| s.to_string()).collect(),
        only_in_second: b.difference(&a).map(|s| s.to_string()).collect(),
        different_values: a
            .intersection(&b)
            .filter(|name| first.headers[name.as_str()] != second.headers[name.as_str()])
            .map(|s| s.to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed_record(command: &str, ms: f64) -> AnalysisRecord {
        AnalysisRecord::failed(command, None, None, &"boom", Millis(ms))
    }

    #[test]
    fn test_store_is_bounded() {
        let mut store = HistoryStore::new();
        for i in 0..(MAX_ENTRIES + 5) {
            store.push(failed_record(&format!("curl http://h/{}", i), 1.0));
        }
        assert_eq!(store.len(), MAX_ENTRIES);
        assert_eq!(store.entries().next().unwrap().curl_command, "curl http://h/5");
        assert_eq!(store.last().unwrap().curl_command, format!("curl http://h/{}", MAX_ENTRIES + 4));
        store.clear();
        assert!(store.is_empty());
        assert!(store.last().is_none());
    }

    #[test]
    fn test_failed_record_shape() {
        let record = failed_record("curl", 2.5);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["execution_time"], "2.50ms");
        assert_eq!(json["error"], "boom");
        assert!(json["status_code"].is_null());
        for key in ["timestamp", "curl_command", "request_info", "response_info", "endpoint", "method"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
    }

    #[test]
    fn test_compare_without_responses() {
        let cmp = HistoryStore::compare(&failed_record("a", 10.0), &failed_record("b", 4.0));
        assert!(cmp.status_code_match);
        assert_eq!(cmp.timing_difference, Millis(6.0));
        assert_eq!(cmp.header_differences, HeaderDifferences::default());
        assert_eq!(cmp.content_size_difference, None);
    }
}
