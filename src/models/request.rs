//! Parsed request model
//!
//! # Why IndexMap?
//!
//! Header names are stored exactly as the user typed them. HTTP does not care
//! about their order, but the analysis records are serialized and compared
//! byte for byte, so the map keeps insertion order to stay reproducible.

use indexmap::IndexMap;
use serde::Serialize;

use crate::http::Method;

/// Headers dictionary - header name (as given) to value
pub type HeadersDict = IndexMap<String, String>;

/// Structured request produced by the curl parser
///
/// Built once by [`crate::curl::parse_curl_command`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeadersDict,
    #[serde(rename = "data")]
    pub body: Option<String>,
}

impl ParsedRequest {
    pub(crate) fn new(
        method: Method,
        url: String,
        headers: HeadersDict,
        body: Option<String>,
    ) -> Self {
        Self { method, url, headers, body }
    }

    /// Look up a header value ignoring the case of the name
    ///
    /// When the same name was given with different casing, the first entry wins.
    pub fn header(&self, name: &str) -> Option<&str> {
        header_lookup(&self.headers, name)
    }

    /// Whether a header is present (case-insensitive name match)
    pub fn has_header(&self, name: &str) -> bool {
        self.header(name).is_some()
    }

    /// The body, if set and not empty
    pub fn non_empty_body(&self) -> Option<&str> {
        self.body.as_deref().filter(|b| !b.is_empty())
    }
}

/// Case-insensitive lookup in a header dictionary
pub fn header_lookup<'a>(headers: &'a HeadersDict, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
