//! curlscope library interface
//!
//! Parses curl commands, runs them, and analyzes both sides of the exchange.
//!
//! # Module Organization
//!
//! - [`curl`] - Curl command tokenizer and parser (parse_curl_command)
//! - [`analysis`] - Request analysis and security scoring (analyze_request)
//! - [`client`] - HTTP execution with phase timing (execute)
//! - [`response`] - Response decoding, security headers, performance and health
//! - [`cycle`] - The full cycle (analyze, execute_and_analyze)
//! - [`history`] - Analysis records and the in-memory history store
//! - [`errors`] - Error types (ParseError, RequestError, CurlscopeError)
//! - [`core`] - CLI entry logic
//!
//! ```no_run
//! # async fn demo() -> curlscope::errors::Result<()> {
//! use curlscope::{analyze, ExecutorOptions};
//!
//! let result = analyze("curl -H 'Accept: application/json' https://example.com", &ExecutorOptions::default()).await?;
//! println!("{} in {}", result.response.status_code, result.response.metadata.timing.total_time);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod binary;
pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod curl;
pub mod cycle;
pub mod errors;
pub mod history;
pub mod http;
pub mod json;
pub mod logging;
pub mod mime;
pub mod models;
pub mod output;
pub mod response;
pub mod status;
pub mod table;
pub mod xml;

pub use analysis::{analyze_request, RequestAnalysis};
pub use client::{execute, ExecutorOptions, RawResponse};
pub use curl::parse_curl_command;
pub use cycle::{analyze, execute_and_analyze, AnalysisResult};
pub use errors::{CurlscopeError, ParseError, RequestError};
pub use history::{AnalysisRecord, HistoryStore};
pub use models::ParsedRequest;
pub use response::{analyze_response, decode_content, Content, ResponseAnalysis};
