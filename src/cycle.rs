//! The full parse, analyze, execute cycle

use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::{analyze_request, RequestAnalysis};
use crate::client::{execute, ExecutorOptions};
use crate::curl::parse_curl_command;
use crate::errors::{RequestError, Result};
use crate::models::ParsedRequest;
use crate::response::{
    analyze_response, assess_health, optimization_suggestions, process_body, ApiHealth, ResponseAnalysis,
};

/// Output of one complete analysis cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub parsed: ParsedRequest,
    pub request: RequestAnalysis,
    pub response: ResponseAnalysis,
    pub health: ApiHealth,
    pub suggestions: Vec<String>,
}

/// Execute a request, then process and analyze its response
///
/// Processing time covers decompression and decoding; total time runs from
/// client setup to the end of processing.
pub async fn execute_and_analyze(
    request: &ParsedRequest,
    options: &ExecutorOptions,
) -> std::result::Result<ResponseAnalysis, RequestError> {
    let mut raw = execute(request, options).await.inspect_err(|e| {
        warn!(phase = e.phase(), error = %e, "Request failed");
    })?;

    let body = process_body(&raw);
    let mut timings = raw.timings;
    timings.processing_time = raw.clock.lap();
    timings.total_time = raw.clock.total();

    Ok(analyze_response(&raw, body, timings))
}

/// Parse a curl command and run the whole cycle against the live endpoint
pub async fn analyze(raw_command: &str, options: &ExecutorOptions) -> Result<AnalysisResult> {
    let parsed = parse_curl_command(raw_command)?;
    info!(method = %parsed.method, url = %parsed.url, "Parsed curl command");

    let request = analyze_request(&parsed);
    let response = execute_and_analyze(&parsed, options).await?;
    let health = assess_health(&response);
    let suggestions = optimization_suggestions(&parsed, &response);

    info!(
        status = response.status_code,
        total_time = %response.metadata.timing.total_time,
        security_score = request.security_score.score,
        "Analysis complete"
    );

    Ok(AnalysisResult {
        parsed,
        request,
        response,
        health,
        suggestions,
    })
}
