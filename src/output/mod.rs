//! Rendering analysis results for the terminal

mod pretty;

use serde_json::json;

use crate::analysis::RequestAnalysis;
use crate::client::Millis;
use crate::config::OutputFormat;
use crate::cycle::AnalysisResult;
use crate::errors::Result;
use crate::history::AnalysisRecord;
use crate::models::ParsedRequest;

pub use pretty::{render_request, render_response};

/// What a run produced
#[derive(Debug, Clone, Copy)]
pub enum Report<'a> {
    /// The request was analyzed but not sent
    Request {
        command: &'a str,
        parsed: &'a ParsedRequest,
        analysis: &'a RequestAnalysis,
        elapsed: Millis,
    },
    Full {
        command: &'a str,
        result: &'a AnalysisResult,
        elapsed: Millis,
    },
}

/// Render a report in the requested format
pub fn render(report: Report<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(render_pretty(report)),
        OutputFormat::Json => {
            let value = match report {
                Report::Request { parsed, analysis, .. } => {
                    json!({ "parsed": parsed, "request": analysis })
                }
                Report::Full { result, .. } => serde_json::to_value(result)?,
            };
            Ok(serde_json::to_string_pretty(&value)?)
        }
        OutputFormat::Record => {
            let record = match report {
                Report::Request { command, parsed, analysis, elapsed } => {
                    AnalysisRecord::request_only(command, parsed, analysis.clone(), elapsed)
                }
                Report::Full { command, result, elapsed } => AnalysisRecord::new(command, result, elapsed),
            };
            Ok(serde_json::to_string_pretty(&record)?)
        }
    }
}

fn render_pretty(report: Report<'_>) -> String {
    match report {
        Report::Request { parsed, analysis, .. } => render_request(parsed, analysis),
        Report::Full { result, .. } => {
            let mut out = render_request(&result.parsed, &result.request);
            out.push('\n');
            out.push_str(&render_response(result));
            out
        }
    }
}
