//! Human readable report

use indexmap::IndexSet;
use std::fmt::Write;

use crate::analysis::RequestAnalysis;
use crate::cycle::AnalysisResult;
use crate::models::ParsedRequest;
use crate::response::{Content, ResponseAnalysis};
use crate::table::{format_as_table, key_value_table, new_table, yes_no};

/// Characters of raw body shown before truncating
const MAX_BODY_CHARS: usize = 4000;

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n== {} ==", title);
}

fn bullets(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}

pub fn render_request(parsed: &ParsedRequest, analysis: &RequestAnalysis) -> String {
    let mut out = String::new();
    let score = &analysis.security_score;
    let _ = writeln!(out, "{} {}", parsed.method, parsed.url);
    let _ = writeln!(out, "Security score: {}/100 (grade {})", score.score, score.grade);

    section(&mut out, "URL");
    let url = &analysis.url_analysis;
    let _ = writeln!(
        out,
        "{}",
        key_value_table(
            ["Component", "Value"],
            [
                ("scheme", url.scheme.as_str()),
                ("host", url.host.as_str()),
                ("path", url.path.as_str()),
                ("query", url.query_params.as_str()),
                ("fragment", url.fragment.as_str()),
                ("https", yes_no(url.security.uses_https)),
                ("sensitive params", yes_no(url.security.has_sensitive_params)),
            ],
        )
    );

    section(&mut out, "Authentication");
    let auth = &analysis.authentication;
    match &auth.auth_type {
        Some(kind) if auth.present => {
            let _ = writeln!(out, "{} (security level: {})", kind, auth.security_level.as_str());
        }
        _ => {
            let _ = writeln!(out, "none detected");
        }
    }

    section(&mut out, "Security headers");
    let mut table = new_table(&["Header", "Present", "Valid", "Risk"]);
    for (name, finding) in &analysis.headers.security_analysis.security_headers {
        let valid = finding.valid.map(yes_no).unwrap_or("-");
        table.add_row(vec![*name, yes_no(finding.present), valid, finding.risk_level.as_str()]);
    }
    let _ = writeln!(out, "{}", table);

    if let Some(body) = &analysis.body {
        section(&mut out, "Body");
        let _ = writeln!(
            out,
            "{} bytes, sniffed as {:?}, sensitive data: {}",
            body.size_bytes,
            body.content_type,
            yes_no(body.security_analysis.contains_sensitive_data)
        );
        let _ = writeln!(out, "{}", body.content_preview);
    }

    let mut merged: IndexSet<String> = score.recommendations.iter().cloned().collect();
    merged.extend(analysis.url_analysis.security.recommendations.iter().cloned());
    merged.extend(analysis.headers.recommendations.iter().cloned());
    if let Some(body) = &analysis.body {
        merged.extend(body.security_analysis.recommendations.iter().cloned());
    }
    let recommendations: Vec<String> = merged.into_iter().collect();
    if !recommendations.is_empty() {
        section(&mut out, "Request recommendations");
        bullets(&mut out, &recommendations);
    }

    out
}

pub fn render_response(result: &AnalysisResult) -> String {
    let mut out = String::new();
    let response = &result.response;
    let meta = &response.metadata;

    let _ = writeln!(out, "HTTP {} {}", response.status_code, response.reason);
    let _ = writeln!(
        out,
        "{} ({}), {} redirect(s), final URL {}",
        meta.size, meta.encoding, meta.redirect_count, meta.final_url
    );

    section(&mut out, "Timing");
    let timing = &meta.timing;
    let mut rows = vec![
        ("session setup", timing.session_setup.to_string()),
        ("dns lookup", timing.dns_lookup.to_string()),
        ("time to first byte", timing.time_to_first_byte.to_string()),
        ("request", timing.request_time.to_string()),
    ];
    if let Some(tls) = timing.tls_handshake {
        rows.push(("tls handshake (approx.)", tls.to_string()));
    }
    rows.push(("processing", timing.processing_time.to_string()));
    rows.push(("total", timing.total_time.to_string()));
    let _ = writeln!(out, "{}", key_value_table(["Phase", "Time"], rows));

    section(&mut out, "Response headers");
    let _ = writeln!(out, "{}", key_value_table(["Header", "Value"], &response.headers));

    if !meta.cookies.is_empty() {
        section(&mut out, "Cookies");
        let _ = writeln!(out, "{}", key_value_table(["Name", "Value"], &meta.cookies));
    }

    section(&mut out, "Security headers");
    let mut table = new_table(&["Header", "Present", "Value"]);
    for (name, finding) in &meta.security_analysis {
        table.add_row(vec![
            name.to_string(),
            yes_no(finding.present).to_string(),
            finding.value.clone().unwrap_or_default(),
        ]);
    }
    let _ = writeln!(out, "{}", table);

    section(&mut out, "Performance");
    let _ = writeln!(out, "Score: {}/100", meta.performance.score);
    bullets(&mut out, &meta.performance.recommendations);

    section(&mut out, "API health");
    let mut table = new_table(&["Check", "Status", "Message"]);
    for (name, check) in result.health.checks() {
        table.add_row(vec![name, check.status.as_str(), check.message.as_str()]);
    }
    let _ = writeln!(out, "{}", table);

    if !result.suggestions.is_empty() {
        section(&mut out, "Optimization suggestions");
        bullets(&mut out, &result.suggestions);
    }

    section(&mut out, "Body");
    out.push_str(&render_content(response));
    out.push('\n');
    out
}

fn render_content(response: &ResponseAnalysis) -> String {
    match &response.content {
        Content::Json(value) => format_as_table(value)
            .or_else(|| serde_json::to_string_pretty(value).ok())
            .unwrap_or_else(|| response.raw.clone()),
        Content::Xml(pretty) => pretty.clone(),
        Content::Raw(_) if response.metadata.binary => format!("<binary data, {}>", response.metadata.size),
        Content::Raw(text) => truncate(text, MAX_BODY_CHARS),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}\n... ({} more characters)", &text[..idx], text[idx..].chars().count()),
        None => text.to_string(),
    }
}
