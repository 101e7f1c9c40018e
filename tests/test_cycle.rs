//! Full cycle tests against a mock server
mod common;

use std::io::Write;
use std::time::Duration;

use curlscope::analysis::Grade;
use curlscope::client::ExecutorOptions;
use curlscope::response::HealthStatus;
use curlscope::{
    analyze, execute_and_analyze, parse_curl_command, AnalysisRecord, Content, CurlscopeError,
    HistoryStore, RequestError,
};
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::DUMMY_URL;

fn options() -> ExecutorOptions {
    ExecutorOptions {
        timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

// ============================================================================
// Content decoding
// ============================================================================

#[tokio::test]
async fn test_json_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"ok":true}"#, "application/json"))
        .mount(&server)
        .await;

    let command = format!("curl {}/ok", server.uri());
    let result = analyze(&command, &options()).await.unwrap();
    let response = &result.response;

    assert_eq!(response.status_code, 200);
    assert_eq!(response.reason, "OK");
    assert_eq!(response.content, Content::Json(json!({"ok": true})));
    assert_eq!(response.raw, r#"{"ok":true}"#);
    assert_eq!(response.metadata.size, "11.00 B");
    assert_eq!(response.metadata.size_bytes, 11);
    assert_eq!(response.metadata.redirect_count, 0);
    assert!(response.metadata.timing.total_time.as_f64() >= 0.0);
    assert!(response.metadata.timing.tls_handshake.is_none());
    assert!(response.content_type.starts_with("application/json"));

    // Plain http with no auth and no security headers
    assert_eq!(result.request.security_score.score, 10);
    assert_eq!(result.request.security_score.grade, Grade::F);
}

#[tokio::test]
async fn test_invalid_json_falls_back_to_raw() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{broken", "application/json"))
        .mount(&server)
        .await;

    let req = parse_curl_command(&format!("curl {}/", server.uri())).unwrap();
    let response = execute_and_analyze(&req, &options()).await.unwrap();
    assert_eq!(response.content, Content::Raw("{broken".to_string()));
}

#[tokio::test]
async fn test_xml_is_pretty_printed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<root><item>1</item></root>", "application/xml"))
        .mount(&server)
        .await;

    let req = parse_curl_command(&format!("curl {}/feed", server.uri())).unwrap();
    let response = execute_and_analyze(&req, &options()).await.unwrap();
    match &response.content {
        Content::Xml(pretty) => {
            assert!(pretty.contains("<item>1</item>"));
            assert!(pretty.lines().count() > 1);
        }
        other => panic!("expected XML content, got {:?}", other),
    }
}

#[tokio::test]
async fn test_gzip_body_is_decompressed() {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(br#"{"compressed":true}"#).unwrap();
    let gz = encoder.finish().unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(gz, "application/json")
                .insert_header("content-encoding", "gzip"),
        )
        .mount(&server)
        .await;

    let req = parse_curl_command(&format!("curl -H 'Accept-Encoding: gzip' {}/", server.uri())).unwrap();
    let response = execute_and_analyze(&req, &options()).await.unwrap();
    assert_eq!(response.content, Content::Json(json!({"compressed": true})));
    assert!(response.metadata.performance.is_compressed);
    assert!(!response
        .metadata
        .performance
        .recommendations
        .iter()
        .any(|r| r.contains("gzip")));
}

// ============================================================================
// Request forwarding
// ============================================================================

#[tokio::test]
async fn test_body_and_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items"))
        .and(header("x-api-key", "secret-key"))
        .and(body_string("name=widget"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let command = format!(
        "curl -H 'X-API-Key: secret-key' -d 'name=widget' {}/items",
        server.uri()
    );
    let result = analyze(&command, &options()).await.unwrap();
    assert_eq!(result.response.status_code, 201);
    assert_eq!(result.parsed.method.as_str(), "POST");
    assert_eq!(result.request.authentication.auth_type.as_deref(), Some("API Key"));
}

#[tokio::test]
async fn test_explicit_method_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let command = format!("curl -X PUT -d 'x=1' {}/thing", server.uri());
    let result = analyze(&command, &options()).await.unwrap();
    assert_eq!(result.response.status_code, 204);
}

// ============================================================================
// Response metadata
// ============================================================================

#[tokio::test]
async fn test_security_headers_and_cookies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Security-Policy", "default-src 'self'")
                .insert_header("X-Frame-Options", "DENY")
                .append_header("Set-Cookie", "session=abc123; HttpOnly")
                .append_header("Set-Cookie", "theme=dark")
                .set_body_raw("hello", "text/plain"),
        )
        .mount(&server)
        .await;

    let req = parse_curl_command(&format!("curl {}/", server.uri())).unwrap();
    let response = execute_and_analyze(&req, &options()).await.unwrap();
    let security = &response.metadata.security_analysis;

    assert!(security["Content-Security-Policy"].present);
    assert_eq!(security["X-Frame-Options"].value.as_deref(), Some("DENY"));
    assert!(!security["Strict-Transport-Security"].present);
    assert_eq!(response.metadata.cookies.get("session").map(String::as_str), Some("abc123"));
    assert_eq!(response.metadata.cookies.get("theme").map(String::as_str), Some("dark"));
    assert_eq!(response.content, Content::Raw("hello".to_string()));
}

#[tokio::test]
async fn test_redirects_are_followed_and_counted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/middle"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/middle"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/new"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"moved": true})))
        .mount(&server)
        .await;

    let command = format!("curl {}/old", server.uri());
    let result = analyze(&command, &options()).await.unwrap();
    assert_eq!(result.response.status_code, 200);
    assert_eq!(result.response.metadata.redirect_count, 2);
    assert!(result.response.metadata.final_url.ends_with("/new"));
    assert!(result
        .suggestions
        .iter()
        .any(|s| s.contains("redirects detected")));
}

#[tokio::test]
async fn test_redirect_loop_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/loop"))
        .mount(&server)
        .await;

    let req = parse_curl_command(&format!("curl {}/loop", server.uri())).unwrap();
    let err = execute_and_analyze(&req, &options()).await.unwrap_err();
    assert!(matches!(err, RequestError::Transport(_)), "{:?}", err);
}

#[tokio::test]
async fn test_health_and_suggestions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("ETag", "\"v1\"")
                .set_body_raw("missing", "text/plain"),
        )
        .mount(&server)
        .await;

    let command = format!("curl {}/gone", server.uri());
    let result = analyze(&command, &options()).await.unwrap();

    assert_eq!(result.health.reliability.status, HealthStatus::Warning);
    assert_eq!(result.health.security.status, HealthStatus::Poor);
    assert_eq!(result.health.security.message, "Missing 5 security headers");
    assert!(result
        .health
        .best_practices
        .recommendations
        .contains(&"Add Cache-Control header for better caching".to_string()));
    assert!(result
        .suggestions
        .contains(&"Add 'Accept-Encoding' header to enable compression".to_string()));
    assert!(result
        .suggestions
        .contains(&"Implement ETag-based caching to reduce bandwidth".to_string()));
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_timeout_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let opts = ExecutorOptions {
        timeout: Duration::from_millis(300),
        ..Default::default()
    };
    let req = parse_curl_command(&format!("curl {}/slow", server.uri())).unwrap();
    let err = execute_and_analyze(&req, &opts).await.unwrap_err();
    assert!(matches!(err, RequestError::Timeout(_)), "{:?}", err);
}

#[tokio::test]
async fn test_dns_failure() {
    let err = analyze(&format!("curl {}/", DUMMY_URL), &options()).await.unwrap_err();
    match err {
        CurlscopeError::Request(RequestError::Dns { host, .. }) => {
            assert_eq!(host, "this-should.never-resolve.invalid");
        }
        other => panic!("expected DNS error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_parse_error_stops_the_cycle() {
    let err = analyze("wget http://example.com", &options()).await.unwrap_err();
    assert!(matches!(err, CurlscopeError::Parse(_)));
}

// ============================================================================
// History
// ============================================================================

#[tokio::test]
async fn test_history_compare() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Version", "1")
                .insert_header("X-Only-A", "yes")
                .set_body_raw("aaaa", "text/plain"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(
            ResponseTemplate::new(500)
                .insert_header("X-Version", "2")
                .set_body_raw("bb", "text/plain"),
        )
        .mount(&server)
        .await;

    let mut store = HistoryStore::new();
    for p in ["/a", "/b"] {
        let command = format!("curl {}{}", server.uri(), p);
        let result = analyze(&command, &options()).await.unwrap();
        let elapsed = result.response.metadata.timing.total_time;
        store.push(AnalysisRecord::new(&command, &result, elapsed));
    }

    let records: Vec<_> = store.entries().collect();
    assert_eq!(records.len(), 2);
    let cmp = HistoryStore::compare(records[0], records[1]);
    assert!(!cmp.status_code_match);
    assert!(cmp.header_differences.only_in_first.contains(&"x-only-a".to_string()));
    assert!(cmp.header_differences.different_values.contains(&"x-version".to_string()));
    assert_eq!(cmp.content_size_difference, Some(-2));

    let json = serde_json::to_value(store.last().unwrap()).unwrap();
    assert_eq!(json["status_code"], 500);
    assert_eq!(json["method"], "GET");
    assert_eq!(json["success"], true);
    assert!(json["endpoint"].as_str().unwrap().ends_with("/b"));
}
