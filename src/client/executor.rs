//! HTTP request execution with phase timing
//!
//! Phases run strictly in sequence: client setup, explicit DNS resolution,
//! then the request round-trip. A DNS failure aborts before anything is sent.
//! There are no retries.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use reqwest::Client;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::{Host, Url};

use super::timing::{approximate_tls, Millis, PhaseTimings, Stopwatch};
use crate::errors::RequestError;
use crate::models::ParsedRequest;

pub const USER_AGENT_STRING: &str = concat!("curlscope/", env!("CARGO_PKG_VERSION"));

/// Total time allowed for DNS plus the request round-trip
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Redirects followed before giving up
pub const MAX_REDIRECTS: usize = 10;

/// Knobs for a single execution
#[derive(Debug, Clone)]
pub struct ExecutorOptions {
    pub timeout: Duration,
    pub user_agent: String,
    pub max_redirects: usize,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT_STRING.to_string(),
            max_redirects: MAX_REDIRECTS,
        }
    }
}

/// Response as received, before any body processing
#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub headers: HeaderMap,
    /// Body bytes exactly as sent by the server (possibly compressed)
    pub body: Vec<u8>,
    pub final_url: String,
    pub redirect_count: usize,
    pub is_https: bool,
    /// Setup, DNS and request phases; processing and total are filled in later
    pub timings: PhaseTimings,
    pub(crate) clock: Stopwatch,
}

impl RawResponse {
    /// First value of a header, if it is valid text
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Execute a parsed request and measure each phase
pub async fn execute(
    request: &ParsedRequest,
    options: &ExecutorOptions,
) -> Result<RawResponse, RequestError> {
    let mut clock = Stopwatch::start();
    let timeout_secs = options.timeout.as_secs_f64();

    let url = Url::parse(&request.url)
        .map_err(|e| RequestError::InvalidRequest(format!("Invalid URL {}: {}", request.url, e)))?;
    let redirects = Arc::new(AtomicUsize::new(0));
    let client = build_client(options, Arc::clone(&redirects))?;
    let headers = build_headers(request)?;
    let method: reqwest::Method = (&request.method)
        .try_into()
        .map_err(RequestError::InvalidRequest)?;
    let session_setup = clock.lap();
    debug!(%session_setup, "Client ready");

    let remaining = options.timeout.saturating_sub(clock_elapsed(&clock));
    tokio::time::timeout(remaining, resolve_host(&url))
        .await
        .map_err(|_| RequestError::Timeout(timeout_secs))??;
    let dns_lookup = clock.lap();
    debug!(%dns_lookup, host = url.host_str().unwrap_or(""), "Host resolved");

    let remaining = options.timeout.saturating_sub(clock_elapsed(&clock));
    let mut builder = client
        .request(method, url.clone())
        .headers(headers)
        .timeout(remaining);
    if let Some(body) = &request.body {
        builder = builder.body(body.clone());
    }

    let send_clock = Stopwatch::start();
    let response = builder
        .send()
        .await
        .map_err(|e| RequestError::from_reqwest(&e, timeout_secs))?;
    let headers_received = send_clock.total();

    let status = response.status();
    let response_headers = response.headers().clone();
    let final_url = response.url().to_string();
    let body = response
        .bytes()
        .await
        .map_err(|e| RequestError::from_reqwest(&e, timeout_secs))?
        .to_vec();
    let request_time = clock.lap();
    let is_https = url.scheme() == "https";

    let timings = PhaseTimings {
        session_setup,
        dns_lookup,
        time_to_first_byte: Millis(dns_lookup.0 + headers_received.0),
        request_time,
        tls_handshake: approximate_tls(is_https, request_time),
        processing_time: Millis::default(),
        total_time: clock.total(),
    };

    debug!(
        status = status.as_u16(),
        bytes = body.len(),
        %request_time,
        "Response received"
    );

    Ok(RawResponse {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("").to_string(),
        headers: response_headers,
        body,
        final_url,
        redirect_count: redirects.load(Ordering::SeqCst),
        is_https,
        timings,
        clock,
    })
}

fn clock_elapsed(clock: &Stopwatch) -> Duration {
    Duration::from_secs_f64(clock.total().as_f64() / 1000.0)
}

/// Build a client for one request
///
/// No compression is negotiated on the caller's behalf, so the server's
/// `content-encoding` reaches the analysis untouched.
fn build_client(options: &ExecutorOptions, redirects: Arc<AtomicUsize>) -> Result<Client, RequestError> {
    let max_redirects = options.max_redirects;
    let policy = Policy::custom(move |attempt| {
        // `previous` holds every URL requested so far, the first one included
        let hops = attempt.previous().len();
        if hops > max_redirects {
            attempt.error(format!("too many redirects (max {})", max_redirects))
        } else {
            redirects.store(hops, Ordering::SeqCst);
            attempt.follow()
        }
    });

    Client::builder()
        .user_agent(options.user_agent.clone())
        .timeout(options.timeout)
        .redirect(policy)
        .cookie_store(true)
        .referer(false)
        .build()
        .map_err(|e| RequestError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))
}

fn build_headers(request: &ParsedRequest) -> Result<HeaderMap, RequestError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &request.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| RequestError::InvalidRequest(format!("Invalid header name: {}", name)))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| RequestError::InvalidRequest(format!("Invalid value for header {}", name)))?;
        headers.insert(header_name, header_value);
    }
    Ok(headers)
}

/// Resolve the request host ahead of the call
///
/// IP literals need no lookup. Any resolver failure, or an empty answer, is
/// reported as a DNS error.
async fn resolve_host(url: &Url) -> Result<(), RequestError> {
    let domain = match url.host() {
        Some(Host::Domain(domain)) => domain.to_string(),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => return Ok(()),
        None => return Err(RequestError::InvalidRequest(format!("URL has no host: {}", url))),
    };
    let port = url.port_or_known_default().unwrap_or(80);

    let dns_error = |message: String| RequestError::Dns { host: domain.clone(), message };
    let mut addrs = tokio::net::lookup_host((domain.as_str(), port))
        .await
        .map_err(|e| dns_error(e.to_string()))?;
    match addrs.next() {
        Some(_) => Ok(()),
        None => Err(dns_error("no addresses found".to_string())),
    }
}
