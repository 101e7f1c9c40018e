//! Phase timing instrumentation
//!
//! Durations are kept as floating point milliseconds and serialize as
//! fixed-point strings such as `"12.34ms"`.

use serde::{Serialize, Serializer};
use std::fmt;
use std::time::{Duration, Instant};

/// Share of the request time attributed to the TLS handshake
///
/// The handshake is not measured on its own; for https requests it is
/// approximated from the request round-trip.
pub const TLS_SHARE_OF_REQUEST: f64 = 0.6;

/// A duration in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Millis(pub f64);

impl Millis {
    pub fn from_duration(d: Duration) -> Self {
        Millis(d.as_secs_f64() * 1000.0)
    }

    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}ms", self.0)
    }
}

impl Serialize for Millis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Measured latency of each phase of a request
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PhaseTimings {
    pub session_setup: Millis,
    pub dns_lookup: Millis,
    /// Send until the response headers arrived, DNS included
    pub time_to_first_byte: Millis,
    /// Send until the full body was read
    pub request_time: Millis,
    /// Approximation, see [`TLS_SHARE_OF_REQUEST`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_handshake: Option<Millis>,
    pub processing_time: Millis,
    pub total_time: Millis,
}

/// Stopwatch that records phases against a single start point
#[derive(Debug)]
pub struct Stopwatch {
    start: Instant,
    lap: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        let now = Instant::now();
        Self { start: now, lap: now }
    }

    /// Time since the previous lap (or the start), then begin a new lap
    pub fn lap(&mut self) -> Millis {
        let now = Instant::now();
        let elapsed = now.duration_since(self.lap);
        self.lap = now;
        Millis::from_duration(elapsed)
    }

    /// Time since the start
    pub fn total(&self) -> Millis {
        Millis::from_duration(self.start.elapsed())
    }
}

/// Approximate TLS handshake time for a request
pub fn approximate_tls(is_https: bool, request_time: Millis) -> Option<Millis> {
    is_https.then(|| Millis(request_time.0 * TLS_SHARE_OF_REQUEST))
}
