//! HTTP execution and timing

pub mod executor;
pub mod timing;

pub use executor::{execute, ExecutorOptions, RawResponse, DEFAULT_TIMEOUT, MAX_REDIRECTS, USER_AGENT_STRING};
pub use timing::{Millis, PhaseTimings, Stopwatch};
