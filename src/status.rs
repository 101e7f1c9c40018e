//! Exit status codes for the CLI
//!
//! - 0: the cycle completed (whatever the HTTP status)
//! - 1: any error (parse, DNS, connect, TLS, config)
//! - 2: the request timed out

use std::process::{ExitCode, Termination};

use crate::errors::{CurlscopeError, RequestError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
    Timeout = 2,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

impl Termination for ExitStatus {
    fn report(self) -> ExitCode {
        ExitCode::from(self as u8)
    }
}

impl ExitStatus {
    pub fn from_error(err: &CurlscopeError) -> Self {
        match err {
            CurlscopeError::Request(RequestError::Timeout(_)) => ExitStatus::Timeout,
            _ => ExitStatus::Error,
        }
    }
}
