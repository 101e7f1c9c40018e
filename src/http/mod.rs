//! HTTP protocol types
//!
//! Provides the method type shared by the parser, analyzers and executor.

mod method;

pub use method::*;
