//! Request model shared by the parser, analyzers and executor

pub mod request;

pub use request::{HeadersDict, ParsedRequest};
