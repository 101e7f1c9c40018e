//! cURL command parsing
//!
//! Turns a shell-quoted curl command line into a
//! [`ParsedRequest`](crate::models::ParsedRequest).
//!
//! # Example
//!
//! ```
//! use curlscope::curl::parse_curl_command;
//! use curlscope::http::Method;
//!
//! let req = parse_curl_command("curl -d 'x=1' https://api.example.com/users").unwrap();
//! assert_eq!(req.method, Method::Post);
//! assert_eq!(req.url, "https://api.example.com/users");
//! ```
//!
//! Only `-H/--header`, `-X/--request` and `-d/--data/--data-raw` carry state.
//! Every other flag is skipped by exactly one token, so the value of an
//! unrecognized argument-taking flag (`-o out.txt`, `-u user:pass`) is read as
//! a positional token and, being the last one, may replace the URL.

mod parser;
mod tokenizer;

pub use parser::parse_curl_command;
pub use tokenizer::tokenize;
