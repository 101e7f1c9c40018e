//! CLI argument definitions using clap

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{timeout_from_secs, OutputFormat, CONFIG_DIR_ENV};

/// curlscope - run a curl command and analyze the request and response
#[derive(Parser, Debug, Clone)]
#[command(name = "curlscope", version, about, long_about = None)]
pub struct Args {
    /// The curl command, quoted as one argument or given as separate words.
    /// Read from stdin when absent or '-'
    #[arg(value_name = "CURL_COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,

    /// Output format [default: pretty, or the config file's defaults.format]
    #[arg(long = "format", value_name = "FORMAT", value_enum)]
    pub format: Option<OutputFormat>,

    /// Only analyze the request, do not send it
    #[arg(long = "no-execute", action = ArgAction::SetTrue)]
    pub no_execute: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long = "timeout", value_name = "SECONDS", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Verbose logging. Use -vv for even more verbose
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    /// Directory holding config.toml
    #[arg(long = "config-dir", value_name = "DIR", env = CONFIG_DIR_ENV)]
    pub config_dir: Option<PathBuf>,
}

impl Args {
    /// The curl command as a single string, or `None` when it should come from stdin
    ///
    /// Separate words are re-joined, quoting any word that contains
    /// whitespace or quotes so the tokenizer sees the same words again.
    pub fn command_text(&self) -> Option<String> {
        match self.command.as_slice() {
            [] => None,
            [single] if single == "-" => None,
            [single] => Some(single.clone()),
            words => Some(words.iter().map(|w| quote_word(w)).collect::<Vec<_>>().join(" ")),
        }
    }
}

fn quote_word(word: &str) -> String {
    if word.is_empty() {
        return "''".to_string();
    }
    if !word.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"' || c == '\\') {
        return word.to_string();
    }
    // Single quotes cannot be escaped inside single quotes; close, escape, reopen
    format!("'{}'", word.replace('\'', r"'\''"))
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    timeout_from_secs(value).ok_or_else(|| "timeout must be a positive number of seconds".to_string())
}
