use clap::Parser;
use std::io::Read;
use tracing::debug;

use crate::analysis::analyze_request;
use crate::cli::Args;
use crate::client::Stopwatch;
use crate::config::{Config, OutputFormat};
use crate::curl::parse_curl_command;
use crate::cycle::analyze;
use crate::errors::{CurlscopeError, Result};
use crate::history::AnalysisRecord;
use crate::logging;
use crate::output::{render, Report};
use crate::status::ExitStatus;

/// Main entry point for the CLI.
///
/// Parses arguments, loads configuration, sets up logging and runs one
/// analysis cycle, printing the result to stdout.
pub fn run(args: Vec<String>) -> ExitStatus {
    let parsed = match Args::try_parse_from(&args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    let config = match Config::load(parsed.config_dir.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: Failed to load config: {}", e);
            Config::default()
        }
    };

    logging::init(parsed.verbose, config.logging.level.as_deref());
    debug!(config_dir = %config.config_dir.display(), "Configuration loaded");

    let command = match read_command(&parsed) {
        Ok(command) => command,
        Err(e) => return handle_error(e),
    };
    let format = parsed.format.or(config.defaults.format).unwrap_or_default();

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => return handle_error(e.into()),
    };

    let clock = Stopwatch::start();
    match runtime.block_on(program(&parsed, &config, &command, format, &clock)) {
        Ok(output) => {
            println!("{}", output);
            ExitStatus::Success
        }
        Err(e) => {
            if format == OutputFormat::Record {
                print_failure_record(&command, &e, &clock);
            }
            handle_error(e)
        }
    }
}

pub async fn program(
    args: &Args,
    config: &Config,
    command: &str,
    format: OutputFormat,
    clock: &Stopwatch,
) -> Result<String> {
    if args.no_execute {
        let parsed = parse_curl_command(command)?;
        let analysis = analyze_request(&parsed);
        return render(
            Report::Request { command, parsed: &parsed, analysis: &analysis, elapsed: clock.total() },
            format,
        );
    }

    let mut options = config.executor_options();
    if let Some(timeout) = args.timeout {
        options.timeout = timeout;
    }

    let result = analyze(command, &options).await?;
    render(Report::Full { command, result: &result, elapsed: clock.total() }, format)
}

/// The curl command from the arguments, or all of stdin
fn read_command(args: &Args) -> Result<String> {
    if let Some(command) = args.command_text() {
        return Ok(command);
    }

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    if input.trim().is_empty() {
        return Err(CurlscopeError::Argument(
            "no curl command given (pass it as an argument or on stdin)".to_string(),
        ));
    }
    Ok(input)
}

fn print_failure_record(command: &str, error: &CurlscopeError, clock: &Stopwatch) {
    let parsed = parse_curl_command(command).ok();
    let request_info = parsed.as_ref().map(analyze_request);
    let record = AnalysisRecord::failed(command, parsed.as_ref(), request_info, error, clock.total());
    if let Ok(json) = serde_json::to_string_pretty(&record) {
        println!("{}", json);
    }
}

fn handle_error(error: CurlscopeError) -> ExitStatus {
    eprintln!("Error: {}", error);
    ExitStatus::from_error(&error)
}
