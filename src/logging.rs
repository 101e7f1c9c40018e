//! Logging setup
//!
//! Logs go to stderr so stdout only carries the analysis output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "CURLSCOPE_LOG";

/// Filter directive for a `-v` count, with HTTP internals kept quieter
pub fn directive_for_verbosity(verbose: u8) -> String {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let deps = if verbose >= 3 { "debug" } else { "warn" };
    format!("curlscope={level},reqwest={deps},hyper={deps},hyper_util={deps},h2={deps}")
}

/// Install the global subscriber
///
/// `CURLSCOPE_LOG` wins, then an explicit `-v`, then the config file level.
/// Calling this twice is harmless; the second call is ignored.
pub fn init(verbose: u8, config_level: Option<&str>) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| match config_level {
            Some(level) if verbose == 0 => EnvFilter::try_new(level),
            _ => EnvFilter::try_new(directive_for_verbosity(verbose)),
        })
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
