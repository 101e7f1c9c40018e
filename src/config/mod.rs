//! Configuration loading

mod config;

pub use config::{
    ClientConfig, Config, DefaultsConfig, LoggingConfig, OutputFormat, CONFIG_DIR_ENV,
    timeout_from_secs,
};
