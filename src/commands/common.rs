//! Logging, configuration and output plumbing shared by all commands.

use super::Host;
use crate::Result;
use crate::config::Config;
use crate::facts::Collector;
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use ohno::IntoAppError;
use serde::Serialize;
use std::io::Write;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Whether output written to stdout should carry ANSI colors
    #[must_use]
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            }
        }
    }
}

/// How a report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Ratings grouped with the metrics behind them
    Console,

    /// The full report as pretty JSON
    Json,
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared by every command
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub github_token: Option<String>,

    /// Path to configuration file (default is `npm-health.toml` in the current directory)
    #[arg(long, short = 'c', value_name = "PATH", global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

impl CommonArgs {
    /// Load the configuration and build a collector from it
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the HTTP clients cannot be built
    pub fn collector(&self) -> Result<Collector> {
        let cwd = std::env::current_dir().into_app_err("determining the current directory")?;
        let base_dir = Utf8PathBuf::try_from(cwd).into_app_err("current directory is not valid UTF-8")?;
        let config = Config::load(&base_dir, self.config.as_ref())?;

        if self.github_token.is_none() {
            log::info!("No GitHub token configured, requests are subject to anonymous rate limits");
        }

        Collector::new(&config, self.github_token.as_deref())
    }
}

pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // A logger may already be installed when several commands run in one process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

/// Print a value as pretty JSON followed by a newline
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or the output cannot be written
pub fn write_json<H: Host, T: Serialize + ?Sized>(host: &mut H, value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value).into_app_err("serializing output")?;
    text.push('\n');
    host.output().write_all(text.as_bytes()).into_app_err("writing output")?;
    Ok(())
}
