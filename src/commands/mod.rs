//! Command-line interface and orchestration for npm-health
//!
//! The `run` function parses the command line with clap, sets up logging, loads the
//! configuration and dispatches to one of the subcommands:
//!
//! - **health**: full report for a package, with all facts, ratings and tagged errors
//! - **criteria**: the rating rules as data, with no network access
//! - **metadata**, **downloads**: a single registry fact set for a package
//! - **repo**, **community**, **activity**: a single GitHub facet for a repository
//!
//! `health` prints a console rendering by default and pretty JSON with `--format json`.
//! Every other subcommand prints pretty JSON to the host's output stream.

mod common;
mod criteria;
mod facets;
mod health;
mod host;
mod run;

pub use common::{ColorMode, CommonArgs, LogLevel, OutputFormat};
pub use criteria::print_criteria;
pub use facets::{PackageArgs, RepoArgs, process_activity, process_community, process_downloads, process_metadata, process_repo};
pub use health::{HealthArgs, process_health};
pub use host::Host;
pub use run::run;
