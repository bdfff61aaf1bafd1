//! Command dispatch logic for npm-health

use super::common::init_logging;
use super::{
    CommonArgs, HealthArgs, PackageArgs, RepoArgs, print_criteria, process_activity, process_community, process_downloads, process_health,
    process_metadata, process_repo,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "npm-health", version, long_about = None)]
#[command(about = "Assess the health of npm packages from registry and GitHub data")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collect facts and ratings for a package
    Health(HealthArgs),
    /// Show the rules used to rate packages
    Criteria,
    /// Show normalized registry metadata for a package
    Metadata(PackageArgs),
    /// Show the weekly download trend for a package
    Downloads(PackageArgs),
    /// Show stars, forks and upkeep of a GitHub repository
    Repo(RepoArgs),
    /// Show which community files a GitHub repository provides
    Community(RepoArgs),
    /// Show issue totals and the last merged pull request of a GitHub repository
    Activity(RepoArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Errors
///
/// Returns an error if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);
    init_logging(cli.common.log_level);

    match &cli.command {
        Command::Health(args) => process_health(host, &cli.common, args).await,
        Command::Criteria => print_criteria(host),
        Command::Metadata(args) => process_metadata(host, &cli.common, args).await,
        Command::Downloads(args) => process_downloads(host, &cli.common, args).await,
        Command::Repo(args) => process_repo(host, &cli.common, args).await,
        Command::Community(args) => process_community(host, &cli.common, args).await,
        Command::Activity(args) => process_activity(host, &cli.common, args).await,
    }
}
