//! Commands that fetch a single fact set, without ratings.

use super::common::write_json;
use super::{CommonArgs, Host};
use crate::Result;
use crate::facts::RepoSpec;
use chrono::Utc;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct PackageArgs {
    /// Name of the npm package
    #[arg(value_name = "PACKAGE")]
    pub package: String,
}

#[derive(Parser, Debug)]
pub struct RepoArgs {
    /// Repository owner (user or organization)
    #[arg(value_name = "OWNER")]
    pub owner: String,

    /// Repository name
    #[arg(value_name = "REPO")]
    pub repo: String,
}

impl RepoArgs {
    fn spec(&self) -> RepoSpec {
        RepoSpec::new(&self.owner, &self.repo)
    }
}

/// Print normalized registry metadata for a package
pub async fn process_metadata<H: Host>(host: &mut H, common: &CommonArgs, args: &PackageArgs) -> Result<()> {
    let record = common.collector()?.package_record(&args.package, Utc::now()).await?;
    write_json(host, &record)
}

/// Print the weekly download trend for a package
pub async fn process_downloads<H: Host>(host: &mut H, common: &CommonArgs, args: &PackageArgs) -> Result<()> {
    let record = common.collector()?.download_record(&args.package, Utc::now()).await?;
    write_json(host, &record)
}

/// Print popularity and upkeep facts for a repository
pub async fn process_repo<H: Host>(host: &mut H, common: &CommonArgs, args: &RepoArgs) -> Result<()> {
    let record = common.collector()?.repo_record(&args.spec(), Utc::now()).await?;
    write_json(host, &record)
}

/// Print community file presence for a repository
pub async fn process_community<H: Host>(host: &mut H, common: &CommonArgs, args: &RepoArgs) -> Result<()> {
    let record = common.collector()?.community_record(&args.spec()).await?;
    write_json(host, &record)
}

/// Print issue totals and the last merged pull request for a repository
pub async fn process_activity<H: Host>(host: &mut H, common: &CommonArgs, args: &RepoArgs) -> Result<()> {
    let record = common.collector()?.activity_record(&args.spec()).await?;
    write_json(host, &record)
}
