use super::common::write_json;
use super::{ColorMode, CommonArgs, Host, OutputFormat};
use crate::Result;
use crate::facts::CollectError;
use crate::reports::generate_console;
use chrono::Utc;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct HealthArgs {
    /// Name of the npm package, e.g. `react` or `@types/node`
    #[arg(value_name = "PACKAGE")]
    pub package: String,

    /// How to print the report
    #[arg(long, value_name = "FORMAT", default_value = "console")]
    pub format: OutputFormat,

    /// Control when to use colors in console output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,
}

/// Collect all facts and ratings for a package and print the report
///
/// A package the registry does not know is reported on the error stream with exit
/// code 1. Every other failure is carried inside the printed report.
///
/// # Errors
///
/// Returns an error if the package does not exist, the collector cannot be built, or
/// the report cannot be written
pub async fn process_health<H: Host>(host: &mut H, common: &CommonArgs, args: &HealthArgs) -> Result<()> {
    let collector = common.collector()?;

    let report = match collector.collect(&args.package, Utc::now()).await {
        Ok(report) => report,
        Err(e @ CollectError::PackageNotFound(_)) => {
            let _ = writeln!(host.error(), "{e}");
            host.exit(1);
            return Err(e.into());
        }
    };

    match args.format {
        OutputFormat::Json => write_json(host, &report),
        OutputFormat::Console => {
            let mut console_output = String::new();
            generate_console(&report, args.color.use_colors(), &mut console_output)?;
            let _ = write!(host.output(), "{console_output}");
            Ok(())
        }
    }
}
