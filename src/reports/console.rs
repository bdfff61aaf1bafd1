use crate::Result;
use crate::facts::HealthReport;
use crate::facts::hosting::ActivityRecord;
use crate::facts::time_utils::{parse_timestamp, whole_days_between};
use crate::ratings::{Rating, RatingCategory};
use chrono::{DateTime, Utc};
use core::fmt::Write;
use owo_colors::OwoColorize;

const NOT_AVAILABLE: &str = "n/a";
const PRESENT: &str = "✓";
const ABSENT: &str = "✗";

const DAYS_PER_MONTH: u64 = 30;
const DAYS_PER_YEAR: u64 = 365;

type Row = (String, String);

/// Render a health report for the terminal
///
/// Relative times ("3 days ago") are measured from the report's `retrieved_at`, so the
/// same report always renders the same way.
pub fn generate<W: Write>(report: &HealthReport, use_colors: bool, writer: &mut W) -> Result<()> {
    write_header(report, use_colors, writer)?;

    for (category, rating) in report.health_ratings.iter() {
        writeln!(writer)?;
        let title = category_title(category);
        let rating = rating_label(rating, use_colors);
        if use_colors {
            writeln!(writer, "{}: {rating}", title.bold())?;
        } else {
            writeln!(writer, "{title}: {rating}")?;
        }

        write_rows(&category_metrics(category, report), writer)?;
    }

    if let Some(downloads) = &report.downloads_data
        && !downloads.weekly_trend.is_empty()
    {
        writeln!(writer)?;
        write_heading("Weekly Downloads", use_colors, writer)?;
        let rows: Vec<Row> = downloads
            .weekly_trend
            .iter()
            .map(|week| (format!("{} to {}", week.start, week.end), format_count(week.downloads)))
            .collect();
        write_rows(&rows, writer)?;
    }

    if !report.errors.is_empty() {
        writeln!(writer)?;
        write_heading("Errors", use_colors, writer)?;
        for error in &report.errors {
            writeln!(writer, "  {error}")?;
        }
    }

    Ok(())
}

fn write_header<W: Write>(report: &HealthReport, use_colors: bool, writer: &mut W) -> Result<()> {
    let Some(package) = &report.npm_data else {
        write_heading(&report.package_name, use_colors, writer)?;
        writeln!(writer, "Registry metadata unavailable")?;
        return Ok(());
    };

    write_heading(&format!("{} v{}", package.name, package.latest_version), use_colors, writer)?;
    if !package.description.is_empty() {
        writeln!(writer, "{}", package.description)?;
    }
    writeln!(writer, "{}", package.npm_url)?;

    Ok(())
}

fn write_heading<W: Write>(text: &str, use_colors: bool, writer: &mut W) -> Result<()> {
    if use_colors {
        writeln!(writer, "{}", text.bold())?;
    } else {
        writeln!(writer, "{text}")?;
    }
    Ok(())
}

fn write_rows<W: Write>(rows: &[Row], writer: &mut W) -> Result<()> {
    let width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
    for (label, value) in rows {
        writeln!(writer, "  {label:<width$} : {value}")?;
    }
    Ok(())
}

const fn category_title(category: RatingCategory) -> &'static str {
    match category {
        RatingCategory::CommunityAdoption => "Community Adoption",
        RatingCategory::MaintenanceFrequency => "Maintenance Frequency",
        RatingCategory::ReleaseManagement => "Release Management",
        RatingCategory::ImplementationFootprint => "Implementation Footprint",
        RatingCategory::DocumentationCompleteness => "Documentation Completeness",
    }
}

fn rating_label(rating: Rating, use_colors: bool) -> String {
    let label = rating.to_string();
    if !use_colors {
        return label;
    }

    match rating {
        Rating::Strong | Rating::Regular | Rating::Thorough | Rating::Lightweight => label.green().bold().to_string(),
        Rating::Moderate | Rating::Occasional | Rating::Adequate => label.yellow().bold().to_string(),
        Rating::Limited | Rating::Infrequent | Rating::Sparse | Rating::Heavy => label.red().bold().to_string(),
        Rating::Unavailable => label.dimmed().to_string(),
    }
}

/// The facts each category's rating was derived from
fn category_metrics(category: RatingCategory, report: &HealthReport) -> Vec<Row> {
    let now = report.retrieved_at;
    let package = report.npm_data.as_ref();
    let downloads = report.downloads_data.as_ref();
    let repo = report.github_data.repo.as_ref();
    let health = report.github_data.health.as_ref();
    let activity = report.github_data.activity.as_ref();

    match category {
        RatingCategory::CommunityAdoption => vec![
            row("Monthly downloads", downloads.map(|d| format_count(d.monthly_downloads))),
            row("GitHub stars", repo.map(|r| format_compact(r.stars))),
            row("GitHub forks", repo.map(|r| format_compact(r.forks))),
        ],
        RatingCategory::MaintenanceFrequency => vec![
            row("Maintained", repo.map(|r| flag(r.is_maintained))),
            row(
                "Last code push",
                repo.and_then(|r| r.last_code_push.as_deref())
                    .and_then(parse_timestamp)
                    .map(|pushed| format_days_ago(whole_days_between(pushed, now))),
            ),
            row(
                "Issues",
                activity.map(|a| format!("{} open / {} closed", format_compact(a.open_issues_count), format_compact(a.closed_issues_count))),
            ),
            row("Last PR merged", activity.and_then(|a| format_last_merge(a, now))),
            row("Last PR", activity.and_then(|a| a.last_pr_url.clone())),
        ],
        RatingCategory::ReleaseManagement => vec![
            row("Days since last release", package.and_then(|p| p.days_since_last_release).map(|d| d.to_string())),
            row("Releases last year", package.map(|p| p.releases_last_year.to_string())),
            row("Maintainers", package.map(|p| p.maintainers_count.to_string())),
            row("Archived", repo.map(|r| flag(r.is_archived))),
        ],
        RatingCategory::ImplementationFootprint => vec![
            row("Bundle size", package.map(|p| p.bundle_size.clone())),
            row("Dependencies", package.map(|p| p.dependencies_count.to_string())),
        ],
        RatingCategory::DocumentationCompleteness => vec![
            row("Health score", health.map(|h| format!("{}%", h.health_percentage))),
            row("README", health.map(|h| flag(h.has_readme))),
            row("License", health.map(|h| flag(h.has_license))),
            row("Contributing guide", health.map(|h| flag(h.has_contributing))),
            row("Code of conduct", health.map(|h| flag(h.has_code_of_conduct))),
        ],
    }
}

fn row(label: &str, value: Option<String>) -> Row {
    (label.to_string(), value.unwrap_or_else(|| NOT_AVAILABLE.to_string()))
}

fn flag(value: bool) -> String {
    let mark = if value { PRESENT } else { ABSENT };
    mark.to_string()
}

/// `1234567` → `1,234,567`
fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

/// `12345` → `12.3K`, `2500000` → `2.5M`
#[expect(clippy::cast_precision_loss, reason = "one decimal of display precision")]
fn format_compact(value: u64) -> String {
    match value {
        v if v >= 1_000_000 => format!("{:.1}M", v as f64 / 1_000_000.0),
        v if v >= 1_000 => format!("{:.1}K", v as f64 / 1_000.0),
        v => v.to_string(),
    }
}

fn format_days_ago(days: u64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "1 day ago".to_string(),
        d if d < DAYS_PER_MONTH => format!("{d} days ago"),
        d if d < DAYS_PER_YEAR => plural_ago(d / DAYS_PER_MONTH, "month"),
        d => plural_ago(d / DAYS_PER_YEAR, "year"),
    }
}

fn plural_ago(count: u64, unit: &str) -> String {
    if count == 1 { format!("1 {unit} ago") } else { format!("{count} {unit}s ago") }
}

/// Merge age in calendar days, plus how long the pull request was open when known
fn format_last_merge(activity: &ActivityRecord, now: DateTime<Utc>) -> Option<String> {
    let merged = parse_timestamp(activity.last_pr_merged_at.as_deref()?)?;
    let days = u64::try_from((now.date_naive() - merged.date_naive()).num_days()).unwrap_or(0);
    let ago = format_days_ago(days);

    Some(match &activity.last_pr_merge_time {
        Some(open_for) => format!("{ago} ({} after creation)", open_for.human_readable),
        None => ago,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::hosting::{CommunityHealthRecord, RepoRecord, TimeDifference};
    use crate::facts::registry::{DownloadRecord, PackageRecord, WeekBucket};
    use crate::facts::{ErrorTag, GithubData, ReportError};
    use crate::ratings::{RatingInputs, compute_ratings};

    fn now() -> DateTime<Utc> {
        parse_timestamp("2025-06-10T12:00:00Z").unwrap()
    }

    fn package() -> PackageRecord {
        PackageRecord {
            name: "widget".into(),
            latest_version: "3.0.0".into(),
            description: "Widgets for everyone".into(),
            license: "MIT".into(),
            homepage: String::new(),
            bundle_size: "45.20 KB".into(),
            dependencies_count: 1,
            repository: "https://github.com/acme/widget".into(),
            npm_url: "https://www.npmjs.com/package/widget".into(),
            last_release: Some("2025-06-01T00:00:00Z".into()),
            days_since_last_release: Some(9),
            releases_last_year: 12,
            maintainers_count: 2,
        }
    }

    fn full_github() -> GithubData {
        GithubData {
            repo: Some(RepoRecord {
                stars: 12_000,
                forks: 900,
                last_code_push: Some("2025-06-08T00:00:00Z".into()),
                is_archived: false,
                is_maintained: true,
            }),
            health: Some(CommunityHealthRecord {
                health_percentage: 85,
                has_readme: true,
                has_license: true,
                has_contributing: false,
                has_code_of_conduct: true,
            }),
            activity: Some(ActivityRecord {
                open_issues_count: 12,
                closed_issues_count: 1_500,
                total_issues_count: 1_512,
                last_pr_merged_at: Some("2025-06-07T23:00:00Z".into()),
                last_pr_info: Some("created 5 hours ago".into()),
                last_pr_url: Some("https://github.com/acme/widget/pull/314".into()),
                last_pr_merge_time: Some(TimeDifference {
                    days: 0.21,
                    human_readable: "5 hours".into(),
                }),
            }),
        }
    }

    fn report(package: Option<PackageRecord>, downloads: Option<DownloadRecord>, github_data: GithubData, errors: Vec<ReportError>) -> HealthReport {
        let health_ratings = compute_ratings(
            &RatingInputs {
                package: package.as_ref(),
                downloads: downloads.as_ref(),
                github: &github_data,
            },
            now(),
        );

        HealthReport {
            package_name: "widget".into(),
            retrieved_at: now(),
            success: package.is_some(),
            npm_data: package,
            downloads_data: downloads,
            github_data,
            health_ratings,
            errors,
        }
    }

    fn render(report: &HealthReport) -> String {
        let mut output = String::new();
        generate(report, false, &mut output).unwrap();
        output
    }

    #[test]
    fn test_full_report_groups_metrics_under_ratings() {
        let downloads = DownloadRecord {
            monthly_downloads: 1_120_000,
            weekly_trend: vec![WeekBucket {
                start: "2025-06-03".into(),
                end: "2025-06-09".into(),
                downloads: 280_000,
            }],
        };
        let output = render(&report(Some(package()), Some(downloads), full_github(), Vec::new()));

        assert!(output.starts_with("widget v3.0.0\nWidgets for everyone\nhttps://www.npmjs.com/package/widget\n"));
        assert!(output.contains("\nCommunity Adoption: Strong\n  Monthly downloads : 1,120,000\n  GitHub stars      : 12.0K\n  GitHub forks      : 900\n"));
        assert!(output.contains("\nMaintenance Frequency: Regular\n"));
        assert!(output.contains("  Last code push : 2 days ago\n"));
        assert!(output.contains("  Issues         : 12 open / 1.5K closed\n"));
        assert!(output.contains("  Last PR merged : 3 days ago (5 hours after creation)\n"));
        assert!(output.contains("  Last PR        : https://github.com/acme/widget/pull/314\n"));
        assert!(output.contains("\nRelease Management: Regular\n  Days since last release : 9\n"));
        assert!(output.contains("\nImplementation Footprint: Lightweight\n  Bundle size  : 45.20 KB\n  Dependencies : 1\n"));
        assert!(output.contains("\nDocumentation Completeness: Thorough\n  Health score       : 85%\n  README             : ✓\n"));
        assert!(output.contains("  Contributing guide : ✗\n"));
        assert!(output.contains("\nWeekly Downloads\n  2025-06-03 to 2025-06-09 : 280,000\n"));
        assert!(!output.contains("Errors"));
    }

    #[test]
    fn test_categories_follow_rating_order() {
        let output = render(&report(Some(package()), None, full_github(), Vec::new()));
        let positions: Vec<usize> = [
            "Community Adoption:",
            "Maintenance Frequency:",
            "Release Management:",
            "Implementation Footprint:",
            "Documentation Completeness:",
        ]
        .iter()
        .map(|title| output.find(title).unwrap())
        .collect();

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_missing_sources_render_as_not_available() {
        let output = render(&report(
            Some(package()),
            None,
            GithubData::default(),
            vec![ReportError::bare(ErrorTag::NoGithubRepository)],
        ));

        assert!(output.contains("\nMaintenance Frequency: Unavailable\n  Maintained     : n/a\n"));
        assert!(output.contains("  Monthly downloads : n/a\n"));
        assert!(output.contains("\nDocumentation Completeness: Unavailable\n  Health score       : n/a\n"));
        assert!(output.contains("  Archived                : n/a\n"));
        assert!(!output.contains("Weekly Downloads"));
        assert!(output.ends_with("\nErrors\n  no_github_repository\n"));
    }

    #[test]
    fn test_header_without_registry_metadata() {
        let output = render(&report(
            None,
            None,
            GithubData::default(),
            vec![ReportError::new(ErrorTag::NpmMetadataError, "registry request failed with status 503: down")],
        ));

        assert!(output.starts_with("widget\nRegistry metadata unavailable\n"));
        assert!(output.contains("\nRelease Management: Unavailable\n"));
        assert!(output.contains("  npm_metadata_error: registry request failed with status 503: down\n"));
    }

    #[test]
    fn test_colors_only_when_requested() {
        let report = report(Some(package()), None, full_github(), Vec::new());
        let mut colored = String::new();
        generate(&report, true, &mut colored).unwrap();

        assert!(colored.contains('\u{1b}'));
        assert!(!render(&report).contains('\u{1b}'));
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(0), "0");
        assert_eq!(format_compact(999), "999");
        assert_eq!(format_compact(1_500), "1.5K");
        assert_eq!(format_compact(2_500_000), "2.5M");
    }

    #[test]
    fn test_format_days_ago() {
        assert_eq!(format_days_ago(0), "today");
        assert_eq!(format_days_ago(1), "1 day ago");
        assert_eq!(format_days_ago(29), "29 days ago");
        assert_eq!(format_days_ago(30), "1 month ago");
        assert_eq!(format_days_ago(200), "6 months ago");
        assert_eq!(format_days_ago(365), "1 year ago");
        assert_eq!(format_days_ago(800), "2 years ago");
    }

    #[test]
    fn test_last_merge_counts_calendar_days() {
        let activity = ActivityRecord {
            last_pr_merged_at: Some("2025-06-09T23:59:00Z".into()),
            ..ActivityRecord::default()
        };
        assert_eq!(format_last_merge(&activity, now()).as_deref(), Some("1 day ago"));

        let unreadable = ActivityRecord {
            last_pr_merged_at: Some("sometime".into()),
            ..ActivityRecord::default()
        };
        assert_eq!(format_last_merge(&unreadable, now()), None);
    }
}
