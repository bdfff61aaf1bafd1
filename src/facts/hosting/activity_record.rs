use super::{PullRequest, SearchItem, TimeDifference, format_time_difference};
use crate::facts::time_utils::parse_timestamp;
use serde::{Deserialize, Serialize};

/// Issue totals and the most recently merged pull request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub open_issues_count: u64,
    pub closed_issues_count: u64,
    pub total_issues_count: u64,

    /// Merge timestamp of the most recently updated merged pull request
    pub last_pr_merged_at: Option<String>,

    /// e.g. `created 3 days ago`, measured from creation to merge
    pub last_pr_info: Option<String>,

    pub last_pr_url: Option<String>,

    /// Time the pull request took from creation to merge
    pub last_pr_merge_time: Option<TimeDifference>,
}

impl ActivityRecord {
    /// Combine issue totals with the last merged pull request, if any
    #[must_use]
    pub fn from_parts(open_issues: u64, closed_issues: u64, last_pr: Option<(&SearchItem, &PullRequest)>) -> Self {
        let mut record = Self {
            open_issues_count: open_issues,
            closed_issues_count: closed_issues,
            total_issues_count: open_issues.saturating_add(closed_issues),
            ..Self::default()
        };

        if let Some((item, pr)) = last_pr {
            record.last_pr_url.clone_from(&item.html_url);
            record.last_pr_merged_at.clone_from(&pr.merged_at);

            let created = pr.created_at.as_deref().and_then(parse_timestamp);
            let merged = pr.merged_at.as_deref().and_then(parse_timestamp);
            if let (Some(created), Some(merged)) = (created, merged) {
                let merge_time = format_time_difference(created, merged);
                record.last_pr_info = Some(format!("created {} ago", merge_time.human_readable));
                record.last_pr_merge_time = Some(merge_time);
            }
        }

        record
    }
}
