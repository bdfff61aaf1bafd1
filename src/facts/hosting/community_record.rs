use super::CommunityProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which standard community files a repository provides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityHealthRecord {
    /// GitHub's own 0..=100 score
    pub health_percentage: u8,

    pub has_readme: bool,
    pub has_license: bool,
    pub has_contributing: bool,
    pub has_code_of_conduct: bool,
}

impl CommunityHealthRecord {
    #[must_use]
    pub fn from_profile(profile: &CommunityProfile) -> Self {
        // GitHub lists every known file kind and uses null for the missing ones
        let present: BTreeSet<&str> = profile
            .files
            .iter()
            .flatten()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, _)| key.as_str())
            .collect();

        Self {
            health_percentage: u8::try_from(profile.health_percentage.unwrap_or(0).min(100)).unwrap_or(100),
            has_readme: present.contains("readme"),
            has_license: present.contains("license"),
            has_contributing: present.contains("contributing"),
            has_code_of_conduct: present.contains("code_of_conduct"),
        }
    }
}
