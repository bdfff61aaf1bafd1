use super::{Rating, RatingCategory};
use serde::Serialize;

/// One rating level and the condition that earns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelCriterion {
    pub rating: Rating,
    pub rule: &'static str,
}

/// Human-readable description of how one category is rated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCriteria {
    pub category: RatingCategory,
    pub description: &'static str,

    /// Levels in evaluation order; the first matching rule wins
    pub levels: &'static [LevelCriterion],
}

static CRITERIA: &[CategoryCriteria] = &[
    CategoryCriteria {
        category: RatingCategory::CommunityAdoption,
        description: "How widely the package is used, from monthly npm downloads and GitHub stars",
        levels: &[
            LevelCriterion {
                rating: Rating::Strong,
                rule: "at least 1,000,000 monthly downloads or at least 10,000 stars",
            },
            LevelCriterion {
                rating: Rating::Moderate,
                rule: "at least 100,000 monthly downloads or at least 1,000 stars",
            },
            LevelCriterion {
                rating: Rating::Limited,
                rule: "anything less",
            },
        ],
    },
    CategoryCriteria {
        category: RatingCategory::MaintenanceFrequency,
        description: "How recently the repository merged a pull request",
        levels: &[
            LevelCriterion {
                rating: Rating::Unavailable,
                rule: "repository or activity data missing",
            },
            LevelCriterion {
                rating: Rating::Infrequent,
                rule: "repository is archived",
            },
            LevelCriterion {
                rating: Rating::Regular,
                rule: "maintained and last pull request merged within 14 days",
            },
            LevelCriterion {
                rating: Rating::Occasional,
                rule: "maintained and last pull request merged within 30 days, or merge date unreadable",
            },
            LevelCriterion {
                rating: Rating::Infrequent,
                rule: "not maintained, no merged pull request, or last merge older than 30 days",
            },
        ],
    },
    CategoryCriteria {
        category: RatingCategory::ReleaseManagement,
        description: "How often new versions are published to npm",
        levels: &[
            LevelCriterion {
                rating: Rating::Unavailable,
                rule: "package data missing or last release date unknown",
            },
            LevelCriterion {
                rating: Rating::Infrequent,
                rule: "repository is archived",
            },
            LevelCriterion {
                rating: Rating::Regular,
                rule: "last release within 30 days and at least 12 releases in the past year",
            },
            LevelCriterion {
                rating: Rating::Occasional,
                rule: "last release within 90 days and at least 4 releases in the past year",
            },
            LevelCriterion {
                rating: Rating::Infrequent,
                rule: "anything less",
            },
        ],
    },
    CategoryCriteria {
        category: RatingCategory::ImplementationFootprint,
        description: "Unpacked size and number of direct dependencies of the latest version",
        levels: &[
            LevelCriterion {
                rating: Rating::Unavailable,
                rule: "package data missing",
            },
            LevelCriterion {
                rating: Rating::Lightweight,
                rule: "size figure below 100 and fewer than 5 dependencies",
            },
            LevelCriterion {
                rating: Rating::Moderate,
                rule: "size figure below 500 and fewer than 15 dependencies",
            },
            LevelCriterion {
                rating: Rating::Heavy,
                rule: "anything more",
            },
        ],
    },
    CategoryCriteria {
        category: RatingCategory::DocumentationCompleteness,
        description: "GitHub community health score and presence of standard community files",
        levels: &[
            LevelCriterion {
                rating: Rating::Unavailable,
                rule: "community profile missing",
            },
            LevelCriterion {
                rating: Rating::Thorough,
                rule: "health score at least 80%, README, license, and a contributing guide or code of conduct",
            },
            LevelCriterion {
                rating: Rating::Adequate,
                rule: "health score at least 50%, README and license",
            },
            LevelCriterion {
                rating: Rating::Sparse,
                rule: "anything less",
            },
        ],
    },
];

/// The rules behind every category, as static data
#[must_use]
pub fn rating_criteria() -> &'static [CategoryCriteria] {
    CRITERIA
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_covers_every_category_in_order() {
        let categories: Vec<RatingCategory> = rating_criteria().iter().map(|c| c.category).collect();
        let expected: Vec<RatingCategory> = RatingCategory::iter().collect();
        assert_eq!(categories, expected);
    }

    #[test]
    fn test_every_category_has_levels() {
        for criteria in rating_criteria() {
            assert!(criteria.levels.len() >= 3, "{} has too few levels", criteria.category);
        }
    }

    #[test]
    fn test_serializes() {
        let json = serde_json::to_value(rating_criteria()).unwrap();
        assert_eq!(json[0]["category"], "community_adoption");
        assert_eq!(json[0]["levels"][0]["rating"], "Strong");
    }
}
