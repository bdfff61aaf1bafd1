use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The dimensions a package is rated on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RatingCategory {
    /// How widely the package is used
    CommunityAdoption,

    /// How actively the repository merges changes
    MaintenanceFrequency,

    /// How often new versions are published
    ReleaseManagement,

    /// Install size and dependency weight
    ImplementationFootprint,

    /// Presence of standard community files
    DocumentationCompleteness,
}
