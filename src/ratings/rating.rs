use serde::{Deserialize, Serialize};
use strum::Display;

/// A rating label
///
/// Each category uses its own three-level subset; `Unavailable` is shared by all of
/// them and means the inputs for that category were missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Rating {
    Strong,
    Moderate,
    Limited,
    Regular,
    Occasional,
    Infrequent,
    Lightweight,
    Heavy,
    Thorough,
    Adequate,
    Sparse,
    Unavailable,
}
