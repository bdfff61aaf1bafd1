//! Categorical health ratings
//!
//! The [`compute_ratings`] engine maps whatever facts were collected onto five
//! [`RatingCategory`] values. Every category is rated independently: missing inputs or
//! a failed computation set that category to [`Rating::Unavailable`] and leave the
//! others untouched. [`rating_criteria`] describes the rules as static data.

mod criteria;
mod engine;
mod rating;
mod rating_category;

pub use criteria::{CategoryCriteria, LevelCriterion, rating_criteria};
pub use engine::{HealthRatings, RatingInputs, compute_ratings};
pub use rating::Rating;
pub use rating_category::RatingCategory;
