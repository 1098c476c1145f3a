//! Utility modules for species normalization
//!
//! - Classify: ordered keyword/threshold rules for derived fields
//! - Image path: single-valued hint and ranked fallback candidates
//! - Slug: transliteration of localized names

pub mod classify;
pub mod image_path;
pub mod slug;

// Re-export commonly used functions
pub use classify::{classify_difficulty, classify_temperament, classify_zone, is_planted_suitable};
pub use image_path::{image_candidates, resolve_image_path};
pub use slug::slugify;
