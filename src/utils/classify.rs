//! Classification rules for the species normalizer.
//!
//! Each classifier is an ordered list of (predicate, result) rows evaluated
//! top to bottom with a fixed default. Keyword tables come from `RuleSet`.

use crate::config::{KeywordRule, RuleSet};
use crate::types::{AquariumType, ExperienceLevel, FishZone, Temperament};
use smallvec::{smallvec, SmallVec};

// ============================================================================
// Difficulty
// ============================================================================

/// Difficulty rating 1..=3 to tier. 3 → advanced, 2 → intermediate, anything
/// else (including out-of-range values) → beginner.
pub fn classify_difficulty(rating: u8) -> ExperienceLevel {
    match rating {
        3 => ExperienceLevel::Advanced,
        2 => ExperienceLevel::Intermediate,
        _ => ExperienceLevel::Beginner,
    }
}

/// Care label shown next to the difficulty tier
pub fn care_level_label(rating: u8) -> &'static str {
    match rating {
        1 => "Easy",
        3 => "Hard",
        _ => "Medium",
    }
}

// ============================================================================
// Temperament / Zone
// ============================================================================

fn first_match<T: Copy>(rules: &[KeywordRule<T>], haystack: &str) -> Option<T> {
    rules.iter().find(|rule| rule.matches(haystack)).map(|rule| rule.result)
}

/// Case-insensitive keyword match in rule order; no match → peaceful.
pub fn classify_temperament(raw: &str, rules: &RuleSet) -> Temperament {
    let lower = raw.to_lowercase();
    first_match(&rules.temperament_rules, &lower).unwrap_or(Temperament::Peaceful)
}

/// Family keywords first (bottom, then top), then size: ≥ `large_size_cm`
/// roams everywhere, anything else swims mid-water.
pub fn classify_zone(family_group: &str, size_cm: f64, rules: &RuleSet) -> FishZone {
    let lower = family_group.to_lowercase();
    if let Some(zone) = first_match(&rules.zone_rules, &lower) {
        return zone;
    }
    if size_cm >= rules.large_size_cm {
        FishZone::All
    } else {
        FishZone::Middle
    }
}

// ============================================================================
// Tank types
// ============================================================================

/// Source water type to primary tank type
pub fn classify_water_type(water_type: &str) -> AquariumType {
    match water_type {
        "saltwater" | "marine" => AquariumType::Marine,
        _ => AquariumType::Freshwater,
    }
}

/// Freshwater species flagged reef-safe upstream are offered for planted
/// tanks. The upstream catalog has no planted-tank flag and reuses the reef
/// flag for it.
pub fn is_planted_suitable(primary: AquariumType, reef_safe: Option<bool>) -> bool {
    primary == AquariumType::Freshwater && reef_safe == Some(true)
}

pub fn compatible_tank_types(water_type: &str, reef_safe: Option<bool>) -> SmallVec<[AquariumType; 2]> {
    let primary = classify_water_type(water_type);
    let mut types: SmallVec<[AquariumType; 2]> = smallvec![primary];
    if is_planted_suitable(primary, reef_safe) {
        types.push(AquariumType::Planted);
    }
    types
}

// ============================================================================
// Group size
// ============================================================================

/// Upper bound on individuals: schooling species get twice their group size,
/// but never fewer than 10; solitary species get 1.
pub fn max_count(min_group_size: u32) -> u32 {
    if min_group_size > 1 {
        (min_group_size.saturating_mul(2)).max(10)
    } else {
        1
    }
}

/// `(schooling, min_school_size)`
pub fn schooling(min_group_size: u32) -> (bool, Option<u32>) {
    if min_group_size > 1 {
        (true, Some(min_group_size))
    } else {
        (false, None)
    }
}
