//! Domain types for the aquarium configurator
//!
//! `Species` is the canonical catalog entity produced by the normalizer.
//! The enums mirror the tags used by the configurator UI and serialize to the
//! same kebab-case strings.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Tank type tag (also used as a species suitability tag)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AquariumType {
    Freshwater,
    Planted,
    Pseudomarine,
    Shrimp,
    Cichlid,
    Marine,
}

impl AquariumType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AquariumType::Freshwater => "freshwater",
            AquariumType::Planted => "planted",
            AquariumType::Pseudomarine => "pseudomarine",
            AquariumType::Shrimp => "shrimp",
            AquariumType::Cichlid => "cichlid",
            AquariumType::Marine => "marine",
        }
    }
}

impl fmt::Display for AquariumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Keeper experience, also used as the species difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    /// Whether a keeper at this level is offered a species of `difficulty`.
    ///
    /// Advanced keepers see everything, intermediate keepers everything but
    /// advanced species, beginners only beginner species.
    pub fn permits(&self, difficulty: ExperienceLevel) -> bool {
        match self {
            ExperienceLevel::Advanced => true,
            ExperienceLevel::Intermediate => difficulty != ExperienceLevel::Advanced,
            ExperienceLevel::Beginner => difficulty == ExperienceLevel::Beginner,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteriorStyle {
    Minimalism,
    Loft,
    Scandi,
    Hightech,
}

/// Water-column region a species occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FishZone {
    Top,
    Middle,
    Bottom,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Temperament {
    Peaceful,
    SemiAggressive,
    Aggressive,
}

/// Qualitative stocking verdict, best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompatibilityStatus {
    Excellent,
    Good,
    Risky,
    Incompatible,
}

impl CompatibilityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CompatibilityStatus::Excellent => "Excellent",
            CompatibilityStatus::Good => "Good",
            CompatibilityStatus::Risky => "Risky",
            CompatibilityStatus::Incompatible => "Incompatible",
        }
    }
}

/// Closed numeric interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Overlap of two ranges, `None` when they are disjoint.
    pub fn intersect(&self, other: &Range) -> Option<Range> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min <= max {
            Some(Range { min, max })
        } else {
            None
        }
    }
}

/// Acceptable water chemistry; every bound is individually optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterParams {
    pub ph_min: Option<f64>,
    pub ph_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub salinity: Option<f64>,
}

impl WaterParams {
    /// pH range, only when both bounds are declared
    pub fn ph_range(&self) -> Option<Range> {
        match (self.ph_min, self.ph_max) {
            (Some(min), Some(max)) => Some(Range::new(min, max)),
            _ => None,
        }
    }

    /// Temperature range (°C), only when both bounds are declared
    pub fn temp_range(&self) -> Option<Range> {
        match (self.temp_min, self.temp_max) {
            (Some(min), Some(max)) => Some(Range::new(min, max)),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ph_min.is_none()
            && self.ph_max.is_none()
            && self.temp_min.is_none()
            && self.temp_max.is_none()
            && self.salinity.is_none()
    }
}

/// Canonical species entity
///
/// Built once by the normalizer, annotated once by the incompatibility
/// engine, then shared read-only for the lifetime of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: String,
    /// Localized display name
    pub name: String,
    pub latin_name: String,
    /// Best-guess asset location; see `utils::image_path::image_candidates`
    pub image_path: String,
    pub min_volume_liters: f64,
    pub max_count: u32,
    pub zone: FishZone,
    pub temperament: Temperament,
    pub schooling: bool,
    pub min_school_size: Option<u32>,
    pub difficulty: ExperienceLevel,
    pub compatible_tank_types: SmallVec<[AquariumType; 2]>,
    pub water_params: Option<WaterParams>,
    /// Ids this species must never share a tank with (symmetric)
    pub incompatible_with: Vec<String>,
    /// Engine input only, not a verdict
    pub incompatibility_tags: Vec<String>,
    pub family_group: String,
    pub size_cm: f64,
    pub description: String,
    pub care_level: String,
    pub fun_facts: Vec<String>,
}

impl Species {
    pub fn suits(&self, tank_type: AquariumType) -> bool {
        self.compatible_tank_types.contains(&tank_type)
    }

    pub fn is_incompatible_with(&self, other_id: &str) -> bool {
        self.incompatible_with.iter().any(|id| id == other_id)
    }

    /// Either side lists the other as incompatible
    pub fn conflicts_with(&self, other: &Species) -> bool {
        self.is_incompatible_with(&other.id) || other.is_incompatible_with(&self.id)
    }

    /// Copy of this species with a replaced incompatibility list; every
    /// other field is carried over unchanged.
    pub fn with_incompatible(&self, incompatible_with: Vec<String>) -> Species {
        Species {
            incompatible_with,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_intersection() {
        let a = Range::new(6.0, 7.0);
        let b = Range::new(6.5, 7.8);
        assert_eq!(a.intersect(&b), Some(Range::new(6.5, 7.0)));

        let c = Range::new(7.1, 7.5);
        assert_eq!(a.intersect(&c), None);

        // Touching ranges still overlap at a single point
        let d = Range::new(7.0, 8.0);
        assert_eq!(a.intersect(&d), Some(Range::new(7.0, 7.0)));
    }

    #[test]
    fn test_partial_water_params() {
        let params = WaterParams {
            ph_min: Some(6.0),
            ph_max: None,
            temp_min: Some(22.0),
            temp_max: Some(26.0),
            salinity: None,
        };
        assert!(params.ph_range().is_none());
        assert_eq!(params.temp_range(), Some(Range::new(22.0, 26.0)));
        assert!(!params.is_empty());
        assert!(WaterParams::default().is_empty());
    }

    #[test]
    fn test_experience_gating() {
        use ExperienceLevel::*;
        assert!(Advanced.permits(Advanced));
        assert!(Intermediate.permits(Intermediate));
        assert!(!Intermediate.permits(Advanced));
        assert!(Beginner.permits(Beginner));
        assert!(!Beginner.permits(Intermediate));
    }

    #[test]
    fn test_enum_serialization() {
        let json = serde_json::to_string(&Temperament::SemiAggressive).unwrap();
        assert_eq!(json, "\"semi-aggressive\"");
        let parsed: AquariumType = serde_json::from_str("\"pseudomarine\"").unwrap();
        assert_eq!(parsed, AquariumType::Pseudomarine);
    }
}
