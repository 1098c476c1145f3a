//! Rule tables for the compatibility engine
//!
//! All static knowledge the core relies on (keyword vocabularies, the tag
//! conflict table, known image names, stocking and water thresholds) lives in
//! a `RuleSet`. The builtin tables are compiled in; a JSON override can be
//! loaded once at startup and injected into the catalog pipeline.
//!
//! `data/rules.json` mirrors `RuleSet::builtin()`.

use crate::error::{CatalogError, Result};
use crate::types::{FishZone, Temperament};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const RULESET_VERSION: u32 = 1;

/// One row of an ordered classification table: first row whose keyword
/// occurs in the input wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule<T> {
    pub result: T,
    pub keywords: Vec<String>,
}

impl<T: Copy> KeywordRule<T> {
    /// `haystack` must already be lowercased
    pub fn matches(&self, haystack: &str) -> bool {
        self.keywords.iter().any(|k| haystack.contains(k.as_str()))
    }
}

/// Stocking evaluator constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockingRules {
    /// Liters of load per liter of minimum volume per individual
    pub load_factor: f64,
    /// Volume fraction above which a tank is risky
    pub risky_fraction: f64,
    /// Volume fraction above which a tank is merely good
    pub good_fraction: f64,
}

impl Default for StockingRules {
    fn default() -> Self {
        Self {
            load_factor: 0.3,
            risky_fraction: 0.8,
            good_fraction: 0.6,
        }
    }
}

/// Water reconciler constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterRules {
    /// pH intersections narrower than this get a warning
    pub narrow_ph_width: f64,
    /// Temperature intersections (°C) narrower than this get a warning
    pub narrow_temp_width: f64,
}

impl Default for WaterRules {
    fn default() -> Self {
        Self {
            narrow_ph_width: 0.5,
            narrow_temp_width: 2.0,
        }
    }
}

/// Complete, versioned rule configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub version: u32,
    /// Prepended to the numeric source id
    pub id_prefix: String,
    /// Directory that relative image names resolve under
    pub image_dir: String,
    pub temperament_rules: Vec<KeywordRule<Temperament>>,
    pub zone_rules: Vec<KeywordRule<FishZone>>,
    /// Species at least this long (cm) roam the whole water column
    pub large_size_cm: f64,
    /// Lowercased display or Latin name -> image file stem
    pub known_images: BTreeMap<String, String>,
    /// Tag -> tags it cannot share a tank with (directional)
    pub tag_conflicts: BTreeMap<String, Vec<String>>,
    pub tag_descriptions: BTreeMap<String, String>,
    pub stocking: StockingRules,
    pub water: WaterRules,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

// ============================================================================
// BUILTIN TABLES
// ============================================================================

static TEMPERAMENT_KEYWORDS: &[(Temperament, &[&str])] = &[
    (Temperament::Peaceful, &["мир", "peace"]),
    (Temperament::SemiAggressive, &["полу", "террит", "semi", "territ"]),
    (Temperament::Aggressive, &["агр", "хищ", "pred", "aggress"]),
];

static ZONE_KEYWORDS: &[(FishZone, &[&str])] = &[
    (
        FishZone::Bottom,
        &[
            "сом", "коридорас", "вьюн", "беспозвоноч",
            "catfish", "corydoras", "loach", "invertebrate",
        ],
    ),
    (
        FishZone::Top,
        &[
            "гуппи", "молли", "пецили", "меченос",
            "guppy", "molly", "poecili", "swordtail",
        ],
    ),
];

static KNOWN_IMAGES: &[(&str, &str)] = &[
    ("неон", "neon-tetra"),
    ("неон голубой", "neon-tetra"),
    ("paracheirodon innesi", "neon-tetra"),
    ("гуппи", "guppy"),
    ("poecilia reticulata", "guppy"),
];

static TAG_CONFLICTS: &[(&str, &[&str])] = &[
    // Predators vs prey-sized fish
    ("large_predator", &["small_fish", "nano_fish", "shrimp"]),
    ("predator", &["small_fish", "nano_fish"]),
    // Fin nippers
    ("fin_nipper", &["long_finned_fish", "veil_tail", "betta"]),
    // Water chemistry
    ("high_ph_water", &["low_ph_water", "acid_loving"]),
    ("low_ph_water", &["high_ph_water", "alkaline_loving"]),
    ("acid_loving", &["high_ph_water", "alkaline_loving"]),
    ("alkaline_loving", &["low_ph_water", "acid_loving"]),
    // Temperature
    ("cold_water", &["tropical", "warm_water"]),
    ("tropical", &["cold_water"]),
    ("warm_water", &["cold_water"]),
    // Behaviour
    ("aggressive", &["peaceful", "shy", "delicate"]),
    ("territorial", &["peaceful", "shy"]),
    ("peaceful", &["aggressive", "predator"]),
    // Size
    ("small_fish", &["large_predator", "predator"]),
    ("nano_fish", &["large_predator", "predator"]),
    // Specific groups
    ("shrimp", &["large_predator", "predator", "aggressive"]),
    ("long_finned_fish", &["fin_nipper"]),
    ("veil_tail", &["fin_nipper"]),
    ("betta", &["fin_nipper", "aggressive"]),
];

static TAG_DESCRIPTIONS: &[(&str, &str)] = &[
    ("large_predator", "Large predator"),
    ("predator", "Predator"),
    ("small_fish", "Small fish"),
    ("nano_fish", "Nano fish"),
    ("fin_nipper", "Fin nipper"),
    ("long_finned_fish", "Long-finned"),
    ("veil_tail", "Veil tail"),
    ("betta", "Betta"),
    ("high_ph_water", "High pH"),
    ("low_ph_water", "Low pH"),
    ("acid_loving", "Acidic water"),
    ("alkaline_loving", "Alkaline water"),
    ("cold_water", "Cold water"),
    ("tropical", "Tropical"),
    ("warm_water", "Warm water"),
    ("aggressive", "Aggressive"),
    ("territorial", "Territorial"),
    ("peaceful", "Peaceful"),
    ("shrimp", "Shrimp"),
    ("shy", "Shy"),
    ("delicate", "Delicate"),
];

fn keyword_rules<T: Copy>(table: &[(T, &[&str])]) -> Vec<KeywordRule<T>> {
    table
        .iter()
        .map(|(result, keywords)| KeywordRule {
            result: *result,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}

fn string_map(table: &[(&str, &str)]) -> BTreeMap<String, String> {
    table
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl RuleSet {
    /// Compiled-in rule tables
    pub fn builtin() -> Self {
        Self {
            version: RULESET_VERSION,
            id_prefix: "fish-".to_string(),
            image_dir: "/fish".to_string(),
            temperament_rules: keyword_rules(TEMPERAMENT_KEYWORDS),
            zone_rules: keyword_rules(ZONE_KEYWORDS),
            large_size_cm: 20.0,
            known_images: string_map(KNOWN_IMAGES),
            tag_conflicts: TAG_CONFLICTS
                .iter()
                .map(|(tag, others)| {
                    (tag.to_string(), others.iter().map(|o| o.to_string()).collect())
                })
                .collect(),
            tag_descriptions: string_map(TAG_DESCRIPTIONS),
            stocking: StockingRules::default(),
            water: WaterRules::default(),
        }
    }

    /// Load a rule set from JSON. Missing sections fall back to the builtin
    /// tables.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let rules: RuleSet = serde_json::from_str(&contents).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        rules.validate()?;

        tracing::info!(
            "Loaded rule set v{} from {:?} ({} conflict rules)",
            rules.version,
            path,
            rules.tag_conflicts.len()
        );

        Ok(rules)
    }

    /// Reject thresholds the evaluators cannot work with
    pub fn validate(&self) -> Result<()> {
        let s = &self.stocking;
        if s.load_factor.is_nan() || s.load_factor <= 0.0 {
            return Err(CatalogError::InvalidRules(format!(
                "load_factor must be positive, got {}",
                s.load_factor
            )));
        }
        let fractions = [("risky_fraction", s.risky_fraction), ("good_fraction", s.good_fraction)];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) || value == 0.0 {
                return Err(CatalogError::InvalidRules(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        if s.good_fraction > s.risky_fraction {
            return Err(CatalogError::InvalidRules(format!(
                "good_fraction ({}) exceeds risky_fraction ({})",
                s.good_fraction, s.risky_fraction
            )));
        }
        if self.water.narrow_ph_width < 0.0 || self.water.narrow_temp_width < 0.0 {
            return Err(CatalogError::InvalidRules(
                "narrow range widths must not be negative".to_string(),
            ));
        }
        if self.large_size_cm <= 0.0 {
            return Err(CatalogError::InvalidRules(format!(
                "large_size_cm must be positive, got {}",
                self.large_size_cm
            )));
        }
        Ok(())
    }

    /// Human-readable description of an incompatibility tag
    pub fn describe_tag<'a>(&'a self, tag: &'a str) -> &'a str {
        self.tag_descriptions
            .get(tag)
            .map(String::as_str)
            .unwrap_or(tag)
    }
}
