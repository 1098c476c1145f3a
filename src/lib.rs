//! Aquarium Configurator compatibility engine
//!
//! Turns raw species records into a normalized, incompatibility-annotated
//! catalog and evaluates tank configurations against it.
//!
//! - `data/`: loading external species records (serde_json)
//! - `utils/`: classification, slug and image-path helpers
//! - `catalog/`: normalizer → builder → incompatibility matrix → `Catalog`
//! - `tank`: the visitor's mutable tank configuration
//! - `metrics/`: stocking evaluator and water-parameter reconciler
//! - `config`: rule tables (builtin or JSON override)

pub mod catalog;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod tank;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use catalog::{Catalog, FamilyGroup, PairCompatibility, SpeciesFilter, TagConflictMatrix};
pub use config::{RuleSet, StockingRules, WaterRules};
pub use data::{ExternalSpeciesRecord, ExternalWaterParams, SpeciesSources};
pub use error::{CatalogError, Result};
pub use metrics::{
    assess, evaluate, format_water_params, optimal_water_params, reconcile, StockingResult,
    TankAssessment, WaterReconciliation,
};
pub use tank::{SelectionEntry, TankConfiguration};
pub use types::*;
