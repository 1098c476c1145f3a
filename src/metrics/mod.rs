//! Evaluators run on every selection change
//!
//! Each evaluator is a pure function of the tank configuration and its rules.

pub mod stocking;
pub mod water_params;

// Re-export evaluator functions
pub use stocking::{evaluate, StockingResult};
pub use water_params::{
    format_water_params, optimal_water_params, reconcile, ConflictDetail, WaterAxis,
    WaterReconciliation,
};

use crate::config::RuleSet;
use crate::tank::TankConfiguration;
use serde::Serialize;

/// Both evaluations for one configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TankAssessment {
    pub stocking: StockingResult,
    pub water: WaterReconciliation,
}

/// Run both evaluators against a configuration
pub fn assess(config: &TankConfiguration, rules: &RuleSet) -> TankAssessment {
    TankAssessment {
        stocking: evaluate(config, &rules.stocking),
        water: reconcile(config.selection(), &rules.water),
    }
}
