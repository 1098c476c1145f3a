//! Stocking Evaluator
//!
//! Scores a tank configuration on three axes:
//!   1. Volume load   - Σ minVolume × count × load factor, over tank volume
//!   2. Conflicts     - one message per unordered incompatible pair
//!   3. Schooling     - species kept below their minimum school size
//!
//! Status precedence: conflicts → incompatible; load above the risky
//! fraction or any schooling shortfall → risky; load above the good fraction
//! → good; otherwise excellent. An empty selection has no status.

use crate::config::StockingRules;
use crate::tank::TankConfiguration;
use crate::types::CompatibilityStatus;
use serde::Serialize;

/// Result of evaluating one configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockingResult {
    /// `None` when nothing is selected yet
    pub status: Option<CompatibilityStatus>,
    /// Load over tank volume, capped to 1.0
    pub volume_used_fraction: f64,
    /// Uncapped load in liters
    pub volume_used_liters: f64,
    pub volume_capacity_liters: f64,
    pub conflicts: Vec<String>,
    pub schooling_warnings: Vec<String>,
}

impl StockingResult {
    pub fn volume_used_percent(&self) -> f64 {
        self.volume_used_fraction * 100.0
    }
}

/// Fraction of the tank taken by `load_liters`, capped to 1.0. A tank with no
/// volume is full as soon as anything is in it.
fn volume_fraction(load_liters: f64, capacity_liters: f64) -> f64 {
    if load_liters <= 0.0 {
        0.0
    } else if capacity_liters <= 0.0 {
        1.0
    } else {
        (load_liters / capacity_liters).min(1.0)
    }
}

fn derive_status(
    conflicts: usize,
    schooling_warnings: usize,
    fraction: f64,
    rules: &StockingRules,
) -> CompatibilityStatus {
    if conflicts > 0 {
        CompatibilityStatus::Incompatible
    } else if fraction > rules.risky_fraction || schooling_warnings > 0 {
        CompatibilityStatus::Risky
    } else if fraction > rules.good_fraction {
        CompatibilityStatus::Good
    } else {
        CompatibilityStatus::Excellent
    }
}

/// Evaluate the current selection against the tank
pub fn evaluate(config: &TankConfiguration, rules: &StockingRules) -> StockingResult {
    let selection = config.selection();

    let volume_used_liters: f64 = selection
        .iter()
        .map(|e| e.species.min_volume_liters * e.count as f64 * rules.load_factor)
        .sum();
    let volume_used_fraction = volume_fraction(volume_used_liters, config.volume_liters);

    // Unordered pairs in selection order; each pair reported once
    let mut conflicts = Vec::new();
    for (i, first) in selection.iter().enumerate() {
        for second in &selection[i + 1..] {
            if first.species.conflicts_with(&second.species) {
                conflicts.push(format!(
                    "{} is incompatible with {}",
                    first.species.name, second.species.name
                ));
            }
        }
    }

    let schooling_warnings: Vec<String> = selection
        .iter()
        .filter_map(|e| match e.species.min_school_size {
            Some(min) if e.species.schooling && e.count < min => Some(format!(
                "{}: keep at least {} individuals",
                e.species.name, min
            )),
            _ => None,
        })
        .collect();

    let status = if selection.is_empty() {
        None
    } else {
        Some(derive_status(
            conflicts.len(),
            schooling_warnings.len(),
            volume_used_fraction,
            rules,
        ))
    };

    tracing::debug!(
        "Evaluated {} entries: {:?}, load {:.1}%",
        selection.len(),
        status,
        volume_used_fraction * 100.0
    );

    StockingResult {
        status,
        volume_used_fraction,
        volume_used_liters,
        volume_capacity_liters: config.volume_liters,
        conflicts,
        schooling_warnings,
    }
}
