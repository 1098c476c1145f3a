//! Water-Parameter Reconciler
//!
//! Finds the pH and temperature window every selected species tolerates.
//!
//! Per axis, only species declaring both bounds contribute:
//! - 0 contributors: axis absent from the result
//! - 1 contributor: that species' own range, no warning
//! - 2+: running intersection folded in selection order. Once empty it stays
//!   empty; every pair that does not overlap on its own becomes a conflict.
//!   A non-empty window narrower than the configured width gets a warning.

use crate::config::WaterRules;
use crate::tank::SelectionEntry;
use crate::types::{Range, WaterParams};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WaterAxis {
    Ph,
    Temperature,
}

impl WaterAxis {
    fn format_range(&self, range: &Range) -> String {
        match self {
            WaterAxis::Ph => format!("pH {:.1}-{:.1}", range.min, range.max),
            WaterAxis::Temperature => format!("{}-{}°C", range.min, range.max),
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            WaterAxis::Ph => "pH",
            WaterAxis::Temperature => "temperature",
        }
    }
}

impl fmt::Display for WaterAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Two species whose ranges on one axis do not overlap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictDetail {
    pub first: String,
    pub second: String,
    pub axis: WaterAxis,
    pub issue: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WaterReconciliation {
    pub optimal_ph: Option<Range>,
    pub optimal_temp: Option<Range>,
    pub warnings: Vec<String>,
    pub conflicts: Vec<ConflictDetail>,
    pub is_compatible: bool,
}

// ============================================================================
// Per-axis reconciliation
// ============================================================================

struct AxisOutcome {
    optimal: Option<Range>,
    warning: Option<String>,
    conflicts: Vec<ConflictDetail>,
}

fn reconcile_axis(
    axis: WaterAxis,
    ranges: &[(&str, Range)],
    narrow_width: f64,
) -> AxisOutcome {
    let mut outcome = AxisOutcome {
        optimal: None,
        warning: None,
        conflicts: Vec::new(),
    };

    let Some((_, first)) = ranges.first() else {
        return outcome;
    };

    let common = ranges[1..]
        .iter()
        .try_fold(*first, |acc, (_, r)| acc.intersect(r));

    match common {
        Some(range) => {
            if ranges.len() > 1 && range.width() < narrow_width {
                outcome.warning = Some(format!(
                    "Narrow {} window: {}. Needs precise control.",
                    axis.noun(),
                    axis.format_range(&range)
                ));
            }
            outcome.optimal = Some(range);
        }
        None => {
            for (i, (name_a, a)) in ranges.iter().enumerate() {
                for (name_b, b) in &ranges[i + 1..] {
                    if a.intersect(b).is_none() {
                        outcome.conflicts.push(ConflictDetail {
                            first: name_a.to_string(),
                            second: name_b.to_string(),
                            axis,
                            issue: format!(
                                "{} conflict: {} requires {}, {} requires {}",
                                axis.noun(),
                                name_a,
                                axis.format_range(a),
                                name_b,
                                axis.format_range(b)
                            ),
                        });
                    }
                }
            }
            outcome.warning = Some(format!(
                "Species require different {} values. Keeping them together is problematic.",
                axis.noun()
            ));
        }
    }

    outcome
}

/// Reconcile the water requirements of a selection
pub fn reconcile(selection: &[SelectionEntry], rules: &WaterRules) -> WaterReconciliation {
    let mut ph_ranges: Vec<(&str, Range)> = Vec::new();
    let mut temp_ranges: Vec<(&str, Range)> = Vec::new();

    for entry in selection {
        let Some(params) = entry.species.water_params.as_ref() else {
            continue;
        };
        let name = entry.species.name.as_str();
        if let Some(ph) = params.ph_range() {
            ph_ranges.push((name, ph));
        }
        if let Some(temp) = params.temp_range() {
            temp_ranges.push((name, temp));
        }
    }

    let mut result = WaterReconciliation {
        is_compatible: true,
        ..Default::default()
    };

    for (axis, ranges, width) in [
        (WaterAxis::Ph, &ph_ranges, rules.narrow_ph_width),
        (WaterAxis::Temperature, &temp_ranges, rules.narrow_temp_width),
    ] {
        let outcome = reconcile_axis(axis, ranges, width);
        if outcome.optimal.is_none() && ranges.len() > 1 {
            result.is_compatible = false;
        }
        match axis {
            WaterAxis::Ph => result.optimal_ph = outcome.optimal,
            WaterAxis::Temperature => result.optimal_temp = outcome.optimal,
        }
        result.warnings.extend(outcome.warning);
        result.conflicts.extend(outcome.conflicts);
    }

    tracing::debug!(
        "Water reconciliation: {} pH / {} temp ranges, compatible={}, {} conflicts",
        ph_ranges.len(),
        temp_ranges.len(),
        result.is_compatible,
        result.conflicts.len()
    );

    result
}

/// Reconciled optimum as water parameters; `None` when neither axis is known
pub fn optimal_water_params(
    selection: &[SelectionEntry],
    rules: &WaterRules,
) -> Option<WaterParams> {
    let reconciled = reconcile(selection, rules);
    if reconciled.optimal_ph.is_none() && reconciled.optimal_temp.is_none() {
        return None;
    }
    Some(WaterParams {
        ph_min: reconciled.optimal_ph.map(|r| r.min),
        ph_max: reconciled.optimal_ph.map(|r| r.max),
        temp_min: reconciled.optimal_temp.map(|r| r.min),
        temp_max: reconciled.optimal_temp.map(|r| r.max),
        salinity: None,
    })
}

/// `"pH: 6.0-7.5, 22-26°C"`; `"Not specified"` when neither range is complete
pub fn format_water_params(params: &WaterParams) -> String {
    let mut parts = Vec::with_capacity(2);
    if let Some(ph) = params.ph_range() {
        parts.push(format!("pH: {:.1}-{:.1}", ph.min, ph.max));
    }
    if let Some(temp) = params.temp_range() {
        parts.push(format!("{}-{}°C", temp.min, temp.max));
    }
    if parts.is_empty() {
        "Not specified".to_string()
    } else {
        parts.join(", ")
    }
}
