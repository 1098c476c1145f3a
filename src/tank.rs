//! Tank configuration owned by one configurator session.
//!
//! The selection references shared catalog entries through `Arc`; the
//! configuration itself is private mutable state and never shared.

use crate::types::{AquariumType, ExperienceLevel, InteriorStyle, Species};
use serde::Serialize;
use std::sync::Arc;

/// One selected species and how many individuals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionEntry {
    pub species: Arc<Species>,
    pub count: u32,
}

impl SelectionEntry {
    pub fn new(species: Arc<Species>, count: u32) -> Self {
        Self { species, count }
    }

    pub fn id(&self) -> &str {
        &self.species.id
    }
}

/// A visitor's in-progress tank
///
/// Invariant: every species id appears at most once in the selection and
/// every count is positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TankConfiguration {
    pub tank_type: AquariumType,
    pub volume_liters: f64,
    pub experience_level: ExperienceLevel,
    pub interior_style: InteriorStyle,
    selection: Vec<SelectionEntry>,
}

impl Default for TankConfiguration {
    fn default() -> Self {
        Self {
            tank_type: AquariumType::Freshwater,
            volume_liters: 300.0,
            experience_level: ExperienceLevel::Beginner,
            interior_style: InteriorStyle::Minimalism,
            selection: Vec::new(),
        }
    }
}

impl TankConfiguration {
    pub fn new(tank_type: AquariumType, volume_liters: f64) -> Self {
        Self {
            tank_type,
            volume_liters,
            ..Default::default()
        }
    }

    pub fn selection(&self) -> &[SelectionEntry] {
        &self.selection
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Add individuals; repeated additions of the same species raise its
    /// count instead of adding a second entry. A count of 0 is ignored.
    pub fn add_species(&mut self, species: Arc<Species>, count: u32) {
        if count == 0 {
            return;
        }
        match self.selection.iter_mut().find(|e| e.species.id == species.id) {
            Some(entry) => entry.count = entry.count.saturating_add(count),
            None => self.selection.push(SelectionEntry::new(species, count)),
        }
    }

    /// Returns whether anything was removed
    pub fn remove_species(&mut self, id: &str) -> bool {
        let before = self.selection.len();
        self.selection.retain(|e| e.id() != id);
        self.selection.len() != before
    }

    /// Set an absolute count; 0 removes the species. Unknown ids are ignored.
    pub fn update_count(&mut self, id: &str, count: u32) {
        if count == 0 {
            self.remove_species(id);
            return;
        }
        if let Some(entry) = self.selection.iter_mut().find(|e| e.id() == id) {
            entry.count = count;
        }
    }

    pub fn count_of(&self, id: &str) -> u32 {
        self.selection
            .iter()
            .find(|e| e.id() == id)
            .map_or(0, |e| e.count)
    }

    pub fn total_individuals(&self) -> u32 {
        self.selection.iter().map(|e| e.count).sum()
    }

    /// How many more individuals of `species` may be added: bounded by the
    /// species' max count minus what is already selected, and by how many
    /// minimum volumes fit into the tank.
    pub fn max_additional(&self, species: &Species) -> u32 {
        let remaining = species.max_count.saturating_sub(self.count_of(&species.id));
        let fits = if species.min_volume_liters > 0.0 {
            (self.volume_liters / species.min_volume_liters).floor().max(0.0) as u32
        } else {
            u32::MAX
        };
        remaining.min(fits)
    }

    /// Selected entries a candidate species cannot share the tank with
    pub fn conflicting_entries(&self, candidate: &Species) -> Vec<&SelectionEntry> {
        self.selection
            .iter()
            .filter(|e| e.species.id != candidate.id && e.species.conflicts_with(candidate))
            .collect()
    }
}
