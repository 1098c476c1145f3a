//! Catalog lookups used by the configurator's species picker.

use super::{Catalog, PairCompatibility};
use crate::tank::TankConfiguration;
use crate::types::{AquariumType, ExperienceLevel, FishZone, Species};
use std::sync::Arc;

/// Species picker filter
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesFilter {
    pub tank_type: AquariumType,
    /// Case-insensitive substring of the display or Latin name
    pub query: Option<String>,
    /// `None` means every zone
    pub zone: Option<FishZone>,
    pub experience: ExperienceLevel,
}

impl SpeciesFilter {
    /// Filter matching everything offered for the configuration's tank
    pub fn for_config(config: &TankConfiguration) -> Self {
        Self {
            tank_type: config.tank_type,
            query: None,
            zone: None,
            experience: config.experience_level,
        }
    }

    fn matches(&self, species: &Species) -> bool {
        let matches_query = match self.query.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let q = q.to_lowercase();
                species.name.to_lowercase().contains(&q)
                    || species.latin_name.to_lowercase().contains(&q)
            }
            _ => true,
        };
        let matches_zone = self.zone.map_or(true, |z| species.zone == z);
        matches_query && matches_zone && self.experience.permits(species.difficulty)
    }
}

/// Recommended species sharing one family
#[derive(Debug, Clone, PartialEq)]
pub struct FamilyGroup {
    pub family: String,
    pub species: Vec<Arc<Species>>,
}

/// Whether a species is offered for a tank type. Planted tanks take any
/// freshwater species, pseudomarine tanks any marine species.
pub fn offered_for(species: &Species, tank_type: AquariumType) -> bool {
    match tank_type {
        AquariumType::Planted => {
            species.suits(AquariumType::Freshwater) || species.suits(AquariumType::Planted)
        }
        AquariumType::Pseudomarine => {
            species.suits(AquariumType::Marine) || species.suits(AquariumType::Pseudomarine)
        }
        other => species.suits(other),
    }
}

impl Catalog {
    /// Species offered for a tank type, in catalog order
    pub fn for_tank_type(&self, tank_type: AquariumType) -> Vec<&Arc<Species>> {
        self.iter().filter(|s| offered_for(s, tank_type)).collect()
    }

    pub fn search(&self, filter: &SpeciesFilter) -> Vec<&Arc<Species>> {
        self.iter()
            .filter(|s| offered_for(s, filter.tank_type) && filter.matches(s))
            .collect()
    }

    /// Tag-level compatibility of two catalog species with a reason.
    /// `None` when either id is unknown.
    pub fn check_pair(&self, a_id: &str, b_id: &str) -> Option<PairCompatibility> {
        let a = self.get(a_id)?;
        let b = self.get(b_id)?;
        Some(self.matrix().check_pair(a, b))
    }

    /// Unselected species from the families already in the tank that are
    /// compatible with every selected species, suit the tank type and the
    /// keeper's experience. Grouped by family in first-seen order.
    pub fn family_recommendations(&self, config: &TankConfiguration) -> Vec<FamilyGroup> {
        let selected_families: Vec<&str> = config
            .selection()
            .iter()
            .map(|e| e.species.family_group.as_str())
            .filter(|f| !f.is_empty())
            .collect();

        if selected_families.is_empty() {
            return Vec::new();
        }

        let mut groups: Vec<FamilyGroup> = Vec::new();

        for species in self.for_tank_type(config.tank_type) {
            if species.family_group.is_empty()
                || !selected_families.contains(&species.family_group.as_str())
                || config.count_of(&species.id) > 0
                || !species.suits(config.tank_type)
                || !config.experience_level.permits(species.difficulty)
                || !config.conflicting_entries(species).is_empty()
            {
                continue;
            }

            match groups.iter_mut().find(|g| g.family == species.family_group) {
                Some(group) => group.species.push(Arc::clone(species)),
                None => groups.push(FamilyGroup {
                    family: species.family_group.clone(),
                    species: vec![Arc::clone(species)],
                }),
            }
        }

        groups
    }
}
