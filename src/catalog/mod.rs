//! Species catalog pipeline
//!
//! raw records → `normalizer` → `builder` (first-wins dedup) →
//! `incompatibility` (tag matrix) → immutable `Catalog`.
//!
//! The catalog is built once per process and shared read-only; queries live
//! in `query`.

pub mod builder;
pub mod incompatibility;
pub mod normalizer;
pub mod query;

pub use builder::{build, build_with_seed, BuildOutput};
pub use incompatibility::{
    apply_incompatibility, count_incompatible_pairs, PairCompatibility, TagConflict,
    TagConflictMatrix,
};
pub use normalizer::{normalize, species_id};
pub use query::{FamilyGroup, SpeciesFilter};

use crate::config::RuleSet;
use crate::data::ExternalSpeciesRecord;
use crate::types::Species;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use std::time::Instant;

/// Finished, incompatibility-annotated species catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    species: Vec<Arc<Species>>,
    index: FxHashMap<String, usize>,
    matrix: TagConflictMatrix,
}

impl Catalog {
    /// Run the full pipeline over source subsets
    pub fn build(sources: &[Vec<ExternalSpeciesRecord>], rules: &RuleSet) -> Self {
        Self::build_with_seed(Vec::new(), sources, rules)
    }

    /// Run the full pipeline with curated entries placed ahead of all sources
    pub fn build_with_seed(
        seed: Vec<Species>,
        sources: &[Vec<ExternalSpeciesRecord>],
        rules: &RuleSet,
    ) -> Self {
        let start = Instant::now();

        let BuildOutput {
            species,
            duplicates_dropped,
        } = build_with_seed(seed, sources, rules);

        let matrix = TagConflictMatrix::from_rules(rules);
        let species = apply_incompatibility(&species, &matrix);
        let pairs = count_incompatible_pairs(&species);

        tracing::info!(
            "Built catalog: {} species ({} duplicates dropped, {} incompatible pairs) in {:?}",
            species.len(),
            duplicates_dropped,
            pairs,
            start.elapsed()
        );

        Self::from_processed(species, matrix)
    }

    /// Wrap species that have already been through the pipeline
    pub fn from_processed(species: Vec<Species>, matrix: TagConflictMatrix) -> Self {
        let species: Vec<Arc<Species>> = species.into_iter().map(Arc::new).collect();
        let index = species
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();
        Self {
            species,
            index,
            matrix,
        }
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Species in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Species>> {
        self.species.iter()
    }

    pub fn species(&self) -> &[Arc<Species>] {
        &self.species
    }

    pub fn get(&self, id: &str) -> Option<&Arc<Species>> {
        self.index.get(id).map(|&i| &self.species[i])
    }

    pub fn matrix(&self) -> &TagConflictMatrix {
        &self.matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, name: &str, tags: &[&str]) -> ExternalSpeciesRecord {
        ExternalSpeciesRecord {
            id,
            name_local: name.to_string(),
            incompatibility_tags: tags.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let rules = RuleSet::builtin();
        let catalog = Catalog::build(
            &[
                vec![record(1, "Neon", &["small_fish"]), record(2, "Oscar", &["large_predator"])],
                vec![record(1, "Duplicate", &[])],
            ],
            &rules,
        );

        assert_eq!(catalog.len(), 2);
        let neon = catalog.get("fish-1").unwrap();
        assert_eq!(neon.name, "Neon");
        assert_eq!(neon.incompatible_with, vec!["fish-2"]);
        assert!(catalog.get("fish-3").is_none());
    }
}
