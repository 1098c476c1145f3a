//! Catalog Builder
//!
//! Concatenates source subsets in order, normalizes each record and keeps the
//! first occurrence of every id. Curated seed entries come before all
//! sources, so they win over converted records with the same id.

use crate::config::RuleSet;
use crate::data::ExternalSpeciesRecord;
use crate::types::Species;
use crate::catalog::normalizer::normalize;
use rustc_hash::FxHashSet;

/// Merged catalog plus the number of duplicate records dropped
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub species: Vec<Species>,
    pub duplicates_dropped: usize,
}

/// Build a deduplicated catalog from seed entries followed by source subsets
pub fn build_with_seed(
    seed: Vec<Species>,
    sources: &[Vec<ExternalSpeciesRecord>],
    rules: &RuleSet,
) -> BuildOutput {
    let capacity = seed.len() + sources.iter().map(Vec::len).sum::<usize>();
    let mut species = Vec::with_capacity(capacity);
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut duplicates_dropped = 0;

    let normalized = sources
        .iter()
        .flat_map(|subset| subset.iter())
        .map(|record| normalize(record, rules));

    for entry in seed.into_iter().chain(normalized) {
        if seen.contains(&entry.id) {
            tracing::debug!("Dropping duplicate species id {}", entry.id);
            duplicates_dropped += 1;
            continue;
        }
        seen.insert(entry.id.clone());
        species.push(entry);
    }

    BuildOutput {
        species,
        duplicates_dropped,
    }
}

/// Build a deduplicated catalog from source subsets
pub fn build(sources: &[Vec<ExternalSpeciesRecord>], rules: &RuleSet) -> Vec<Species> {
    build_with_seed(Vec::new(), sources, rules).species
}
