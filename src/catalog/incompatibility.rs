//! Incompatibility Matrix Engine
//!
//! Derives the symmetric "cannot cohabit" relation from the tag conflict
//! table. The table is directional and not guaranteed to be symmetric, so a
//! pair is checked in both directions; the resulting relation is recorded on
//! both species.
//!
//! Cost is O(n² · t²) over n species and t tags each. Run once per catalog
//! load, never per interaction.

use crate::config::RuleSet;
use crate::types::Species;
use rustc_hash::{FxHashMap, FxHashSet};

/// Read-only lookup form of `RuleSet::tag_conflicts`
#[derive(Debug, Clone, Default)]
pub struct TagConflictMatrix {
    conflicts: FxHashMap<String, FxHashSet<String>>,
}

/// The tag pair that made two species incompatible
#[derive(Debug, Clone, PartialEq)]
pub struct TagConflict<'a> {
    /// Species whose tag is the table key
    pub source: &'a Species,
    pub source_tag: &'a str,
    /// Species carrying the conflicting tag
    pub target: &'a Species,
    pub target_tag: &'a str,
}

/// Outcome of checking one pair of species
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairCompatibility {
    pub compatible: bool,
    pub reason: Option<String>,
}

impl TagConflictMatrix {
    pub fn new<I, T>(table: I) -> Self
    where
        I: IntoIterator<Item = (String, T)>,
        T: IntoIterator<Item = String>,
    {
        let mut conflicts: FxHashMap<String, FxHashSet<String>> = FxHashMap::default();
        for (tag, others) in table {
            conflicts.entry(tag).or_default().extend(others);
        }
        Self { conflicts }
    }

    pub fn from_rules(rules: &RuleSet) -> Self {
        Self::new(
            rules
                .tag_conflicts
                .iter()
                .map(|(tag, others)| (tag.clone(), others.clone())),
        )
    }

    /// Whether `tag` lists `other` as a conflict (one direction only)
    pub fn tag_conflicts_with(&self, tag: &str, other: &str) -> bool {
        self.conflicts
            .get(tag)
            .map_or(false, |set| set.contains(other))
    }

    fn directional<'a>(&self, from: &'a Species, to: &'a Species) -> Option<TagConflict<'a>> {
        for source_tag in &from.incompatibility_tags {
            let Some(blocked) = self.conflicts.get(source_tag) else {
                continue;
            };
            if let Some(target_tag) = to.incompatibility_tags.iter().find(|t| blocked.contains(*t)) {
                return Some(TagConflict {
                    source: from,
                    source_tag,
                    target: to,
                    target_tag,
                });
            }
        }
        None
    }

    /// First tag conflict between two species, checking `a → b` then `b → a`.
    /// Species without tags never conflict.
    pub fn find_conflict<'a>(&self, a: &'a Species, b: &'a Species) -> Option<TagConflict<'a>> {
        if a.incompatibility_tags.is_empty() || b.incompatibility_tags.is_empty() {
            return None;
        }
        self.directional(a, b).or_else(|| self.directional(b, a))
    }

    /// Pairwise check with a readable reason naming the triggering tags
    pub fn check_pair(&self, a: &Species, b: &Species) -> PairCompatibility {
        match self.find_conflict(a, b) {
            Some(c) => PairCompatibility {
                compatible: false,
                reason: Some(format!(
                    "{} ({}) is incompatible with {} ({})",
                    c.source.name, c.source_tag, c.target.name, c.target_tag
                )),
            },
            None => PairCompatibility {
                compatible: true,
                reason: None,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Return a new catalog whose `incompatible_with` lists are the union of the
/// seeded entries (mirrored onto the other side) and the tag-derived ones.
///
/// Ids are de-duplicated; seeded ids come first, derived ids follow in
/// catalog order. Seeded ids that are not in the catalog are kept as-is.
pub fn apply_incompatibility(catalog: &[Species], matrix: &TagConflictMatrix) -> Vec<Species> {
    let n = catalog.len();
    let index: FxHashMap<&str, usize> = catalog
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id.as_str(), i))
        .collect();

    // Mirror seeded entries so the relation stays symmetric
    let mut mirrored: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, species) in catalog.iter().enumerate() {
        for other_id in &species.incompatible_with {
            if let Some(&j) = index.get(other_id.as_str()) {
                if j != i {
                    mirrored[j].push(i);
                }
            }
        }
    }

    // Unordered pairs; `find_conflict` checks both directions
    let mut derived: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        if catalog[i].incompatibility_tags.is_empty() {
            continue;
        }
        for j in (i + 1)..n {
            if matrix.find_conflict(&catalog[i], &catalog[j]).is_some() {
                derived[i].push(j);
                derived[j].push(i);
            }
        }
    }

    catalog
        .iter()
        .enumerate()
        .map(|(i, species)| {
            let mut seen: FxHashSet<&str> = FxHashSet::default();
            let mut merged: Vec<String> = Vec::new();

            let ids = species
                .incompatible_with
                .iter()
                .map(String::as_str)
                .chain(mirrored[i].iter().map(|&j| catalog[j].id.as_str()))
                .chain(derived[i].iter().map(|&j| catalog[j].id.as_str()));

            for id in ids {
                if id != species.id && seen.insert(id) {
                    merged.push(id.to_string());
                }
            }

            species.with_incompatible(merged)
        })
        .collect()
}

/// Number of unordered incompatible pairs among catalog members
pub fn count_incompatible_pairs(catalog: &[Species]) -> usize {
    let ids: FxHashSet<&str> = catalog.iter().map(|s| s.id.as_str()).collect();
    let directed: usize = catalog
        .iter()
        .map(|s| {
            s.incompatible_with
                .iter()
                .filter(|id| ids.contains(id.as_str()))
                .count()
        })
        .sum();
    directed / 2
}
