//! Catalog Pipeline Integration Tests
//!
//! Builds the catalog from the bundled `data/` fixtures and checks the
//! pipeline-level guarantees: determinism, first-wins dedup, symmetric
//! incompatibility and tag-less species staying compatible.

use aquarium_configurator::catalog::{self, normalize};
use aquarium_configurator::{
    AquariumType, Catalog, ExperienceLevel, FishZone, RuleSet, SpeciesSources, Temperament,
};
use std::path::PathBuf;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

fn load_catalog() -> (SpeciesSources, Catalog) {
    let sources = SpeciesSources::load_dir(&data_dir()).expect("fixtures load");
    let catalog = Catalog::build(&sources.subsets, &RuleSet::builtin());
    (sources, catalog)
}

#[test]
fn test_bundled_rules_match_builtin() {
    let loaded = RuleSet::load(&data_dir().join("rules.json")).expect("rules.json loads");
    assert_eq!(loaded, RuleSet::builtin());
}

#[test]
fn test_fixture_counts_and_first_wins() {
    let (sources, catalog) = load_catalog();
    assert_eq!(sources.total_records(), 16);
    assert_eq!(catalog.len(), 15);

    // id 1 appears again in the marine file; the freshwater record wins
    let neon = catalog.get("fish-1").unwrap();
    assert_eq!(neon.name, "Неон голубой");
    assert!(neon.suits(AquariumType::Freshwater));
}

#[test]
fn test_normalization_is_deterministic() {
    let sources = SpeciesSources::load_dir(&data_dir()).unwrap();
    let rules = RuleSet::builtin();
    for record in sources.subsets.iter().flatten() {
        assert_eq!(normalize(record, &rules), normalize(record, &rules));
    }
}

#[test]
fn test_build_is_idempotent() {
    let sources = SpeciesSources::load_dir(&data_dir()).unwrap();
    let rules = RuleSet::builtin();
    let first = catalog::build(&sources.subsets, &rules);
    let second = catalog::build(&sources.subsets, &rules);
    assert_eq!(first, second);

    let a = Catalog::build(&sources.subsets, &rules);
    let b = Catalog::build(&sources.subsets, &rules);
    let ids_a: Vec<&str> = a.iter().map(|s| s.id.as_str()).collect();
    let ids_b: Vec<&str> = b.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids_a, ids_b);
}

#[test]
fn test_incompatibility_is_symmetric_and_irreflexive() {
    let (_, catalog) = load_catalog();
    for a in catalog.iter() {
        assert!(!a.incompatible_with.contains(&a.id), "{} lists itself", a.id);
        for b_id in &a.incompatible_with {
            let b = catalog.get(b_id).expect("incompatible id resolves");
            assert!(
                b.incompatible_with.contains(&a.id),
                "{} lists {} but not the reverse",
                a.id,
                b.id
            );
        }
    }
}

#[test]
fn test_tagless_species_stays_compatible() {
    let (_, catalog) = load_catalog();
    let unknown = catalog.get("fish-11").unwrap();
    assert!(unknown.incompatibility_tags.is_empty());
    assert!(unknown.incompatible_with.is_empty());
    assert!(catalog.iter().all(|s| !s.incompatible_with.contains(&unknown.id)));
}

#[test]
fn test_derived_conflicts() {
    let (_, catalog) = load_catalog();
    let neon = catalog.get("fish-1").unwrap();
    // Oscar, goldfish (cold water), mbuna (territorial), tang, lionfish
    for id in ["fish-6", "fish-7", "fish-9", "fish-102", "fish-103"] {
        assert!(neon.is_incompatible_with(id), "neon vs {}", id);
    }
    assert!(!neon.is_incompatible_with("fish-5"));

    let betta = catalog.get("fish-5").unwrap();
    assert!(betta.is_incompatible_with("fish-4")); // barb nips fins

    let verdict = catalog.check_pair("fish-4", "fish-2").unwrap();
    assert!(!verdict.compatible);
    assert!(verdict.reason.is_some());
}

#[test]
fn test_minimal_record_defaults() {
    let (_, catalog) = load_catalog();
    let s = catalog.get("fish-11").unwrap();
    assert!(s.water_params.is_none());
    assert_eq!(s.zone, FishZone::Middle);
    assert_eq!(s.temperament, Temperament::Peaceful);
    assert_eq!(s.difficulty, ExperienceLevel::Beginner);
    assert!(!s.schooling);
    assert_eq!(s.max_count, 1);
    assert_eq!(s.compatible_tank_types.as_slice(), &[AquariumType::Freshwater]);
    assert!(!s.description.is_empty());
}

#[test]
fn test_derived_fields() {
    let (_, catalog) = load_catalog();

    let corydoras = catalog.get("fish-3").unwrap();
    assert_eq!(corydoras.zone, FishZone::Bottom);
    assert!(corydoras.schooling);
    assert_eq!(corydoras.min_school_size, Some(6));
    assert_eq!(corydoras.max_count, 12);

    assert_eq!(catalog.get("fish-2").unwrap().zone, FishZone::Top);
    assert_eq!(catalog.get("fish-6").unwrap().zone, FishZone::All);
    assert_eq!(catalog.get("fish-6").unwrap().temperament, Temperament::Aggressive);
    assert_eq!(catalog.get("fish-4").unwrap().temperament, Temperament::SemiAggressive);
    assert_eq!(catalog.get("fish-10").unwrap().difficulty, ExperienceLevel::Advanced);

    // "saltwater" maps to marine
    assert!(catalog.get("fish-102").unwrap().suits(AquariumType::Marine));

    assert_eq!(catalog.get("fish-1").unwrap().image_path, "/fish/neon-tetra.jpg");
    assert_eq!(catalog.get("fish-2").unwrap().image_path, "/fish/guppy.jpg");
}

#[test]
fn test_tank_type_offering() {
    let (_, catalog) = load_catalog();
    assert_eq!(catalog.for_tank_type(AquariumType::Freshwater).len(), 11);
    assert_eq!(catalog.for_tank_type(AquariumType::Planted).len(), 11);
    assert_eq!(catalog.for_tank_type(AquariumType::Marine).len(), 4);
    assert_eq!(catalog.for_tank_type(AquariumType::Pseudomarine).len(), 4);
    assert!(catalog.for_tank_type(AquariumType::Shrimp).is_empty());

    let planted_flagged = catalog
        .iter()
        .filter(|s| s.suits(AquariumType::Planted))
        .count();
    assert_eq!(planted_flagged, 4);
}
