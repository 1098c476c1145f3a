//! Configurator Scenario Tests
//!
//! Drives a tank configuration through add/update/remove steps and checks the
//! stocking and water evaluations after each change.

use aquarium_configurator::{
    assess, evaluate, optimal_water_params, reconcile, AquariumType, Catalog, CompatibilityStatus,
    ExperienceLevel, ExternalSpeciesRecord, ExternalWaterParams, RuleSet, SpeciesSources,
    StockingRules, TankConfiguration, WaterRules,
};
use aquarium_configurator::metrics::WaterAxis;
use approx::assert_relative_eq;
use std::path::PathBuf;
use std::sync::Arc;

fn fixture_catalog() -> Catalog {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let sources = SpeciesSources::load_dir(&dir).expect("fixtures load");
    Catalog::build(&sources.subsets, &RuleSet::builtin())
}

fn add(config: &mut TankConfiguration, catalog: &Catalog, id: &str, count: u32) {
    let species = catalog.get(id).unwrap_or_else(|| panic!("{} in catalog", id));
    config.add_species(Arc::clone(species), count);
}

fn ph_record(id: u64, name: &str, ph: (f64, f64)) -> ExternalSpeciesRecord {
    ExternalSpeciesRecord {
        id,
        name_local: name.to_string(),
        water_type: "freshwater".to_string(),
        water_params: Some(ExternalWaterParams {
            ph_min: Some(ph.0),
            ph_max: Some(ph.1),
            ..Default::default()
        }),
        ..Default::default()
    }
}

// ============================================================================
// Stocking
// ============================================================================

#[test]
fn test_neon_and_oscar_in_small_tank() {
    let neon = ExternalSpeciesRecord {
        id: 1,
        name_local: "Neon Tetra".to_string(),
        water_type: "freshwater".to_string(),
        min_tank_liters: 40.0,
        min_group_size: 8,
        incompatibility_tags: vec!["small_fish".to_string()],
        ..Default::default()
    };
    let oscar = ExternalSpeciesRecord {
        id: 2,
        name_local: "Oscar".to_string(),
        water_type: "freshwater".to_string(),
        min_tank_liters: 200.0,
        incompatibility_tags: vec!["large_predator".to_string()],
        ..Default::default()
    };
    let catalog = Catalog::build(&[vec![neon, oscar]], &RuleSet::builtin());

    let mut config = TankConfiguration::new(AquariumType::Freshwater, 40.0);
    add(&mut config, &catalog, "fish-2", 1);
    add(&mut config, &catalog, "fish-1", 8);

    let result = evaluate(&config, &StockingRules::default());
    assert_eq!(result.status, Some(CompatibilityStatus::Incompatible));
    assert_eq!(result.conflicts.len(), 1);
    assert!(result.conflicts[0].contains("Neon Tetra"));
    assert!(result.conflicts[0].contains("Oscar"));
    assert!(result.schooling_warnings.is_empty());

    // Still incompatible in a huge tank
    config.volume_liters = 10_000.0;
    let result = evaluate(&config, &StockingRules::default());
    assert_eq!(result.status, Some(CompatibilityStatus::Incompatible));
}

#[test]
fn test_conflict_outranks_load_and_schooling() {
    let catalog = fixture_catalog();
    let mut config = TankConfiguration::new(AquariumType::Freshwater, 60.0);
    add(&mut config, &catalog, "fish-4", 2); // barb, short of its school
    add(&mut config, &catalog, "fish-5", 1); // betta
    add(&mut config, &catalog, "fish-3", 20); // overloads the tank

    let result = evaluate(&config, &StockingRules::default());
    assert_eq!(result.volume_used_fraction, 1.0);
    assert!(!result.schooling_warnings.is_empty());
    assert_eq!(result.status, Some(CompatibilityStatus::Incompatible));
}

#[test]
fn test_volume_load_never_decreases_when_adding() {
    let catalog = fixture_catalog();
    let rules = StockingRules::default();
    let mut config = TankConfiguration::new(AquariumType::Freshwater, 500.0);
    let ids = ["fish-1", "fish-2", "fish-3", "fish-8", "fish-11"];
    for id in ids {
        add(&mut config, &catalog, id, 1);
    }

    let mut previous = evaluate(&config, &rules).volume_used_fraction;
    for round in 0..30 {
        let id = ids[round % ids.len()];
        add(&mut config, &catalog, id, 1);
        let current = evaluate(&config, &rules).volume_used_fraction;
        assert!(current >= previous, "adding {} lowered the load", id);
        previous = current;
    }
}

#[test]
fn test_empty_configuration_baseline() {
    let config = TankConfiguration::new(AquariumType::Freshwater, 100.0);
    let assessment = assess(&config, &RuleSet::builtin());
    assert_eq!(assessment.stocking.status, None);
    assert_eq!(assessment.stocking.volume_used_fraction, 0.0);
    assert!(assessment.stocking.conflicts.is_empty());
    assert!(assessment.stocking.schooling_warnings.is_empty());
    assert!(assessment.water.is_compatible);
}

#[test]
fn test_session_walkthrough() {
    let catalog = fixture_catalog();
    let rules = RuleSet::builtin();
    let mut config = TankConfiguration::default(); // 300 L freshwater

    add(&mut config, &catalog, "fish-1", 8);
    add(&mut config, &catalog, "fish-3", 6);
    let a = assess(&config, &rules);
    // (40×8 + 60×6) × 0.3 = 204 L of 300 L
    assert_relative_eq!(a.stocking.volume_used_liters, 204.0, epsilon = 1e-9);
    assert_eq!(a.stocking.status, Some(CompatibilityStatus::Good));
    assert!(a.water.is_compatible);

    // Below the corydoras school
    config.update_count("fish-3", 4);
    let a = assess(&config, &rules);
    assert_eq!(a.stocking.status, Some(CompatibilityStatus::Risky));
    assert_eq!(a.stocking.schooling_warnings.len(), 1);

    config.remove_species("fish-3");
    let a = assess(&config, &rules);
    assert_eq!(a.stocking.status, Some(CompatibilityStatus::Excellent));

    // Goldfish: cold water
    add(&mut config, &catalog, "fish-7", 1);
    let a = assess(&config, &rules);
    assert_eq!(a.stocking.status, Some(CompatibilityStatus::Incompatible));
}

// ============================================================================
// Water parameters
// ============================================================================

#[test]
fn test_ph_intersection_two_species() {
    let rules = RuleSet::builtin();
    let catalog = Catalog::build(
        &[vec![
            ph_record(1, "Soft", (6.0, 7.0)),
            ph_record(2, "Neutral", (6.5, 7.8)),
            ph_record(3, "Acid", (6.0, 6.4)),
            ph_record(4, "Hard", (7.0, 7.5)),
        ]],
        &rules,
    );

    let mut config = TankConfiguration::default();
    add(&mut config, &catalog, "fish-1", 1);
    add(&mut config, &catalog, "fish-2", 1);
    let r = reconcile(config.selection(), &WaterRules::default());
    let ph = r.optimal_ph.unwrap();
    assert_relative_eq!(ph.min, 6.5);
    assert_relative_eq!(ph.max, 7.0);
    assert!(r.is_compatible);

    let mut config = TankConfiguration::default();
    add(&mut config, &catalog, "fish-3", 1);
    add(&mut config, &catalog, "fish-4", 1);
    let r = reconcile(config.selection(), &WaterRules::default());
    assert!(!r.is_compatible);
    assert_eq!(r.conflicts.len(), 1);
    assert_eq!(r.conflicts[0].first, "Acid");
    assert_eq!(r.conflicts[0].second, "Hard");
    assert!(r.conflicts[0].issue.contains("Acid") && r.conflicts[0].issue.contains("Hard"));
}

#[test]
fn test_fixture_temperature_conflict() {
    let catalog = fixture_catalog();
    let mut config = TankConfiguration::new(AquariumType::Freshwater, 500.0);
    add(&mut config, &catalog, "fish-1", 8); // 22-26°C
    add(&mut config, &catalog, "fish-10", 5); // 28-31°C

    let r = reconcile(config.selection(), &WaterRules::default());
    assert!(!r.is_compatible);
    assert!(r.optimal_temp.is_none());
    assert_eq!(r.conflicts.len(), 1);
    assert_eq!(r.conflicts[0].axis, WaterAxis::Temperature);

    // pH still resolves, so an optimum exists
    let params = optimal_water_params(config.selection(), &WaterRules::default()).unwrap();
    assert_eq!(params.ph_min, Some(5.5));
    assert_eq!(params.ph_max, Some(6.5));
    assert!(params.temp_min.is_none());
}

#[test]
fn test_fixture_narrow_ph() {
    let catalog = fixture_catalog();
    let mut config = TankConfiguration::default();
    add(&mut config, &catalog, "fish-1", 8); // pH 5.5-7.0
    add(&mut config, &catalog, "fish-2", 3); // pH 7.0-8.0

    let r = reconcile(config.selection(), &WaterRules::default());
    assert!(r.is_compatible);
    assert_eq!(r.warnings.len(), 1);
    assert!(r.warnings[0].contains("pH 7.0-7.0"));
}

// ============================================================================
// Catalog queries
// ============================================================================

#[test]
fn test_family_recommendations_from_fixture() {
    let catalog = fixture_catalog();

    let mut config = TankConfiguration::default();
    add(&mut config, &catalog, "fish-4", 6);
    let groups = catalog.family_recommendations(&config);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].family, "Карповые");
    let ids: Vec<&str> = groups[0].species.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["fish-7"]);

    // Cichlids: discus is peaceful next to an aggressive oscar
    let mut config = TankConfiguration::default();
    config.experience_level = ExperienceLevel::Advanced;
    add(&mut config, &catalog, "fish-6", 1);
    let groups = catalog.family_recommendations(&config);
    let ids: Vec<&str> = groups[0].species.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["fish-9"]);
}

#[test]
fn test_max_additional_from_fixture() {
    let catalog = fixture_catalog();
    let mut config = TankConfiguration::default();
    let oscar = catalog.get("fish-6").unwrap();
    assert_eq!(config.max_additional(oscar), 1);
    config.add_species(Arc::clone(oscar), 1);
    assert_eq!(config.max_additional(oscar), 0);

    let neon = catalog.get("fish-1").unwrap();
    // max_count 16, 300 / 40 = 7 fit
    assert_eq!(config.max_additional(neon), 7);
    assert_eq!(config.conflicting_entries(neon).len(), 1);
}
