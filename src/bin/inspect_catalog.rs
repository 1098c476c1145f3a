//! Build the catalog from a data directory and print a summary.
//!
//! Usage: inspect_catalog [rules.json]
//!   CATALOG_DIR  directory holding freshwater_species.json / marine_species.json
//!                (default: data)

use anyhow::{Context, Result};
use aquarium_configurator::{
    assess, format_water_params, optimal_water_params, AquariumType, Catalog, FishZone, RuleSet,
    SpeciesSources, TankConfiguration,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aquarium_configurator=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let data_dir = PathBuf::from(std::env::var("CATALOG_DIR").unwrap_or_else(|_| "data".to_string()));

    let rules = match std::env::args().nth(1) {
        Some(path) => RuleSet::load(path.as_ref())
            .with_context(|| format!("Failed to load rules from {}", path))?,
        None => RuleSet::builtin(),
    };

    let sources = SpeciesSources::load_dir(&data_dir)
        .with_context(|| format!("Failed to load species from {}", data_dir.display()))?;
    tracing::info!(
        "Loaded {} records from {} files",
        sources.total_records(),
        sources.origins.len()
    );

    let catalog = Catalog::build(&sources.subsets, &rules);

    println!("\n=== CATALOG ===\n");
    println!("Species: {}", catalog.len());
    for tank_type in [
        AquariumType::Freshwater,
        AquariumType::Planted,
        AquariumType::Marine,
        AquariumType::Pseudomarine,
        AquariumType::Shrimp,
        AquariumType::Cichlid,
    ] {
        println!("  {:<14} {}", tank_type, catalog.for_tank_type(tank_type).len());
    }

    let zones = [FishZone::Top, FishZone::Middle, FishZone::Bottom, FishZone::All];
    for zone in zones {
        let n = catalog.iter().filter(|s| s.zone == zone).count();
        println!("  zone {:?}: {}", zone, n);
    }

    let with_conflicts = catalog.iter().filter(|s| !s.incompatible_with.is_empty()).count();
    println!("Species with incompatibilities: {}", with_conflicts);

    // Sample configuration: the first two freshwater species
    let mut config = TankConfiguration::default();
    for species in catalog.for_tank_type(AquariumType::Freshwater).into_iter().take(2) {
        let count = species.min_school_size.unwrap_or(1);
        config.add_species(Arc::clone(species), count);
    }

    if config.is_empty() {
        println!("\nNo freshwater species to sample.");
        return Ok(());
    }

    let assessment = assess(&config, &rules);

    println!("\n=== SAMPLE {} L TANK ===\n", config.volume_liters);
    for entry in config.selection() {
        println!("  {} × {} ({})", entry.count, entry.species.name, entry.species.id);
    }
    println!(
        "Status: {}",
        assessment
            .stocking
            .status
            .map_or("nothing selected", |s| s.label())
    );
    println!("Volume used: {:.1}%", assessment.stocking.volume_used_percent());
    for conflict in &assessment.stocking.conflicts {
        println!("  conflict: {}", conflict);
    }
    for warning in &assessment.stocking.schooling_warnings {
        println!("  schooling: {}", warning);
    }
    for warning in &assessment.water.warnings {
        println!("  water: {}", warning);
    }
    match optimal_water_params(config.selection(), &rules.water) {
        Some(params) => println!("Water: {}", format_water_params(&params)),
        None => println!("Water: unknown"),
    }

    Ok(())
}
