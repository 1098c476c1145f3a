//! Species Normalizer
//!
//! Converts one raw external record into the canonical `Species`. Total and
//! deterministic: missing optional fields become absent values, never errors.

use crate::config::RuleSet;
use crate::data::ExternalSpeciesRecord;
use crate::types::{Species, WaterParams};
use crate::utils::classify::{
    care_level_label, classify_difficulty, classify_temperament, classify_zone,
    compatible_tank_types, max_count, schooling,
};
use crate::utils::image_path::resolve_image_path;

/// Stable catalog id: fixed prefix + numeric source id
pub fn species_id(source_id: u64, rules: &RuleSet) -> String {
    format!("{}{}", rules.id_prefix, source_id)
}

fn convert_water_params(record: &ExternalSpeciesRecord) -> Option<WaterParams> {
    record.water_params.as_ref().map(|p| WaterParams {
        ph_min: p.ph_min,
        ph_max: p.ph_max,
        temp_min: p.temp_min,
        temp_max: p.temp_max,
        salinity: p.salinity,
    })
}

fn default_description(record: &ExternalSpeciesRecord) -> String {
    format!(
        "{} ({}). {}. Grows up to {} cm.",
        record.name_local, record.name_lat, record.family_group, record.size_cm
    )
}

/// Normalize one external record
pub fn normalize(record: &ExternalSpeciesRecord, rules: &RuleSet) -> Species {
    let id = species_id(record.id, rules);
    let (is_schooling, min_school_size) = schooling(record.min_group_size);

    let description = record
        .description_short
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_description(record));

    let image_path = resolve_image_path(
        &id,
        &record.name_local,
        &record.name_lat,
        record.image_url.as_deref(),
        rules,
    );

    Species {
        name: record.name_local.clone(),
        latin_name: record.name_lat.clone(),
        image_path,
        min_volume_liters: record.min_tank_liters,
        max_count: max_count(record.min_group_size),
        zone: classify_zone(&record.family_group, record.size_cm, rules),
        temperament: classify_temperament(&record.temperament, rules),
        schooling: is_schooling,
        min_school_size,
        difficulty: classify_difficulty(record.difficulty),
        compatible_tank_types: compatible_tank_types(&record.water_type, record.reef_safe),
        water_params: convert_water_params(record),
        incompatible_with: Vec::new(),
        incompatibility_tags: record.incompatibility_tags.clone(),
        family_group: record.family_group.clone(),
        size_cm: record.size_cm,
        description,
        care_level: care_level_label(record.difficulty).to_string(),
        fun_facts: record.features_list.clone().unwrap_or_default(),
        id,
    }
}
