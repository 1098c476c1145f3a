//! Species Source Loading
//!
//! Reads the external species JSON subsets (freshwater, marine, ...) into the
//! raw `ExternalSpeciesRecord` schema. Every field except `id` is optional in
//! practice, so each one carries a serde default.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Nested water-parameter object of the external schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalWaterParams {
    #[serde(default)]
    pub ph_min: Option<f64>,
    #[serde(default)]
    pub ph_max: Option<f64>,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default)]
    pub temp_max: Option<f64>,
    #[serde(default)]
    pub salinity: Option<f64>,
}

/// One raw species record as published by the upstream catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalSpeciesRecord {
    pub id: u64,
    /// Localized (Russian) common name
    #[serde(default, rename = "name_ru")]
    pub name_local: String,
    #[serde(default)]
    pub name_lat: String,
    /// "freshwater" | "saltwater" | "marine"
    #[serde(default, rename = "type")]
    pub water_type: String,
    #[serde(default)]
    pub family_group: String,
    #[serde(default)]
    pub size_cm: f64,
    #[serde(default)]
    pub min_tank_liters: f64,
    /// Not used by the compatibility core
    #[serde(default)]
    pub bio_load_points: Option<f64>,
    #[serde(default)]
    pub temperament: String,
    #[serde(default)]
    pub min_group_size: u32,
    /// 1..=3
    #[serde(default)]
    pub difficulty: u8,
    #[serde(default)]
    pub reef_safe: Option<bool>,
    #[serde(default)]
    pub water_params: Option<ExternalWaterParams>,
    #[serde(default, rename = "incompatible_tags")]
    pub incompatibility_tags: Vec<String>,
    #[serde(default)]
    pub description_short: Option<String>,
    #[serde(default)]
    pub features_list: Option<Vec<String>>,
    /// Explicit image location, absolute or a bare file name
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Parse one source subset from a JSON array string
pub fn parse_source(json: &str, origin: &Path) -> Result<Vec<ExternalSpeciesRecord>> {
    serde_json::from_str(json).map_err(|source| CatalogError::Json {
        path: origin.to_path_buf(),
        source,
    })
}

/// Load one source subset from a JSON file
pub fn load_source(path: &Path) -> Result<Vec<ExternalSpeciesRecord>> {
    let contents = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_source(&contents, path)?;
    tracing::debug!("Loaded {} records from {:?}", records.len(), path);
    Ok(records)
}

/// Source subsets in load order; earlier subsets win on duplicate ids
#[derive(Debug, Clone, Default)]
pub struct SpeciesSources {
    pub subsets: Vec<Vec<ExternalSpeciesRecord>>,
    pub origins: Vec<PathBuf>,
}

impl SpeciesSources {
    /// Load every file in order
    pub fn load<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut sources = SpeciesSources::default();
        for path in paths {
            let path = path.as_ref();
            sources.subsets.push(load_source(path)?);
            sources.origins.push(path.to_path_buf());
        }
        Ok(sources)
    }

    /// Load the standard freshwater + marine pair from a data directory
    pub fn load_dir(dir: &Path) -> Result<Self> {
        Self::load(&[
            dir.join("freshwater_species.json"),
            dir.join("marine_species.json"),
        ])
    }

    pub fn total_records(&self) -> usize {
        self.subsets.iter().map(Vec::len).sum()
    }
}
