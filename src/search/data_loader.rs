use std::path::Path;
use tracing::info;

use crate::error::LoadError;
use crate::food_data::{FoodRecord, FoundationFoodsData};
use crate::search::corpus::Corpus;

/// Parses either the USDA export envelope (`{"FoundationFoods": [...]}`) or a
/// bare array of records, as trimmed dumps often are.
pub fn parse_foundation_foods(json: &str) -> Result<Corpus, LoadError> {
    let records = if json.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<FoodRecord>>(json)?
    } else {
        serde_json::from_str::<FoundationFoodsData>(json)?.foundation_foods
    };
    Corpus::from_records(records)
}

pub fn load_foundation_foods(json_path: &Path) -> Result<Corpus, LoadError> {
    if !json_path.exists() {
        return Err(LoadError::NotFound(json_path.to_path_buf()));
    }
    info!(path = %json_path.display(), "Loading Foundation Foods data");

    let contents = std::fs::read_to_string(json_path).map_err(|source| LoadError::Read {
        path: json_path.to_path_buf(),
        source,
    })?;
    let corpus = parse_foundation_foods(&contents)?;

    info!(food_count = corpus.len(), "Foundation Foods data loaded successfully");
    Ok(corpus)
}
