use std::env;
use std::path::PathBuf;

use crate::nutrient_projector::{NutrientProjector, DEFAULT_NUTRIENTS};

pub const DATA_DIR_ENV_VAR: &str = "DATA_DIR";
pub const JSON_FILE_ENV_VAR: &str = "FOUNDATIONFOODS_JSON_FILE";
pub const ENVIRONMENT_ENV_VAR: &str = "ENV";
pub const LOG_LEVEL_ENV_VAR: &str = "LOG_LEVEL";
pub const DEFAULT_NUTRIENTS_ENV_VAR: &str = "FOUNDATIONFOODS_DEFAULT_NUTRIENTS";

const DEFAULT_DATA_DIR: &str = "./data";
const DEFAULT_JSON_FILE_NAME: &str = "foundationfoods_2025-04-24.json";
const DEFAULT_LOG_LEVEL: &str = "info";
// Nutrient names contain commas ("Calcium, Ca"), so the override list uses ';'.
const NUTRIENT_LIST_SEPARATOR: char = ';';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            _ => Environment::Production,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub environment: Environment,
    pub log_level: String,
    pub default_nutrients: Vec<String>,
}

impl AppConfig {
    /// Reads configuration from the process environment. A `.env` file is
    /// loaded first; variables already set in the environment take precedence.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let data_dir = get(DATA_DIR_ENV_VAR).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let data_file = get(JSON_FILE_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(data_dir).join(DEFAULT_JSON_FILE_NAME));

        let environment = get(ENVIRONMENT_ENV_VAR)
            .map(|value| Environment::parse(&value))
            .unwrap_or_default();

        let log_level = get(LOG_LEVEL_ENV_VAR).unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let default_nutrients = get(DEFAULT_NUTRIENTS_ENV_VAR)
            .map(|value| {
                value
                    .split(NUTRIENT_LIST_SEPARATOR)
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|names| !names.is_empty())
            .unwrap_or_else(|| DEFAULT_NUTRIENTS.iter().map(|name| name.to_string()).collect());

        Self {
            data_file,
            environment,
            log_level,
            default_nutrients,
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn nutrient_projector(&self) -> NutrientProjector {
        NutrientProjector::new(self.default_nutrients.as_slice())
    }
}
