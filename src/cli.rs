use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::PathBuf;

use crate::error::QueryError;
use crate::query_engine::QueryEngine;

#[derive(Parser, Debug)]
#[command(author, version, about = "Search the USDA Foundation Foods dataset", long_about = None)]
pub struct Cli {
    /// Path to the Foundation Foods JSON export (overrides FOUNDATIONFOODS_JSON_FILE)
    #[arg(short, long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Search foods by name and return the full records
    Search {
        name: String,
        /// Maximum number of results (default: 3, max: 10)
        #[arg(short, long, default_value_t = 3, allow_negative_numbers = true)]
        limit: i64,
    },
    /// Search foods by name and return simplified nutrient information
    Nutrients {
        name: String,
        #[arg(short, long, default_value_t = 3, allow_negative_numbers = true)]
        limit: i64,
        /// Nutrient to include (repeatable); defaults to the essential nutrient list
        #[arg(short, long = "nutrient")]
        nutrients: Vec<String>,
        /// Include every nutrient instead of the default list
        #[arg(long, conflicts_with = "nutrients")]
        all_nutrients: bool,
    },
    /// Fetch a single food by FDC ID
    Lookup { fdc_id: i64 },
    /// Check that the dataset is loaded and non-empty
    Health,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Runs a command against any engine and returns the JSON to print.
pub fn execute(engine: &dyn QueryEngine, command: &Command) -> Result<Value, QueryError> {
    match command {
        Command::Search { name, limit } => {
            let response = engine.search_by_name(name, *limit)?;
            Ok(json!(response))
        }
        Command::Nutrients {
            name,
            limit,
            nutrients,
            all_nutrients,
        } => {
            let filter: Option<&[String]> = if *all_nutrients {
                Some(&[][..])
            } else if nutrients.is_empty() {
                None
            } else {
                Some(nutrients.as_slice())
            };
            let response = engine.search_by_name_simplified(name, *limit, filter)?;
            Ok(json!(response))
        }
        Command::Lookup { fdc_id } => {
            let food = engine.lookup(*fdc_id)?;
            Ok(json!(food))
        }
        Command::Health => {
            engine.health_check()?;
            Ok(json!({ "status": "healthy" }))
        }
    }
}
