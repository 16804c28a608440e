use anyhow::{Context, Result};
use foundation_foods::cli::{execute, parse_args};
use foundation_foods::config::AppConfig;
use foundation_foods::logging::init_logging;
use foundation_foods::FoundationFoodsEngine;
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = parse_args();

    let mut config = AppConfig::from_env();
    if let Some(data_file) = &cli_args.data_file {
        config.data_file = data_file.clone();
    }
    init_logging(&config, cli_args.verbose);

    // The corpus must be fully loaded before any query runs; a bad data file
    // aborts startup.
    let data_file = config.data_file.clone();
    let projector = config.nutrient_projector();
    let engine = tokio::task::spawn_blocking(move || FoundationFoodsEngine::load(&data_file, projector))
        .await
        .context("Corpus loading task failed")?
        .with_context(|| format!("Failed to load Foundation Foods data from {:?}", config.data_file))?;

    let output = match execute(&engine, &cli_args.command) {
        Ok(output) => output,
        Err(e) => {
            error!(error = %e, not_ready = e.is_not_ready(), "Command failed");
            return Err(anyhow::anyhow!("{}", e));
        }
    };

    let rendered = if cli_args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);
    Ok(())
}
