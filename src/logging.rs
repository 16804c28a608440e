use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::AppConfig;

/// Installs the global subscriber. Output goes to stderr so stdout only ever
/// carries command results. `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &AppConfig, verbose: bool) {
    let default_directive = if verbose {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let registry = tracing_subscriber::registry().with(env_filter);
    // try_init so a second call (tests, embedding) is harmless
    let result = if config.is_development() {
        registry.with(fmt::layer().with_writer(std::io::stderr)).try_init()
    } else {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    };
    if let Err(e) = result {
        eprintln!("Logging already initialised: {}", e);
    }
}
