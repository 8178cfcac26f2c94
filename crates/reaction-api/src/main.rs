//! Reaction API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p reaction-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use reaction_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        backend = config.store.backend.as_str(),
        address = %config.api.address(),
        "Starting Reaction API Server..."
    );

    if let Err(e) = reaction_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
