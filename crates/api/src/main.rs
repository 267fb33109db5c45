//! Fuel Cost Estimation Service - Main Entry Point

use api::{config::Settings, init_logging, run_server};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1);
    let settings = Settings::load(config_path.as_deref())?;

    init_logging(&settings.logging);

    info!("=== Fuel Cost Service v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Database {}, model {}",
        settings.database.url,
        settings.model.model_path.display()
    );

    run_server(settings).await
}
