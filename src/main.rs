//! Shift pay engine HTTP server.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 3000)
//! - `TAX_CONFIG_DIR`: Directory of per-year tax YAML files (default: built-in tables)
//! - `RUST_LOG`: Log filter (default: info)

use tracing::info;
use tracing_subscriber::EnvFilter;

use shift_pay_engine::api::{AppState, create_router};
use shift_pay_engine::config::ServerSettings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let settings = ServerSettings::from_env();
    info!(?settings, "Starting shift pay server");

    let tax_tables = settings.load_tax_tables()?;
    let app = create_router(AppState::new(tax_tables));

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Server listening on http://{}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
