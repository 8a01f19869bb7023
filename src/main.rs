use std::env;
use std::error::Error;

use png_tax_engine::api::{AppState, create_router};
use png_tax_engine::config::ConfigLoader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config() -> Result<ConfigLoader, png_tax_engine::error::EngineError> {
    match env::var("TAX_SCHEDULE_DIR") {
        Ok(dir) => {
            info!(dir = %dir, "Loading tax schedule from directory");
            ConfigLoader::load(dir)
        }
        Err(_) => {
            info!("Using embedded tax schedule");
            ConfigLoader::embedded()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    let config = load_config().inspect_err(|err| {
        error!(error = %err, "Tax schedule failed to load");
    })?;
    let metadata = config.schedule().metadata();
    info!(
        schedule = %metadata.code,
        effective_date = %metadata.effective_date,
        "Tax schedule loaded"
    );

    let addr = env::var("TAX_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, create_router(AppState::from(config))).await?;
    Ok(())
}
