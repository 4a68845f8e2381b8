use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::{info, warn};

use tg_api::app::create_app;
use tg_api::bootstrap::{build_state, AccountSeed};
use tg_api::telemetry;
use tg_shared::config::AppConfig;

/// Points at a TOML file; without it settings come from the environment
const CONFIG_FILE_VAR: &str = "APP_CONFIG_FILE";

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var(CONFIG_FILE_VAR) {
        Ok(path) => AppConfig::load(&path)
            .with_context(|| format!("loading configuration from {}", path))?,
        Err(_) => AppConfig::from_env(),
    };

    telemetry::init_logging(&config.logging).context("initializing logging")?;

    info!(
        environment = %config.environment,
        "Starting TokenGate API server"
    );

    config.validate().context("validating configuration")?;
    if config.auth.jwt.is_using_default_secret() {
        warn!("JWT secret is the built-in default; set JWT_SECRET before exposing this server");
    }

    let seeds = AccountSeed::from_env()?;
    let state = web::Data::new(build_state(&config, &seeds).await?);

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, "Listening");

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("binding {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}
