use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use vertical_slice::features::users::{LogNotifier, UsersModule};
use vertical_slice::{http, telemetry, Config, Startup};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    telemetry::init(config.log_format);

    let users = users_module(&config).await?.with_request_timeout(config.request_timeout());

    let mut startup = Startup::new().module(users);
    startup.initialize().context("failed to initialize mediator")?;
    let app = startup
        .register_routes(http::base_router())
        .context("failed to register routes")?;

    http::serve(app, &config.bind_addr)
        .await
        .with_context(|| format!("server on {} failed", config.bind_addr))
}

#[cfg(feature = "postgres")]
async fn users_module(config: &Config) -> anyhow::Result<UsersModule> {
    use sqlx::postgres::PgPoolOptions;
    use vertical_slice::features::users::PgUserRepository;

    let Some(url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, keeping users in memory");
        return Ok(UsersModule::in_memory(Arc::new(LogNotifier)));
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(url)
        .await
        .context("failed to connect to Postgres")?;
    PgUserRepository::new(pool.clone())
        .ensure_schema()
        .await
        .context("failed to create users table")?;
    tracing::info!("connected to Postgres");

    Ok(UsersModule::postgres(pool, Arc::new(LogNotifier)))
}

#[cfg(not(feature = "postgres"))]
async fn users_module(config: &Config) -> anyhow::Result<UsersModule> {
    if config.database_url.is_some() {
        tracing::warn!("built without the postgres feature, ignoring DATABASE_URL");
    }
    Ok(UsersModule::in_memory(Arc::new(LogNotifier)))
}
