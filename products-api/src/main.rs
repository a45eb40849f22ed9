//! products-api server binary

use products_api::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config)?;

    run(config).await
}

#[cfg(feature = "database")]
async fn run(config: Config) -> Result<()> {
    let Some(db_config) = config.database.clone() else {
        return run_in_memory(config).await;
    };

    let pool = create_pool(&db_config).await?;
    let repository = PgProductRepository::new(pool);
    repository.ensure_schema().await?;

    let state = AppState::new(config.clone(), repository);
    Server::new(config).serve(app(state)).await
}

#[cfg(not(feature = "database"))]
async fn run(config: Config) -> Result<()> {
    if config.database.is_some() {
        warn!("A database is configured but this build lacks the `database` feature");
    }
    run_in_memory(config).await
}

async fn run_in_memory(config: Config) -> Result<()> {
    warn!("Using the in-memory product store; data is lost on restart");

    let state = AppState::new(config.clone(), InMemoryProductRepository::new());
    Server::new(config).serve(app(state)).await
}
