use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use dotenvy::dotenv;
use migration::{CoffeeShopMigrator, MigratorTrait, TriviaMigrator};
use sea_orm::DatabaseConnection;
use tracing::info;

use configs::AppConfig;
use service::auth::TokenVerifier;

use crate::errors::StartupError;
use crate::routes;
use crate::state::{CoffeeState, TriviaState};

fn load_config() -> Result<AppConfig, StartupError> {
    dotenv().ok();
    AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Make sure the database is reachable and its schema current.
async fn open_database<M: MigratorTrait>(cfg: &AppConfig) -> anyhow::Result<DatabaseConnection> {
    common::env::ensure_env(&cfg.database.url).await?;
    let db = models::db::connect_with_config(&cfg.database).await?;
    M::up(&db, None).await?;
    Ok(db)
}

async fn serve(app: Router, addr: SocketAddr, name: &str) -> anyhow::Result<()> {
    info!(%addr, service = name, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Run the trivia API until the listener fails.
pub async fn run_trivia() -> anyhow::Result<()> {
    let cfg = load_config()?;
    let db = open_database::<TriviaMigrator>(&cfg).await?;
    let app = routes::build_trivia_router(TriviaState { db });
    serve(app, bind_addr(&cfg)?, "trivia").await
}

/// Run the coffee-shop API; refuses to start without usable auth settings.
pub async fn run_coffee_shop() -> anyhow::Result<()> {
    let cfg = load_config()?;
    let verifier = TokenVerifier::from_config(&cfg.auth).map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    info!(issuer = %cfg.auth.issuer(), audience = %cfg.auth.audience, algorithm = ?cfg.auth.algorithm, "token verification configured");
    let db = open_database::<CoffeeShopMigrator>(&cfg).await?;
    let app = routes::build_coffee_router(CoffeeState { db, verifier: Arc::new(verifier) });
    serve(app, bind_addr(&cfg)?, "coffee_shop").await
}
