mod config;
mod db;
mod error;
mod extractors;
mod mail;
mod models;
mod password;
mod routes;
mod session;
mod store;
#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::mail::Mailer;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: AppConfig,
    pub key: Key,
    pub mailer: Option<Arc<Mailer>>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: AppConfig) -> anyhow::Result<Self> {
        let key = session::signing_key(&config.secret_key)?;
        let mailer = match &config.smtp {
            Some(smtp) => Some(Arc::new(Mailer::from_config(smtp)?)),
            None => None,
        };
        Ok(Self {
            db,
            config,
            key,
            mailer,
        })
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = AppConfig::load()?;

    let pool = db::setup_database(&settings).await?;
    let state = AppState::new(pool, settings.clone())?;
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!(addr = %settings.server_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
