//! # forum-api
//!
//! Wires settings, storage, token verification and the HTTP router, then
//! serves until Ctrl-C.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::{router, with_standard_layers, AppState};
use auth_adapters::JwtAccessTokenVerifier;
use configs::{LogFormat, Settings, StorageBackend};
use domains::{CommentRepository, LikeRepository, ReplyRepository, ThreadRepository};
use secrecy::ExposeSecret;
use services::ForumUseCases;
use storage_adapters::MemoryForumStore;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("loading settings")?;
    init_tracing(&settings);

    let use_cases = match settings.storage.backend {
        StorageBackend::Memory => {
            warn!("using in-memory storage; data is lost on shutdown");
            use_cases_over(MemoryForumStore::new())
        }
        StorageBackend::Postgres => postgres_use_cases(&settings).await?,
    };

    let verifier = Arc::new(JwtAccessTokenVerifier::new(
        settings.auth.access_token_key.expose_secret().as_bytes(),
    ));
    let app = with_standard_layers(router(AppState::new(use_cases, verifier)));

    let address = settings.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!(%address, "forum API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("forum API stopped");
    Ok(())
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match settings.log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.compact().init(),
    }
}

/// One store backs all four repository ports.
fn use_cases_over<S>(store: S) -> ForumUseCases
where
    S: ThreadRepository + CommentRepository + ReplyRepository + LikeRepository + 'static,
{
    let store = Arc::new(store);
    ForumUseCases::new(store.clone(), store.clone(), store.clone(), store)
}

#[cfg(feature = "db-postgres")]
async fn postgres_use_cases(settings: &Settings) -> anyhow::Result<ForumUseCases> {
    use storage_adapters::PgForumStore;

    let store = PgForumStore::connect(
        settings.database.url.expose_secret(),
        settings.database.max_connections,
    )
    .await
    .context("connecting to postgres")?;
    store.migrate().await.context("running migrations")?;
    info!("connected to postgres");
    Ok(use_cases_over(store))
}

#[cfg(not(feature = "db-postgres"))]
async fn postgres_use_cases(_settings: &Settings) -> anyhow::Result<ForumUseCases> {
    anyhow::bail!("storage.backend = \"postgres\" requires the `db-postgres` feature")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
