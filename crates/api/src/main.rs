use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use giftigo_api::config::{LogFormat, ServerConfig};
use giftigo_api::router::build_app_router;
use giftigo_api::state::AppState;
use giftigo_core::logo::{DisabledLogoLookup, LogoLookup};
use giftigo_core::store::{CardStore, MemoryCardStore};
use giftigo_db::PgCardStore;
use giftigo_logo::BrandfetchClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid configuration")?;

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "giftigo_api=debug,giftigo_db=info,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Card store ---
    let store: Arc<dyn CardStore> = match &config.database_url {
        Some(database_url) => {
            let pool = giftigo_db::create_pool(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connection pool created");

            giftigo_db::health_check(&pool)
                .await
                .context("Database health check failed")?;

            giftigo_db::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            Arc::new(PgCardStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using the in-memory card store");
            Arc::new(MemoryCardStore::new())
        }
    };

    // --- Logo lookup ---
    let logo: Arc<dyn LogoLookup> = match &config.brand_logo {
        Some(brand_logo) => {
            tracing::info!(api_url = %brand_logo.api_url, "Brand logo search enabled");
            Arc::new(BrandfetchClient::new(
                brand_logo.api_url.clone(),
                brand_logo.api_key.clone(),
            ))
        }
        None => {
            tracing::info!("BRAND_LOGO_API_KEY not set, brand logo search disabled");
            Arc::new(DisabledLogoLookup)
        }
    };

    let addr = SocketAddr::new(
        config.host.parse().context("Invalid HOST address")?,
        config.port,
    );

    // --- Router ---
    let state = AppState {
        store,
        logo,
        config: Arc::new(config),
    };
    let app = build_app_router(state);

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
