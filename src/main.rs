use std::sync::Arc;

use tienda_api::{build_app, ensure_database_exists, AppConfig, AppError, AppState, PgStore};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tienda_api=info")),
        )
        .init();

    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    // Startup failures are fatal: log and exit non-zero, the operator restarts.
    let store = match startup(&cfg).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %e, "could not start server");
            std::process::exit(1);
        }
    };
    let pool = store.pool().clone();
    let state = AppState::new(Arc::new(store));
    let app = build_app(state, &cfg.resources);

    let addr = format!("0.0.0.0:{}", cfg.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(error = %e, addr = %addr, "could not bind listener");
            std::process::exit(1);
        }
    };
    tracing::info!(port = cfg.port, "listening on {}", addr);
    for resource in &cfg.resources {
        tracing::info!("GET|POST|PUT|DELETE /{}", resource.collection);
    }

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    pool.close().await;
    tracing::info!("database connection closed");
    if let Err(e) = served {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}

async fn startup(cfg: &AppConfig) -> Result<PgStore, AppError> {
    ensure_database_exists(&cfg.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .connect(&cfg.database_url)
        .await?;
    let store = PgStore::new(pool, cfg.schema.clone());
    store.ensure_collections(&cfg.resources).await?;
    tracing::info!(schema = %cfg.schema, "connected, collections ready");
    Ok(store)
}

/// Resolves on the first termination signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending().await,
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received SIGINT, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
