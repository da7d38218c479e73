use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use lingo_sprint::config::Config;
use lingo_sprint::logging::init_tracing;
use lingo_sprint::routes::build_router;
use lingo_sprint::state::AppState;
use lingo_sprint::store::operations::catalog::CatalogFile;
use lingo_sprint::store::Store;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    init_tracing(&config);
    tracing::info!("Starting lingo-sprint");

    let store = Arc::new(Store::open(&config.sled_path).expect("Failed to open sled database"));
    seed_catalog_if_empty(&store, &config.catalog_path);

    let state = AppState::new(store.clone(), &config);

    let app = build_router(state)
        .layer(build_cors_layer(&config))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let addr = SocketAddr::new(config.host, config.port);
    tracing::info!(%addr, "Listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "HTTP server crashed");
    }

    tracing::info!("Flushing store before exit");
    if let Err(e) = store.flush() {
        tracing::error!(error = %e, "Failed to flush store before exit");
    }
    tracing::info!("Shutdown complete");
}

/// Populate the reference catalog on first boot. A missing file is fine in
/// development; a present-but-broken file is a fatal configuration error.
fn seed_catalog_if_empty(store: &Store, catalog_path: &str) {
    if !store.catalog_is_empty() {
        tracing::debug!("Catalog already populated, skipping seed");
        return;
    }
    let raw = match std::fs::read(catalog_path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(catalog_path, error = %e, "No catalog file; starting with an empty catalog");
            return;
        }
    };
    let catalog: CatalogFile =
        serde_json::from_slice(&raw).expect("Failed to parse catalog file");
    let imported = store
        .import_catalog(&catalog)
        .expect("Failed to import catalog");
    tracing::info!(catalog_path, imported, "Seeded reference catalog");
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors_origin.trim() == "*" {
        // Wildcard is for development only; wildcard and credentials are
        // mutually exclusive.
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_methods(Any);
    }

    match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_methods(Any),
        Err(e) => {
            panic!(
                "FATAL: Invalid CORS_ORIGIN '{}': {}. \
                 Fix the CORS_ORIGIN environment variable.",
                config.cors_origin, e
            );
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = sigterm.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Shutdown signal received");
}
