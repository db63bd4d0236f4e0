//! Koshtina Back binary entrypoint wiring the REST, SSE, and persistence layers.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use koshtina_back::{
    config::AppConfig,
    dao::session_store::{FileSessionStore, SessionStore},
    engine::Session,
    routes,
    services::storage_supervisor,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let store = Arc::new(FileSessionStore::new(config.snapshot_path.clone()));

    let session = restore_session(store.as_ref(), &config).await;
    let app_state = AppState::new(session, store);

    tokio::spawn(storage_supervisor::run(app_state.clone()));
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Load the last persisted session, falling back to a fresh one when the
/// snapshot is absent or unreadable.
async fn restore_session(store: &dyn SessionStore, config: &AppConfig) -> Session {
    match store.load().await {
        Ok(Some(entity)) => {
            let session: Session = entity.into();
            info!(
                players = session.registry.players.len(),
                archived = session.archive.len(),
                "restored session snapshot"
            );
            session
        }
        Ok(None) => {
            info!("no session snapshot found; starting fresh");
            Session::new(config.burn_limit)
        }
        Err(err) => {
            warn!(error = %err, "failed to load session snapshot; starting fresh");
            Session::new(config.burn_limit)
        }
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
