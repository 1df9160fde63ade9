//! HTTP side of the wedding invitation site.
//!
//! Serves the gallery listing (rescanned on every request), proxies guest
//! messages from the configured upstream with caching disabled, exposes the
//! site content, and hands everything else to the static file services: the
//! built UI first, then the public assets root.

use std::{sync::Arc, time::Duration};

use axum::{
    http::{header::CACHE_CONTROL, HeaderValue},
    routing::get,
    Router,
};
use invitation_core::supervisor::{self, ErrorChannel};
use tokio::{
    net::TcpListener,
    signal::{self, ctrl_c},
    task::JoinHandle,
};
use tower_http::{
    catch_panic::CatchPanicLayer, services::ServeDir, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

pub mod config;
pub mod error;
pub mod pages;
pub mod routes;
pub mod state;
pub mod upstream;

use config::Config;
use error::AppError;
use routes::{gallery_handler, health_handler, messages_handler, site_handler};
use state::AppState;

const FAULT_POLL: Duration = Duration::from_millis(500);

pub fn router(state: AppState) -> Router {
    assemble(api_routes(), state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/gallery", get(gallery_handler))
        .route("/messages", get(messages_handler))
        .route("/site", get(site_handler))
}

fn assemble(api: Router<AppState>, state: AppState) -> Router {
    let api = api.layer(SetResponseHeaderLayer::overriding(
        CACHE_CONTROL,
        HeaderValue::from_static("no-store"),
    ));
    let assets =
        ServeDir::new(&state.config.ui_dir).fallback(ServeDir::new(&state.config.public_dir));

    Router::new()
        .nest("/api", api)
        .route("/healthz", get(health_handler))
        .fallback_service(assets)
        .layer(CatchPanicLayer::custom(pages::panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), AppError> {
    info!("Installing error reporting channel...");
    let faults = Arc::new(supervisor::install()?);
    let fault_logger = spawn_fault_logger(faults.clone());

    info!("Initializing state...");
    let state = AppState::new(config)?;
    match &state.config.messages_upstream {
        Some(url) => info!("Guest messages upstream: {url}"),
        None => info!("No guest messages upstream, /api/messages will answer 503"),
    }

    let address = state.config.address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    let served = axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    fault_logger.abort();
    let _ = fault_logger.await;
    log_faults(&faults);
    drop(faults);

    info!("Server shut down");
    served.map_err(AppError::from)
}

fn spawn_fault_logger(faults: Arc<ErrorChannel>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(FAULT_POLL);
        loop {
            tick.tick().await;
            log_faults(&faults);
        }
    })
}

fn log_faults(faults: &ErrorChannel) {
    for fault in faults.drain() {
        error!(origin = ?fault.origin, "{}", fault.message);
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
