//! HTML search page and HTTP server

use std::net::SocketAddr;

use anyhow::Result;
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{self, AppState};
use crate::config::ServerConfig;
use crate::error::TravelRecError;
use crate::presenter::html;
use crate::session::Session;

#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub q: Option<String>,
    pub clear: Option<String>,
}

/// Render the search page. Each request starts from a fresh page; `q` runs
/// a search and `clear` resets it.
async fn page_handler(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Html<String> {
    let now = Utc::now();
    let mut session = Session::new(state.dataset.clone(), state.presenter.as_ref().clone());

    if session.report_load_failure(now) {
        return Html(html::page(session.page(), now));
    }

    if params.clear.is_some() {
        session.clear();
    } else if let Some(query) = params.q.as_deref() {
        let outcome = session.submit(query, now);
        tracing::debug!("Search for '{}' finished with {:?}", query, outcome);
    }

    Html(html::page(session.page(), now))
}

/// Build the application router
pub fn app(state: AppState, static_dir: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(page_handler))
        .nest("/api", api::router())
        .fallback_service(ServeDir::new(static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until the process is stopped
pub async fn run(config: &ServerConfig, state: AppState) -> Result<()> {
    let addr: SocketAddr = tokio::net::lookup_host((config.host.as_str(), config.port))
        .await
        .map_err(|e| TravelRecError::server(format!("Failed to resolve {}:{}: {e}", config.host, config.port)))?
        .next()
        .ok_or_else(|| TravelRecError::server(format!("No address for {}:{}", config.host, config.port)))?;
    let app = app(state, &config.static_dir);

    #[cfg(feature = "tls")]
    if let (Some(cert), Some(key)) = (&config.tls_cert, &config.tls_key) {
        let _ = rustls::crypto::ring::default_provider().install_default();
        let tls = axum_server::tls_rustls::RustlsConfig::from_pem_file(cert, key)
            .await
            .map_err(|e| TravelRecError::server(format!("Failed to load TLS certificate {cert} and key {key}: {e}")))?;

        info!("Web server running at https://{}", addr);
        axum_server::bind_rustls(addr, tls)
            .serve(app.into_make_service())
            .await
            .map_err(|e| TravelRecError::server(e.to_string()))?;
        return Ok(());
    }

    #[cfg(not(feature = "tls"))]
    if config.tls_cert.is_some() {
        tracing::warn!("TLS configured but this build has no TLS support; serving plain HTTP");
    }

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| TravelRecError::server(format!("Failed to bind {addr}: {e}")))?;
    info!("Web server running at http://{}", addr);
    axum::serve(listener, app)
        .await
        .map_err(|e| TravelRecError::server(e.to_string()))?;
    Ok(())
}
