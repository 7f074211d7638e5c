//! HTTP mode: serves a freshly rendered graph on every request.
//!
//! Each graph request runs the whole pipeline against the source
//! directory on a blocking task; requests share nothing but the immutable
//! server state. Everything else is served from the static directory.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::{debug, error, info};

use crate::config::ServerConfig;
use crate::error::{GoerdError, Result};
use crate::graph::render_dir;

/// What every graph request renders.
#[derive(Debug, Clone)]
pub struct ServerState {
    /// Directory of Go sources.
    pub source: PathBuf,
    /// Name of the emitted digraph.
    pub graph_name: String,
}

/// Build the router: the graph route plus static files.
///
/// Fails if the configured graph route is not an absolute path.
pub fn router(state: ServerState, config: &ServerConfig) -> Result<Router> {
    if !config.graph_route.starts_with('/') {
        return Err(GoerdError::Route {
            route: config.graph_route.clone(),
        });
    }
    Ok(Router::new()
        .route(&config.graph_route, get(graph))
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(Arc::new(state)))
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(addr: &str, state: ServerState, config: &ServerConfig) -> Result<()> {
    let app = router(state.clone(), config)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| GoerdError::Bind {
            addr: addr.to_string(),
            source,
        })?;

    info!(
        addr = %addr,
        source = %state.source.display(),
        route = %config.graph_route,
        static_dir = %config.static_dir.display(),
        "serving type graph"
    );

    axum::serve(listener, app)
        .await
        .map_err(GoerdError::Serve)
}

async fn graph(State(state): State<Arc<ServerState>>) -> Response {
    debug!(source = %state.source.display(), "graph requested");
    let job = Arc::clone(&state);
    let rendered = tokio::task::spawn_blocking(move || {
        let mut buf = Vec::new();
        render_dir(&job.source, &job.graph_name, &mut buf).map(|()| buf)
    })
    .await;

    match rendered {
        Ok(Ok(dot)) => ([(header::CONTENT_TYPE, "text/plain")], dot).into_response(),
        Ok(Err(e)) => {
            error!(error = %e, "failed to render graph");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => {
            error!(error = %e, "render task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "render task failed").into_response()
        }
    }
}
