use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, warn};

pub const NOT_BUILT_BODY: &str =
    "landing page bundle not found; run `trunk build` in crates/discovery_web";

#[derive(Debug, Clone)]
pub struct AppState {
    pub dist_dir: PathBuf,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let assets = ServeDir::new(&state.dist_dir);
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .nest_service("/static", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn index(State(state): State<Arc<AppState>>) -> Response {
    let path = state.dist_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "landing page bundle missing");
            (StatusCode::NOT_FOUND, NOT_BUILT_BODY).into_response()
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "failed to read landing page");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to read landing page").into_response()
        }
    }
}
