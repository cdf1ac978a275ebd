//! HTTP routes: health, upstream proxy and local timing endpoints

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    routing::get,
    Json, Router,
};
use chrono::Utc;
use futures::stream::{Stream, StreamExt};
use ltr_core::{session_key, TimingSource};
use serde::Deserialize;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::IntervalStream;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer};
use tracing::{error, info};

const STREAM_INTERVAL: Duration = Duration::from_secs(1);

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/proxy", get(proxy))
        .route("/test", get(test_snapshot))
        .route("/test/live", get(test_live))
        .route("/test/live/stream", get(test_live_stream))
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new()),
        )
        .with_state(state)
}

// === Health ===

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

// === Proxy ===

#[derive(Deserialize)]
struct ProxyQuery {
    url: Option<String>,
    code: Option<String>,
    session: Option<String>,
    reset: Option<String>,
}

async fn proxy(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> Result<Response, ApiError> {
    if let Some(source) = query.code.as_deref().and_then(|code| state.source_for_code(code)) {
        let local = SourceQuery {
            session: query.session,
            reset: query.reset,
        };
        info!(
            source = source.name(),
            session = session_key(local.session.as_deref()),
            "Serving proxy request locally"
        );
        return serve_source(source, &local);
    }

    let url = query
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or(ApiError::MissingUrl)?;

    Ok(Json(state.upstream.fetch(url).await?).into_response())
}

// === Local timing sources ===

#[derive(Deserialize)]
struct SourceQuery {
    session: Option<String>,
    reset: Option<String>,
}

impl SourceQuery {
    /// Anything other than an explicit yes is treated as no reset
    fn reset_requested(&self) -> bool {
        matches!(
            self.reset.as_deref().map(|r| r.trim().to_ascii_lowercase()).as_deref(),
            Some("1" | "true" | "yes")
        )
    }
}

fn serve_source(source: &dyn TimingSource, query: &SourceQuery) -> Result<Response, ApiError> {
    let session = session_key(query.session.as_deref());
    let now = Utc::now();

    if query.reset_requested() {
        return Ok(Json(source.reset(session, now)).into_response());
    }

    Ok(Json(source.snapshot(session, now)?).into_response())
}

async fn test_snapshot(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Result<Response, ApiError> {
    serve_source(state.snapshots.as_ref(), &query)
}

async fn test_live(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Result<Response, ApiError> {
    serve_source(state.simulator.as_ref(), &query)
}

async fn test_live_stream(
    State(state): State<AppState>,
    Query(query): Query<SourceQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let session = session_key(query.session.as_deref()).to_string();
    let simulator = state.simulator.clone();

    let stream = IntervalStream::new(tokio::time::interval(STREAM_INTERVAL)).filter_map(move |_| {
        let payload = simulator.live(&session, Utc::now());
        let event = match serde_json::to_string(&payload) {
            Ok(json) => Some(Ok(Event::default().data(json))),
            Err(e) => {
                error!("Failed to serialize standings: {}", e);
                None
            }
        };
        async move { event }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
