//! Long-running local invocation endpoint.
//!
//! Every `POST /invoke` is one invocation against the same `HandlerContext`,
//! so the token cache lives as long as the process, like it would inside a
//! warm execution environment.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use http::StatusCode;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::info;

use crate::config::secrets::SecretResolver;
use crate::config::settings::ServerConfig;
use crate::handler::{handler, HandlerContext, Outcome};
use crate::observability::metrics::get_metrics;
use crate::observability::routes::MetricsState;
use crate::records::stream_event::StreamEvent;

pub const INVOKE_PATH: &str = "/invoke";

pub struct AppState<R> {
    pub ctx: HandlerContext<R>,
    /// one invocation at a time per process
    pub invocation_lock: Mutex<()>,
}

pub fn router<R>(ctx: HandlerContext<R>, metrics_state: MetricsState) -> Router
where
    R: SecretResolver + Send + Sync + 'static,
{
    let state = Arc::new(AppState {
        ctx,
        invocation_lock: Mutex::new(()),
    });

    Router::new()
        .route(INVOKE_PATH, post(invoke::<R>))
        .with_state(state)
        .merge(metrics_state.router())
}

async fn invoke<R>(State(state): State<Arc<AppState<R>>>, Json(payload): Json<Value>) -> Response
where
    R: SecretResolver + Send + Sync + 'static,
{
    let _guard = state.invocation_lock.lock().await;
    outcome_response(handler(StreamEvent::from_payload(payload), &state.ctx).await)
}

pub fn outcome_response(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Succeeded(message) => (
            StatusCode::OK,
            Json(json!({ "status": "succeeded", "message": message })),
        )
            .into_response(),
        Outcome::Recovered(_) => (
            StatusCode::OK,
            Json(json!({ "status": "recovered", "result": false })),
        )
            .into_response(),
        Outcome::Fault(message) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "errorMessage": message })),
        )
            .into_response(),
    }
}

/// Serve the invocation endpoint until the process is interrupted.
pub async fn start<R>(server_config: &ServerConfig, ctx: HandlerContext<R>) -> Result<()>
where
    R: SecretResolver + Send + Sync + 'static,
{
    let metrics = get_metrics().await;
    let app = router(ctx, MetricsState::new(metrics.registry.clone()));

    let bind_addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("listening on {}", bind_addr);
    metrics.up.set(1);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
        .context("server failed")?;
    metrics.up.set(0);
    Ok(())
}
