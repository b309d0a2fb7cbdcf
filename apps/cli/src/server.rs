use std::{collections::BTreeMap, net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::State,
    http::{self, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tower_http::trace::TraceLayer;
use vidquiz_core::{InvocationEvent, InvocationResponse, RequestOrchestrator, types::cors_headers};

pub fn router(orchestrator: Arc<RequestOrchestrator>) -> Router {
    Router::new()
        .route("/", post(invoke).options(preflight))
        .route("/generate", post(invoke).options(preflight))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(orchestrator)
}

pub async fn serve(addr: SocketAddr, orchestrator: Arc<RequestOrchestrator>) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Listening");
    axum::serve(listener, router(orchestrator)).await?;
    Ok(())
}

async fn invoke(State(orchestrator): State<Arc<RequestOrchestrator>>, body: Bytes) -> Response {
    let event = parse_event(&body);
    into_http_response(orchestrator.handle(&event).await)
}

async fn preflight() -> Response {
    let mut headers = cors_headers();
    headers.remove("Content-Type");
    build_response(StatusCode::NO_CONTENT, &headers, Body::empty())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Unparsable payloads become an empty event so validation answers with 400.
pub fn parse_event(body: &[u8]) -> InvocationEvent {
    match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => InvocationEvent::from_value(&value),
        Err(e) => {
            tracing::warn!(error = %e, "Unparsable event payload");
            InvocationEvent::default()
        }
    }
}

pub fn into_http_response(response: InvocationResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut headers = response.headers.unwrap_or_default();
    headers
        .entry("Content-Type".to_string())
        .or_insert_with(|| "application/json".to_string());
    build_response(status, &headers, Body::from(response.body))
}

fn build_response(status: StatusCode, headers: &BTreeMap<String, String>, body: Body) -> Response {
    let mut builder = http::Response::builder().status(status);
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder.body(body).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build HTTP response");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "application/json")],
            r#"{"error":"Unexpected error: invalid response headers"}"#,
        )
            .into_response()
    })
}
