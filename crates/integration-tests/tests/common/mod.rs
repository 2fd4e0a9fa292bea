//! Stub status service shared by the integration tests

#![allow(dead_code)]

use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde_json::Value;

/// Serve `router` on an ephemeral localhost port, returning its base URL
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// `/status` answering with a fixed body
pub fn status_router(status: StatusCode, body: &'static str) -> Router {
    Router::new().route(
        "/status",
        get(move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }),
    )
}

/// `/history/<prefix>` filtering `runs` by job name prefix
pub fn history_router(runs: Value) -> Router {
    let all = runs.clone();
    Router::new()
        .route(
            "/history/*prefix",
            get(move |Path(prefix): Path<String>| {
                let runs = runs.clone();
                async move { axum::Json(filter_prefix(&runs, &prefix)).into_response() }
            }),
        )
        .route(
            "/history/",
            get(move || {
                let runs = all.clone();
                async move { axum::Json(runs).into_response() }
            }),
        )
}

fn filter_prefix(runs: &Value, prefix: &str) -> Value {
    let matching = runs
        .as_array()
        .map(|runs| {
            runs.iter()
                .filter(|run| {
                    run["Job"]
                        .as_str()
                        .map(|job| job.starts_with(prefix))
                        .unwrap_or(false)
                })
                .cloned()
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    Value::Array(matching)
}

/// A base URL nobody is listening on
pub async fn dead_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}
