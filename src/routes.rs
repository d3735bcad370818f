use crate::portfolio::Portfolio;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub mod dca;
pub mod portfolio;

pub struct AppState {
    pub portfolio: Portfolio,
}

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/dca", post(dca::calculate))
        .route("/portfolio", get(portfolio::list))
        .route("/portfolio/{ticker}", get(portfolio::show))
        .route("/portfolio/{ticker}/dca", post(portfolio::calculate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
