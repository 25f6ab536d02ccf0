mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Extension, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use crate::api::{DynAPI, API};
use crate::server::handlers::{context, dashboard, quotes, routes};

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

pub async fn serve<T: API + Sync + Send + 'static>(api: T) {
    let api = Arc::new(api) as DynAPI;

    let app = Router::new()
        .route("/quotes", post(quotes::create))
        .route("/quotes/smart", post(quotes::create_smart))
        .route("/context", get(context::find))
        .route("/distances", post(routes::estimate))
        .route("/routes/info", get(routes::info))
        .route("/dashboard/demand-trend", get(dashboard::demand_trend))
        .route("/dashboard/time-price", get(dashboard::time_price))
        .route(
            "/dashboard/ride-distribution",
            get(dashboard::ride_distribution),
        )
        .route("/dashboard/model-metrics", get(dashboard::model_metrics))
        .route("/health", get(health))
        .layer(Extension(api));

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
