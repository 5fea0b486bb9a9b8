pub mod analyzer;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

use axum::{routing::get, Router};

use crate::store::SharedStore;

pub fn app(store: SharedStore) -> Router {
    Router::new()
        .merge(routes::cycle::routes(store.clone()))
        .merge(routes::symptoms::routes(store.clone()))
        .merge(routes::bleeding::routes(store.clone()))
        .merge(routes::cycle_stats::routes(store.clone()))
        .merge(routes::calendar::routes(store.clone()))
        .merge(routes::cycle_override::routes(store))
        .route("/health", get(|| async { "✅ Backend up" }))
}
