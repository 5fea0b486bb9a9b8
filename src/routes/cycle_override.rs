use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{load_override, store_failure, UserQuery};
use crate::models::ManualOverride;
use crate::store::SharedStore;

#[derive(Deserialize)]
pub struct NewOverride {
    pub user_id: Uuid,
    pub avg_cycle_length: Option<i32>,
    pub avg_period_duration: Option<i32>,
}

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/cycle-override", get(get_override).put(set_override))
        .with_state(store)
}

async fn get_override(
    State(store): State<SharedStore>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ManualOverride>, StatusCode> {
    load_override(&store, query.user_id, "get_override")
        .await?
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Range checks live here, where the user enters the values.
async fn set_override(
    State(store): State<SharedStore>,
    Json(body): Json<NewOverride>,
) -> Result<StatusCode, (StatusCode, String)> {
    let manual = ManualOverride {
        avg_cycle_length: body.avg_cycle_length,
        avg_period_duration: body.avg_period_duration,
    };
    manual.validate().map_err(|e| {
        tracing::info!("🚫 Rejected cycle override: {}", e);
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    })?;

    store
        .save_override(body.user_id, manual)
        .await
        .map_err(|e| (store_failure("set_override", e), "DB error".into()))?;

    Ok(StatusCode::NO_CONTENT)
}
