use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use super::{load_analyzer, UserQuery};
use crate::models::CycleStatsResponse;
use crate::store::SharedStore;

/// Historical averages from logged data only; a manual override never
/// changes what this endpoint reports.
pub async fn get_cycle_stats(
    State(store): State<SharedStore>,
    Query(query): Query<UserQuery>,
) -> Result<Json<CycleStatsResponse>, StatusCode> {
    let analyzer = load_analyzer(&store, query.user_id, "get_cycle_stats").await?;

    Ok(Json(CycleStatsResponse {
        statistics: analyzer.statistics(),
        cycles: analyzer.cycle_history(),
    }))
}

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/cycle-stats", get(get_cycle_stats))
        .with_state(store)
}
