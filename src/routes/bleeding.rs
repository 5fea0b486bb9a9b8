use axum::{extract::{State, Query}, Json, Router, routing::get, http::StatusCode};

use super::{load_analyzer, UserQuery};
use crate::models::{BleedingCycle, BleedingDay};
use crate::store::SharedStore;

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/bleeding-history", get(get_bleeding_history))
        .with_state(store)
}

pub async fn get_bleeding_history(
    State(store): State<SharedStore>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Vec<BleedingCycle>>, StatusCode> {
    let analyzer = load_analyzer(&store, params.user_id, "get_bleeding_history").await?;

    let grouped = analyzer
        .episodes()
        .iter()
        .map(|episode| BleedingCycle {
            start_date: episode.start_date,
            end_date: episode.end_date,
            duration_days: episode.duration_days,
            days: analyzer
                .entries_in(episode)
                .iter()
                .map(|entry| BleedingDay {
                    date: entry.date,
                    intensity: entry.flow,
                })
                .collect(),
        })
        .collect();

    Ok(Json(grouped))
}
