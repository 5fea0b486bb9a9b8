use axum::{Router, routing::get, Json, extract::{State, Query}};
use axum::http::StatusCode;
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::{load_analyzer, load_override};
use crate::models::CycleSummary;
use crate::store::SharedStore;

#[derive(Deserialize)]
pub struct CycleQuery {
    pub user_id: Uuid,
    /// Day to summarize; today (UTC) when absent.
    pub on: Option<NaiveDate>,
}

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/cycle", get(get_cycle_summary))
        .with_state(store)
}

async fn get_cycle_summary(
    State(store): State<SharedStore>,
    Query(params): Query<CycleQuery>,
) -> Result<Json<CycleSummary>, StatusCode> {
    let analyzer = load_analyzer(&store, params.user_id, "get_cycle_summary").await?;
    let manual = load_override(&store, params.user_id, "get_cycle_summary").await?;

    let date = params
        .on
        .unwrap_or_else(|| chrono::Utc::now().date_naive());
    let outlook = analyzer.outlook(manual.as_ref());

    let cycle_day = outlook
        .last_period_start
        .filter(|start| *start <= date)
        .map(|start| (date - start).num_days() + 1);
    let period_expected_in_days = outlook
        .prediction
        .map(|p| (p.next_period - date).num_days());

    Ok(Json(CycleSummary {
        date,
        phase: analyzer.phase_with(date, &outlook),
        cycle_day,
        period_expected_in_days,
        outlook,
    }))
}
