use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::{load_analyzer, load_override};
use crate::models::CalendarDay;
use crate::store::SharedStore;

pub const MAX_CALENDAR_DAYS: i64 = 366;

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub user_id: Uuid,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/calendar", get(get_calendar))
        .with_state(store)
}

/// One tile per day in `from..=to` with its phase and whatever was logged.
async fn get_calendar(
    State(store): State<SharedStore>,
    Query(params): Query<CalendarQuery>,
) -> Result<Json<Vec<CalendarDay>>, (StatusCode, String)> {
    if params.from > params.to {
        return Err((StatusCode::BAD_REQUEST, "`from` must not be after `to`".into()));
    }
    let span = (params.to - params.from).num_days() + 1;
    if span > MAX_CALENDAR_DAYS {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("calendar range is limited to {MAX_CALENDAR_DAYS} days"),
        ));
    }

    let analyzer = load_analyzer(&store, params.user_id, "get_calendar")
        .await
        .map_err(|status| (status, "DB error".into()))?;
    let manual = load_override(&store, params.user_id, "get_calendar")
        .await
        .map_err(|status| (status, "DB error".into()))?;
    let outlook = analyzer.outlook(manual.as_ref());

    let days = params
        .from
        .iter_days()
        .take(span as usize)
        .map(|date| {
            let entry = analyzer.entry_on(date);
            CalendarDay {
                date,
                phase: analyzer.phase_with(date, &outlook),
                flow: entry.map(|e| e.flow),
                symptoms: entry.map(|e| e.symptoms.clone()).unwrap_or_default(),
            }
        })
        .collect();

    Ok(Json(days))
}
