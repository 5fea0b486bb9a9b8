use axum::{
    Router,
    routing::get,
    extract::{State, Query},
    Json,
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use super::load_analyzer;
use crate::models::{Symptom, SymptomReport, SymptomsByDate};
use crate::store::SharedStore;

#[derive(Deserialize)]
pub struct SymptomQuery {
    pub user_id: Uuid,
    /// Narrows `by_date` to days where this symptom was logged.
    pub symptom: Option<Symptom>,
}

pub fn routes(store: SharedStore) -> Router {
    Router::new()
        .route("/symptoms", get(get_symptom_report))
        .with_state(store)
}

async fn get_symptom_report(
    State(store): State<SharedStore>,
    Query(query): Query<SymptomQuery>,
) -> Result<Json<SymptomReport>, StatusCode> {
    let analyzer = load_analyzer(&store, query.user_id, "get_symptom_report").await?;

    // newest first, days without symptoms left out
    let by_date = analyzer
        .entries()
        .iter()
        .rev()
        .filter(|entry| match query.symptom {
            Some(symptom) => entry.symptoms.contains(&symptom),
            None => !entry.symptoms.is_empty(),
        })
        .map(|entry| SymptomsByDate {
            logged_at: entry.date,
            symptoms: entry.symptoms.clone(),
        })
        .collect();

    Ok(Json(SymptomReport {
        common: analyzer.statistics().common_symptoms,
        frequencies: analyzer.symptom_frequencies(),
        by_date,
    }))
}
