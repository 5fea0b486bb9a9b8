pub mod bleeding;
pub mod calendar;
pub mod cycle;
pub mod cycle_override;
pub mod cycle_stats;
pub mod symptoms;

use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use crate::analyzer::CycleAnalyzer;
use crate::error::StoreError;
use crate::models::ManualOverride;
use crate::store::SharedStore;

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: Uuid,
}

pub(crate) fn store_failure(context: &str, e: StoreError) -> StatusCode {
    match &e {
        StoreError::Database(sqlx::Error::Database(db_err)) => {
            tracing::error!("❌ DB error in {}: {}", context, db_err.message());
            if let Some(code) = db_err.code() {
                tracing::info!("ℹ️ SQLSTATE code: {}", code);
            }
        }
        _ => tracing::error!("❌ Store error in {}: {}", context, e),
    }
    StatusCode::INTERNAL_SERVER_ERROR
}

pub(crate) async fn load_analyzer(
    store: &SharedStore,
    user_id: Uuid,
    context: &str,
) -> Result<CycleAnalyzer, StatusCode> {
    let records = store
        .fetch_entries(user_id)
        .await
        .map_err(|e| store_failure(context, e))?;
    Ok(CycleAnalyzer::from_records(records))
}

pub(crate) async fn load_override(
    store: &SharedStore,
    user_id: Uuid,
    context: &str,
) -> Result<Option<ManualOverride>, StatusCode> {
    store
        .fetch_override(user_id)
        .await
        .map_err(|e| store_failure(context, e))
}
