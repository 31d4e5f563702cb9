pub mod config;
pub mod d410_shelf_overview;
pub mod d411_restock_velocity;
pub mod d412_revenue_loss;
pub mod d413_planogram_compliance;
pub mod u510_generate_sample_data;

use axum::{http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::shared::app_state::AppState;
use crate::shared::data::Snapshot;
use crate::shared::error::AnalyticsError;

pub type ApiError = (StatusCode, Json<Value>);

/// Map a failure to a status code and JSON body
///
/// Analytics errors are the caller's problem (400/422); anything else is a
/// server-side load or I/O failure.
pub fn error_response(context: &str, err: anyhow::Error) -> ApiError {
    let (status, kind) = match err.downcast_ref::<AnalyticsError>() {
        Some(e @ AnalyticsError::InvalidArgument(_)) => (StatusCode::BAD_REQUEST, e.kind()),
        Some(e @ AnalyticsError::DataIntegrityViolation { .. }) => {
            (StatusCode::UNPROCESSABLE_ENTITY, e.kind())
        }
        None => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("{}: {:#}", context, err);
    } else {
        tracing::warn!("{}: {}", context, err);
    }

    (
        status,
        Json(json!({
            "error": kind,
            "message": format!("{:#}", err),
        })),
    )
}

/// Current snapshot from the cache; the load itself runs on the blocking pool
pub async fn current_snapshot(state: &AppState) -> anyhow::Result<Arc<Snapshot>> {
    let cache = state.snapshots.clone();
    tokio::task::spawn_blocking(move || cache.get()).await?
}
