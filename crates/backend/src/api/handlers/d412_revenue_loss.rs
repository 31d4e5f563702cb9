use axum::{extract::State, Json};
use contracts::dashboards::d412_revenue_loss::RevenueLossResponse;

use super::{current_snapshot, error_response, ApiError};
use crate::dashboards::d412_revenue_loss::service;
use crate::shared::app_state::AppState;

/// GET /api/d412/revenue_loss
pub async fn get_revenue_loss(
    State(state): State<AppState>,
) -> Result<Json<RevenueLossResponse>, ApiError> {
    let snapshot = current_snapshot(&state)
        .await
        .map_err(|e| error_response("D412 Dashboard: Failed to load snapshot", e))?;

    match service::get_revenue_loss(&snapshot) {
        Ok(response) => {
            tracing::info!(
                "D412 Dashboard: Returning total loss {} over {} SKUs",
                response.total_potential_loss_display,
                response.report.records.len()
            );
            Ok(Json(response))
        }
        Err(e) => Err(error_response(
            "D412 Dashboard: Failed to estimate revenue loss",
            e.into(),
        )),
    }
}
