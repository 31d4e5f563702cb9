use axum::{
    extract::{Query, State},
    Json,
};
use contracts::dashboards::d411_restock_velocity::{RestockVelocityRequest, RestockVelocityResponse};

use super::{current_snapshot, error_response, ApiError};
use crate::dashboards::d411_restock_velocity::{filter, service};
use crate::shared::app_state::AppState;

/// GET /api/d411/restock_velocity?categories=Dairy,Snacks&top_n=10
pub async fn get_restock_velocity(
    State(state): State<AppState>,
    Query(request): Query<RestockVelocityRequest>,
) -> Result<Json<RestockVelocityResponse>, ApiError> {
    tracing::info!(
        "D411 Dashboard: Getting restock velocity for categories {:?}",
        request.categories
    );

    let snapshot = current_snapshot(&state)
        .await
        .map_err(|e| error_response("D411 Dashboard: Failed to load snapshot", e))?;

    match service::get_restock_velocity(&snapshot, &request, &state.config.dashboard) {
        Ok(response) => {
            tracing::info!(
                "D411 Dashboard: Returning {} refill actions, {} ranked SKUs",
                response.report.total_refill_actions,
                response.report.top_skus.len()
            );
            Ok(Json(response))
        }
        Err(e) => Err(error_response(
            "D411 Dashboard: Failed to aggregate restock velocity",
            e.into(),
        )),
    }
}

/// GET /api/d411/categories
pub async fn get_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let snapshot = current_snapshot(&state)
        .await
        .map_err(|e| error_response("D411 Dashboard: Failed to load snapshot", e))?;

    let categories = filter::available_categories(snapshot.restock_events());
    tracing::info!("D411 Dashboard: Returning {} categories", categories.len());
    Ok(Json(categories))
}
