use axum::{
    extract::{Query, State},
    Json,
};
use contracts::dashboards::d410_shelf_overview::{ShelfOverviewRequest, ShelfOverviewResponse};

use super::{current_snapshot, error_response, ApiError};
use crate::dashboards::d410_shelf_overview::service;
use crate::shared::app_state::AppState;

/// GET /api/d410/overview?categories=Dairy,Snacks&grid_width=10&grid_height=4
pub async fn get_overview(
    State(state): State<AppState>,
    Query(request): Query<ShelfOverviewRequest>,
) -> Result<Json<ShelfOverviewResponse>, ApiError> {
    tracing::info!("D410 Dashboard: Getting shelf overview for {:?}", request);

    let snapshot = current_snapshot(&state)
        .await
        .map_err(|e| error_response("D410 Dashboard: Failed to load snapshot", e))?;

    let response = service::get_shelf_overview(snapshot, request, &state.config.dashboard)
        .await
        .map_err(|e| error_response("D410 Dashboard: Failed to build overview", e))?;

    tracing::info!(
        "D410 Dashboard: Returning {} refill actions, {} heatmap cells",
        response.velocity.total_refill_actions,
        response.compliance.cells.len()
    );
    Ok(Json(response))
}
