use axum::{
    extract::{Query, State},
    Json,
};
use contracts::dashboards::d413_planogram_compliance::{
    ComplianceReport, PlanogramComplianceRequest,
};

use super::{current_snapshot, error_response, ApiError};
use crate::dashboards::d413_planogram_compliance::service;
use crate::shared::app_state::AppState;

/// GET /api/d413/planogram_compliance?grid_width=10&grid_height=4&sample_size=10
pub async fn get_planogram_compliance(
    State(state): State<AppState>,
    Query(request): Query<PlanogramComplianceRequest>,
) -> Result<Json<ComplianceReport>, ApiError> {
    tracing::info!(
        "D413 Dashboard: Getting compliance map {:?}x{:?}",
        request.grid_width,
        request.grid_height
    );

    let snapshot = current_snapshot(&state)
        .await
        .map_err(|e| error_response("D413 Dashboard: Failed to load snapshot", e))?;

    match service::get_planogram_compliance(&snapshot, &request, &state.config.dashboard) {
        Ok(report) => {
            tracing::info!(
                "D413 Dashboard: Returning {} populated cells, {} errors in sample",
                report.cells.len(),
                report.non_compliant_sample.len()
            );
            Ok(Json(report))
        }
        Err(e) => Err(error_response(
            "D413 Dashboard: Failed to build compliance map",
            e.into(),
        )),
    }
}
