use axum::{extract::State, Json};
use contracts::usecases::u510_generate_sample_data::{
    GenerateSampleDataRequest, GenerateSampleDataResponse,
};

use super::{error_response, ApiError};
use crate::shared::app_state::AppState;
use crate::usecases::u510_generate_sample_data::SampleDataExecutor;

/// POST /api/u510/generate_sample_data
///
/// Drops the cached snapshot once the files are rewritten.
pub async fn generate_sample_data(
    State(state): State<AppState>,
    Json(request): Json<GenerateSampleDataRequest>,
) -> Result<Json<GenerateSampleDataResponse>, ApiError> {
    let executor = SampleDataExecutor::new(state.snapshots.source().clone());

    let result = tokio::task::spawn_blocking(move || executor.execute(&request))
        .await
        .map_err(anyhow::Error::from)
        .and_then(|r| r)
        .and_then(|response| {
            state.snapshots.invalidate()?;
            Ok(response)
        });

    match result {
        Ok(response) => Ok(Json(response)),
        Err(e) => Err(error_response("U510: Sample data generation failed", e)),
    }
}
