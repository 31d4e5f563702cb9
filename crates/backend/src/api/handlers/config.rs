use axum::{extract::State, Json};

use crate::shared::app_state::AppState;
use crate::shared::config::UiConfig;

/// GET /api/config/ui
pub async fn get_ui_config(State(state): State<AppState>) -> Json<UiConfig> {
    Json(state.config.ui.clone())
}
