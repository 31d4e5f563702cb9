use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;
use crate::shared::app_state::AppState;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/config/ui", get(handlers::config::get_ui_config))
        // ========================================
        // DASHBOARDS
        // ========================================
        .route(
            "/api/d410/overview",
            get(handlers::d410_shelf_overview::get_overview),
        )
        .route(
            "/api/d411/categories",
            get(handlers::d411_restock_velocity::get_categories),
        )
        .route(
            "/api/d411/restock_velocity",
            get(handlers::d411_restock_velocity::get_restock_velocity),
        )
        .route(
            "/api/d412/revenue_loss",
            get(handlers::d412_revenue_loss::get_revenue_loss),
        )
        .route(
            "/api/d413/planogram_compliance",
            get(handlers::d413_planogram_compliance::get_planogram_compliance),
        )
        // ========================================
        // USECASES
        // ========================================
        .route(
            "/api/u510/generate_sample_data",
            post(handlers::u510_generate_sample_data::generate_sample_data),
        )
        .with_state(state)
}
