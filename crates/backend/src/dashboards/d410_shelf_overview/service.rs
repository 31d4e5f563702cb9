use anyhow::Result;
use contracts::dashboards::d410_shelf_overview::{ShelfOverviewRequest, ShelfOverviewResponse};
use contracts::domain::a101_restock_event::RestockEvent;
use std::sync::Arc;

use crate::dashboards::d411_restock_velocity::filter::{available_categories, CategorySelection};
use crate::dashboards::d411_restock_velocity::service as velocity;
use crate::dashboards::d412_revenue_loss::service as revenue;
use crate::dashboards::d413_planogram_compliance::service as compliance;
use crate::shared::config::DashboardConfig;
use crate::shared::data::Snapshot;
use crate::shared::error::validate_all;

/// Compute all three dashboard tabs for one snapshot
///
/// The aggregations share nothing but the read-only snapshot, so they run
/// side by side on the blocking pool.
pub async fn get_shelf_overview(
    snapshot: Arc<Snapshot>,
    request: ShelfOverviewRequest,
    defaults: &DashboardConfig,
) -> Result<ShelfOverviewResponse> {
    let selection = CategorySelection::parse(request.categories.as_deref())?;
    let grid_width =
        compliance::grid_dimension("grid_width", request.grid_width, defaults.grid_width)?;
    let grid_height =
        compliance::grid_dimension("grid_height", request.grid_height, defaults.grid_height)?;
    let top_n = defaults.top_n;
    let sample_size = defaults.error_sample_size;

    let selected_categories = selection.selected(&available_categories(snapshot.restock_events()));

    let velocity_task = {
        let snapshot = snapshot.clone();
        tokio::task::spawn_blocking(move || {
            validate_all(
                RestockEvent::collection_name(),
                snapshot.restock_events(),
                RestockEvent::validate,
            )?;
            let filtered = selection.apply(snapshot.restock_events());
            velocity::aggregate(&filtered, top_n)
        })
    };
    let revenue_task = {
        let snapshot = snapshot.clone();
        tokio::task::spawn_blocking(move || revenue::estimate(snapshot.revenue_records()))
    };
    let compliance_task = {
        let snapshot = snapshot.clone();
        tokio::task::spawn_blocking(move || {
            compliance::build(
                snapshot.compliance_records(),
                grid_width,
                grid_height,
                sample_size,
            )
        })
    };

    let (velocity_report, revenue_report, compliance_report) =
        tokio::try_join!(velocity_task, revenue_task, compliance_task)?;

    Ok(ShelfOverviewResponse {
        selected_categories,
        velocity: velocity_report?,
        revenue: revenue_report?,
        compliance: compliance_report?,
    })
}
