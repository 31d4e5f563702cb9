pub mod a101_restock_event;
pub mod a102_revenue_loss;
pub mod a103_planogram_audit;
