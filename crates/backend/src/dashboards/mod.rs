pub mod d410_shelf_overview;
pub mod d411_restock_velocity;
pub mod d412_revenue_loss;
pub mod d413_planogram_compliance;
