pub mod planogram_error_type;

pub use planogram_error_type::PlanogramErrorType;
