pub mod executor;

pub use executor::SampleDataExecutor;
