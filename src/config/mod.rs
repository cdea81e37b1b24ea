pub mod batch;
pub mod run_parameters;

pub use batch::{BatchConfig, FailurePolicy};
pub use run_parameters::{DispersionSpec, RunParameters, Spread};
