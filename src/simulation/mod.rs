pub mod batch;
pub mod runner;

pub use batch::{prepare_run, run_batch, BatchReport};
pub use runner::{Simulation, SimulationEvent, SimulationSettings};
