pub mod simulation_states;

pub use simulation_states::{SimulationState, Termination};
