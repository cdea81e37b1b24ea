pub mod config;
pub mod constants;
pub mod coordinates;
pub mod dispersion;
pub mod errors;
pub mod fsm;
pub mod integrators;
pub mod models;
pub mod output;
pub mod physics;
pub mod simulation;
