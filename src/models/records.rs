use super::shape::ShapeDescription;
use crate::fsm::simulation_states::Termination;
use nalgebra as na;

/// Snapshot of the projectile at one integration step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunRecord {
    pub time: f64, // s since release
    pub position: na::Vector3<f64>,
    pub velocity: na::Vector3<f64>,
    pub altitude: f64,
}

/// Final state of a run together with the inputs that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryRecord {
    pub run_num: usize,
    pub dt: f64,
    pub total_time: f64,
    pub position: na::Vector3<f64>,
    pub altitude: f64,
    pub mass: f64,
    pub shape: ShapeDescription,
    pub cd_subsonic: f64,
    pub cd_supersonic: f64,
    pub initial_velocity: na::Vector3<f64>,
    pub termination: Termination,
    pub steps: usize,
}
