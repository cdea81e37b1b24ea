use crate::constants::{G_0, WGS84_A};
use crate::coordinates::ecef_to_altitude;
use crate::errors::SimResult;
use nalgebra as na;

/// Gravity magnitude at a given altitude, inverse-square from the equatorial radius
pub fn gravity_at_altitude(altitude: f64) -> f64 {
    G_0 * (WGS84_A / (WGS84_A + altitude)).powi(2)
}

/// Gravitational acceleration in the ECEF frame, directed at the geocenter
pub fn gravity_acceleration(position: &na::Vector3<f64>) -> SimResult<na::Vector3<f64>> {
    let altitude = ecef_to_altitude(position)?;
    Ok(gravity_with_altitude(position, altitude))
}

/// Same as `gravity_acceleration` for a position whose altitude is already known
pub fn gravity_with_altitude(position: &na::Vector3<f64>, altitude: f64) -> na::Vector3<f64> {
    position.normalize() * gravity_at_altitude(altitude)
}
