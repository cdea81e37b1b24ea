use nalgebra as na;

/// Flow regime relative to the local speed of sound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRegime {
    Subsonic,
    Supersonic,
}

impl FlowRegime {
    /// Subsonic while the local speed of sound exceeds the body's speed
    pub fn classify(speed: f64, speed_of_sound: f64) -> Self {
        if speed_of_sound > speed {
            FlowRegime::Subsonic
        } else {
            FlowRegime::Supersonic
        }
    }

    pub fn is_subsonic(self) -> bool {
        self == FlowRegime::Subsonic
    }
}

/// Drag deceleration along the current heading.
///
/// Magnitude is `Cd·A·ρ·|v|²/2 / m`, directed against `velocity`. A body at rest
/// sees no drag.
pub fn drag_acceleration(
    velocity: &na::Vector3<f64>,
    drag_coefficient: f64,
    area: f64,
    density: f64,
    mass: f64,
) -> na::Vector3<f64> {
    let v: f64 = velocity.magnitude();
    if v == 0.0 {
        return na::Vector3::zeros();
    }

    let accel_magnitude: f64 = -(drag_coefficient * area * density * v.powi(2) / 2.0) / mass;
    (velocity / v) * accel_magnitude
}
