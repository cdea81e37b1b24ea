use crate::errors::SimResult;
use crate::models::Projectile;
use crate::physics::dynamics::{Accelerations, EquationsOfMotion};
use nalgebra as na;

/// One explicit step under constant acceleration.
///
/// Position takes the second-order term, velocity the first-order one; both
/// use the pre-step velocity.
pub fn propagate(
    position: &na::Vector3<f64>,
    velocity: &na::Vector3<f64>,
    accel: &na::Vector3<f64>,
    dt: f64,
) -> (na::Vector3<f64>, na::Vector3<f64>) {
    let new_position = position + velocity * dt + accel * (0.5 * dt * dt);
    let new_velocity = velocity + accel * dt;
    (new_position, new_velocity)
}

pub struct FixedStep<T: EquationsOfMotion> {
    eom: T,
    dt: f64,
}

impl<T: EquationsOfMotion> FixedStep<T> {
    pub fn new(eom: T, dt: f64) -> Self {
        FixedStep { eom, dt }
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Evaluates the accelerations at the current state and advances the projectile by `dt`.
    pub fn integrate(&self, projectile: &mut Projectile) -> SimResult<Accelerations> {
        let accelerations = self.eom.compute_accelerations(projectile)?;
        projectile.advance(&accelerations.total(), self.dt)?;
        Ok(accelerations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(0.1; "default step")]
    #[test_case(1.0; "one second")]
    #[test_case(0.0; "zero step")]
    fn test_propagate_constant_acceleration(dt: f64) {
        let position = na::Vector3::new(1.0, 2.0, 3.0);
        let velocity = na::Vector3::new(10.0, 0.0, -5.0);
        let accel = na::Vector3::new(0.0, -9.8, 2.0);

        let (p, v) = propagate(&position, &velocity, &accel, dt);

        let expected_p = na::Vector3::new(
            1.0 + 10.0 * dt,
            2.0 - 4.9 * dt * dt,
            3.0 - 5.0 * dt + dt * dt,
        );
        assert_abs_diff_eq!(p, expected_p, epsilon = 1e-12);
        assert_abs_diff_eq!(v, na::Vector3::new(10.0, -9.8 * dt, -5.0 + 2.0 * dt), epsilon = 1e-12);
    }
}
