use super::atmosphere::AtmosphereTable;
use super::drag::FlowRegime;
use super::gravity::gravity_with_altitude;
use crate::errors::SimResult;
use crate::models::Projectile;
use nalgebra as na;

pub trait EquationsOfMotion {
    fn compute_accelerations(&self, projectile: &Projectile) -> SimResult<Accelerations>;
}

/// Accelerations acting on the projectile at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accelerations {
    pub drag: na::Vector3<f64>,
    pub gravity: na::Vector3<f64>,
    pub regime: FlowRegime,
}

impl Accelerations {
    pub fn total(&self) -> na::Vector3<f64> {
        self.drag + self.gravity
    }
}

/// Gravity plus table-driven aerodynamic drag
pub struct BallisticDynamics<'a> {
    atmosphere: &'a AtmosphereTable,
}

impl<'a> BallisticDynamics<'a> {
    pub fn new(atmosphere: &'a AtmosphereTable) -> Self {
        Self { atmosphere }
    }
}

impl EquationsOfMotion for BallisticDynamics<'_> {
    fn compute_accelerations(&self, projectile: &Projectile) -> SimResult<Accelerations> {
        let air = self.atmosphere.lookup(projectile.altitude());
        let regime = FlowRegime::classify(projectile.speed(), air.speed_of_sound);

        let drag = projectile.drag_accel(air.density, regime, projectile.frontal_area());
        let gravity = gravity_with_altitude(&projectile.position(), projectile.altitude());

        Ok(Accelerations {
            drag,
            gravity,
            regime,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::{geodetic_to_ecef, GeodeticPosition};
    use crate::models::Shape;
    use crate::physics::atmosphere::AtmosphereRow;
    use crate::physics::gravity::gravity_acceleration;
    use approx::assert_abs_diff_eq;

    fn uniform_air(speed_of_sound: f64) -> AtmosphereTable {
        AtmosphereTable::from_rows(vec![AtmosphereRow {
            altitude: 0.0,
            temperature: 288.15,
            pressure: 101325.0,
            density: 1.0,
            speed_of_sound,
            dynamic_viscosity: 1.8e-5,
        }])
        .unwrap()
    }

    fn projectile(velocity: na::Vector3<f64>) -> Projectile {
        let position = geodetic_to_ecef(&GeodeticPosition::new(10.0, 20.0, 5000.0));
        Projectile::new(Shape::Sphere { diameter: 2.0 }, position, velocity, 100.0, 0.5, 2.0).unwrap()
    }

    #[test]
    fn test_regime_selection() {
        let table = uniform_air(300.0);
        let dynamics = BallisticDynamics::new(&table);

        let slow = dynamics.compute_accelerations(&projectile(na::Vector3::new(0.0, 0.0, -100.0))).unwrap();
        assert_eq!(slow.regime, FlowRegime::Subsonic);

        let fast = dynamics.compute_accelerations(&projectile(na::Vector3::new(0.0, 0.0, -600.0))).unwrap();
        assert_eq!(fast.regime, FlowRegime::Supersonic);
        // 2.0 * pi * 1.0 * 360000 / 2 / 100
        assert_abs_diff_eq!(fast.drag[2], 3600.0 * crate::constants::PI, epsilon = 1e-6);
    }

    #[test]
    fn test_total_is_drag_plus_gravity() {
        let table = uniform_air(300.0);
        let p = projectile(na::Vector3::new(50.0, -20.0, -100.0));
        let acc = BallisticDynamics::new(&table).compute_accelerations(&p).unwrap();

        assert_abs_diff_eq!(acc.gravity, gravity_acceleration(&p.position()).unwrap(), epsilon = 1e-12);
        assert_abs_diff_eq!(acc.total(), acc.drag + acc.gravity, epsilon = 1e-12);
    }
}
