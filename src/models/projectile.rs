use super::shape::{ProjectileShape, Shape};
use crate::coordinates::ecef_to_altitude;
use crate::errors::SimResult;
use crate::integrators::fixed_step::propagate;
use crate::physics::drag::{drag_acceleration, FlowRegime};
use nalgebra as na;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AerodynamicProperties {
    pub cd_subsonic: f64,
    pub cd_supersonic: f64,
    pub frontal_area: f64, // m², derived from the shape
}

impl AerodynamicProperties {
    pub fn drag_coefficient(&self, regime: FlowRegime) -> f64 {
        match regime {
            FlowRegime::Subsonic => self.cd_subsonic,
            FlowRegime::Supersonic => self.cd_supersonic,
        }
    }
}

/// Point-mass state of a falling body in the ECEF frame.
///
/// The altitude is kept in step with the position: every mutation of the
/// position goes through `advance`, which re-solves the altitude before
/// returning.
#[derive(Debug, Clone)]
pub struct Projectile {
    position: na::Vector3<f64>,
    velocity: na::Vector3<f64>,
    mass: f64,
    altitude: f64,
    aero: AerodynamicProperties,
    shape: Shape,
}

impl Projectile {
    pub fn new(
        shape: Shape,
        position: na::Vector3<f64>,
        velocity: na::Vector3<f64>,
        mass: f64,
        cd_subsonic: f64,
        cd_supersonic: f64,
    ) -> SimResult<Self> {
        let altitude = ecef_to_altitude(&position)?;
        Ok(Projectile {
            position,
            velocity,
            mass,
            altitude,
            aero: AerodynamicProperties {
                cd_subsonic,
                cd_supersonic,
                frontal_area: shape.frontal_area(),
            },
            shape,
        })
    }

    pub fn position(&self) -> na::Vector3<f64> {
        self.position
    }

    pub fn velocity(&self) -> na::Vector3<f64> {
        self.velocity
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn aerodynamics(&self) -> &AerodynamicProperties {
        &self.aero
    }

    pub fn frontal_area(&self) -> f64 {
        self.aero.frontal_area
    }

    pub fn drag_coefficient(&self, regime: FlowRegime) -> f64 {
        self.aero.drag_coefficient(regime)
    }

    /// Drag acceleration for the given air density and regime over `area`
    pub fn drag_accel(&self, density: f64, regime: FlowRegime, area: f64) -> na::Vector3<f64> {
        drag_acceleration(
            &self.velocity,
            self.drag_coefficient(regime),
            area,
            density,
            self.mass,
        )
    }

    /// Advances position and velocity by one step under constant `accel`,
    /// then refreshes the cached altitude.
    pub fn advance(&mut self, accel: &na::Vector3<f64>, dt: f64) -> SimResult<()> {
        let (position, velocity) = propagate(&self.position, &self.velocity, accel, dt);
        // Solve before committing so a failed solve leaves the state untouched
        let altitude = ecef_to_altitude(&position)?;

        self.position = position;
        self.velocity = velocity;
        self.altitude = altitude;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::WGS84_A;
    use crate::coordinates::{geodetic_to_ecef, GeodeticPosition};
    use approx::assert_abs_diff_eq;

    fn falling_sphere(altitude: f64, velocity: na::Vector3<f64>) -> Projectile {
        let position = geodetic_to_ecef(&GeodeticPosition::new(0.0, 0.0, altitude));
        Projectile::new(Shape::Sphere { diameter: 2.0 }, position, velocity, 10.0, 0.5, 1.5).unwrap()
    }

    #[test]
    fn test_new_caches_altitude() {
        let projectile = falling_sphere(1234.5, na::Vector3::zeros());
        assert_abs_diff_eq!(projectile.altitude(), 1234.5, epsilon = 1e-6);
        assert_abs_diff_eq!(projectile.frontal_area(), crate::constants::PI, epsilon = 1e-12);
    }

    #[test]
    fn test_drag_coefficient_by_regime() {
        let projectile = falling_sphere(0.0, na::Vector3::zeros());
        assert_eq!(projectile.drag_coefficient(FlowRegime::Subsonic), 0.5);
        assert_eq!(projectile.drag_coefficient(FlowRegime::Supersonic), 1.5);
    }

    #[test]
    fn test_drag_accel_uses_regime_coefficient() {
        let projectile = falling_sphere(1000.0, na::Vector3::new(-20.0, 0.0, 0.0));
        let accel = projectile.drag_accel(1.0, FlowRegime::Supersonic, 2.0);

        // 1.5 * 2.0 * 1.0 * 400 / 2 / 10 = 60, opposing -x motion
        assert_abs_diff_eq!(accel, na::Vector3::new(60.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_advance_updates_altitude() {
        let mut projectile = falling_sphere(1000.0, na::Vector3::new(-10.0, 0.0, 0.0));
        projectile.advance(&na::Vector3::new(-2.0, 0.0, 0.0), 1.0).unwrap();

        // x moves by -10 - 0.5 * 2
        assert_abs_diff_eq!(projectile.position()[0], WGS84_A + 1000.0 - 11.0, epsilon = 1e-6);
        assert_abs_diff_eq!(projectile.velocity(), na::Vector3::new(-12.0, 0.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(projectile.altitude(), 989.0, epsilon = 1e-6);
    }
}
