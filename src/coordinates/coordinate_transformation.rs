use crate::constants::*;
use crate::errors::{SimError, SimResult};
use nalgebra as na;

/// Geodetic position on the WGS84 ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeodeticPosition {
    pub latitude: f64,  // deg
    pub longitude: f64, // deg
    pub altitude: f64,  // m above the ellipsoid
}

impl GeodeticPosition {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Packs (lat, lon, alt) into a vector so it can be perturbed component-wise.
    pub fn to_vector(&self) -> na::Vector3<f64> {
        na::Vector3::new(self.latitude, self.longitude, self.altitude)
    }

    pub fn from_vector(v: &na::Vector3<f64>) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// First eccentricity squared
fn eccentricity_squared() -> f64 {
    1.0 - (1.0 - WGS84_F).powi(2)
}

/// Convert geodetic coordinates to ECEF (WGS84)
pub fn geodetic_to_ecef(pos: &GeodeticPosition) -> na::Vector3<f64> {
    let lat = pos.latitude.to_radians();
    let lon = pos.longitude.to_radians();
    let e2 = eccentricity_squared();

    // Prime vertical radius of curvature
    let n = WGS84_A / (1.0 - e2 * lat.sin().powi(2)).sqrt();

    na::Vector3::new(
        (n + pos.altitude) * lat.cos() * lon.cos(),
        (n + pos.altitude) * lat.cos() * lon.sin(),
        (n * (1.0 - e2) + pos.altitude) * lat.sin(),
    )
}

/// Convert ECEF to geodetic coordinates (WGS84) using Bowring's iteration.
///
/// Fails with `ConvergenceFailure` when the geodetic latitude has not settled
/// within `MAX_LATITUDE_ITERATIONS` refinements.
pub fn ecef_to_geodetic(pos: &na::Vector3<f64>) -> SimResult<GeodeticPosition> {
    let (x, y, z) = (pos[0], pos[1], pos[2]);
    let a = WGS84_A;
    let f = WGS84_F;
    let e2 = eccentricity_squared();

    let s = (x * x + y * y).sqrt();
    let longitude = y.atan2(x);

    let bowring = |reduced_lat: f64| {
        (z + (e2 * (1.0 - f) / (1.0 - e2)) * a * reduced_lat.sin().powi(3))
            .atan2(s - e2 * a * reduced_lat.cos().powi(3))
    };

    // Initial guess
    let mut reduced_lat = z.atan2((1.0 - f) * s);
    let mut latitude = bowring(reduced_lat);

    let mut converged = false;
    for _ in 0..MAX_LATITUDE_ITERATIONS {
        let prev_lat = latitude;
        reduced_lat = ((1.0 - f) * latitude.sin()).atan2(latitude.cos());
        latitude = bowring(reduced_lat);

        if (latitude - prev_lat).abs() < LATITUDE_TOLERANCE {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(SimError::ConvergenceFailure {
            iterations: MAX_LATITUDE_ITERATIONS,
        });
    }

    let sin_lat = latitude.sin();
    let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let altitude = s * latitude.cos() + (z + e2 * n * sin_lat) * sin_lat - n;

    Ok(GeodeticPosition {
        latitude: latitude.to_degrees(),
        longitude: longitude.to_degrees(),
        altitude,
    })
}

/// Height above the WGS84 ellipsoid of an ECEF position
pub fn ecef_to_altitude(pos: &na::Vector3<f64>) -> SimResult<f64> {
    Ok(ecef_to_geodetic(pos)?.altitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test_case(0.0, 0.0, 0.0; "equator at sea level")]
    #[test_case(-39.91144, 177.96056, 74625.5; "default release point")]
    #[test_case(45.0, -93.0, 12_000.0; "mid latitude")]
    #[test_case(89.9, 10.0, 30_000.0; "near the pole")]
    #[test_case(-60.0, 120.0, -250.0; "below the ellipsoid")]
    #[test_case(10.0, 20.0, 400_000.0; "low orbit altitude")]
    fn test_geodetic_round_trip(lat: f64, lon: f64, alt: f64) {
        let ecef = geodetic_to_ecef(&GeodeticPosition::new(lat, lon, alt));
        let back = ecef_to_geodetic(&ecef).unwrap();

        assert_abs_diff_eq!(back.altitude, alt, epsilon = 1e-3);
        assert_abs_diff_eq!(back.latitude, lat, epsilon = 1e-8);
        assert_abs_diff_eq!(back.longitude, lon, epsilon = 1e-8);
    }

    #[test]
    fn test_equator_prime_meridian() {
        let ecef = geodetic_to_ecef(&GeodeticPosition::new(0.0, 0.0, 1000.0));
        assert_abs_diff_eq!(ecef, na::Vector3::new(WGS84_A + 1000.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_north_pole() {
        let b = WGS84_A * (1.0 - WGS84_F);
        let ecef = geodetic_to_ecef(&GeodeticPosition::new(90.0, 0.0, 0.0));
        assert_abs_diff_eq!(ecef[2], b, epsilon = 1e-6);
        assert_abs_diff_eq!(ecef_to_altitude(&na::Vector3::new(0.0, 0.0, b + 500.0)).unwrap(), 500.0, epsilon = 1e-6);
    }

    #[test]
    fn test_geocenter_does_not_converge() {
        let result = ecef_to_altitude(&na::Vector3::zeros());
        assert!(matches!(result, Err(SimError::ConvergenceFailure { iterations: 50 })));
    }
}
