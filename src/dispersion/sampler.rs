use crate::constants::{MIN_POSITIVE_DRAW, PI};
use crate::coordinates::GeodeticPosition;
use nalgebra as na;
use rand::Rng;
use rand_distr::StandardNormal;

fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + std_dev * z
}

/// Random direction on the unit sphere.
///
/// The polar angle is drawn through `acos(2u - 1)` so directions do not bunch
/// up at the poles.
pub fn unit_sphere_direction<R: Rng + ?Sized>(rng: &mut R) -> na::Vector3<f64> {
    let theta = 2.0 * PI * rng.gen::<f64>();
    let phi = (2.0 * rng.gen::<f64>() - 1.0).acos();

    na::Vector3::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos())
}

/// Independent normal draw per component. Components with a non-positive
/// standard deviation keep their mean and consume no randomness.
pub fn disperse_vector<R: Rng + ?Sized>(
    rng: &mut R,
    mean: &na::Vector3<f64>,
    std_dev: &na::Vector3<f64>,
) -> na::Vector3<f64> {
    na::Vector3::from_fn(|i, _| {
        if std_dev[i] <= 0.0 {
            mean[i]
        } else {
            normal(rng, mean[i], std_dev[i])
        }
    })
}

pub fn disperse_geodetic<R: Rng + ?Sized>(
    rng: &mut R,
    mean: &GeodeticPosition,
    std_dev: &GeodeticPosition,
) -> GeodeticPosition {
    GeodeticPosition::from_vector(&disperse_vector(rng, &mean.to_vector(), &std_dev.to_vector()))
}

/// Normal draw around `mean`.
///
/// With `allow_negative` unset, draws below `MIN_POSITIVE_DRAW` are replaced by
/// it rather than redrawn.
pub fn disperse_scalar<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64, allow_negative: bool) -> f64 {
    if std_dev <= 0.0 {
        return mean;
    }
    let value = normal(rng, mean, std_dev);
    if !allow_negative && value < MIN_POSITIVE_DRAW {
        MIN_POSITIVE_DRAW
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use test_case::test_case;

    #[test_case(0; "seed 0")]
    #[test_case(42; "seed 42")]
    #[test_case(u64::MAX; "seed max")]
    fn test_unit_sphere_direction_is_unit(seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..1000 {
            let v = unit_sphere_direction(&mut rng);
            assert_abs_diff_eq!(v.magnitude(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_unit_sphere_direction_mean_near_zero() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let sum: na::Vector3<f64> = (0..n).map(|_| unit_sphere_direction(&mut rng)).sum();
        assert!((sum / n as f64).magnitude() < 0.03);
    }

    #[test_case(true; "negatives allowed")]
    #[test_case(false; "negatives clamped")]
    fn test_zero_std_dev_returns_mean(allow_negative: bool) {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            assert_eq!(disperse_scalar(&mut rng, -12.5, 0.0, allow_negative), -12.5);
            assert_eq!(disperse_scalar(&mut rng, 1068.0, -1.0, allow_negative), 1068.0);
        }
    }

    #[test]
    fn test_zero_std_dev_consumes_no_randomness() {
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        disperse_scalar(&mut a, 1.0, 0.0, false);
        disperse_vector(&mut a, &na::Vector3::new(1.0, 2.0, 3.0), &na::Vector3::zeros());
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[test]
    fn test_clamped_draws_stay_positive() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut clamped = 0;
        for _ in 0..5000 {
            let value = disperse_scalar(&mut rng, 0.0, 1.0, false);
            assert!(value >= MIN_POSITIVE_DRAW);
            if value == MIN_POSITIVE_DRAW {
                clamped += 1;
            }
        }
        // Roughly half the draws of a zero-mean normal land below zero
        assert!(clamped > 2000 && clamped < 3000);
    }

    #[test]
    fn test_negative_draws_allowed() {
        let mut rng = StdRng::seed_from_u64(5);
        let any_negative = (0..1000).any(|_| disperse_scalar(&mut rng, 0.0, 1.0, true) < 0.0);
        assert!(any_negative);
    }

    #[test]
    fn test_disperse_vector_mixes_fixed_and_random_components() {
        let mut rng = StdRng::seed_from_u64(9);
        let mean = na::Vector3::new(196.9, -193.5, -2149.0);
        let std_dev = na::Vector3::new(0.0, 5.0, 0.0);

        let mut sum_y = 0.0;
        let n = 5000;
        for _ in 0..n {
            let v = disperse_vector(&mut rng, &mean, &std_dev);
            assert_eq!(v[0], 196.9);
            assert_eq!(v[2], -2149.0);
            sum_y += v[1];
        }
        assert_abs_diff_eq!(sum_y / n as f64, -193.5, epsilon = 0.5);
    }

    #[test]
    fn test_disperse_geodetic() {
        let mut rng = StdRng::seed_from_u64(1);
        let mean = GeodeticPosition::new(-39.91144, 177.96056, 74625.5);
        let std_dev = GeodeticPosition::new(0.0, 0.0, 100.0);

        let p = disperse_geodetic(&mut rng, &mean, &std_dev);
        assert_eq!(p.latitude, mean.latitude);
        assert_eq!(p.longitude, mean.longitude);
        assert_ne!(p.altitude, mean.altitude);
    }
}
