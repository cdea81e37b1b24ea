use crate::coordinates::GeodeticPosition;
use nalgebra as na;

/// Nominal inputs of a single run
#[derive(Debug, Clone, PartialEq)]
pub struct RunParameters {
    pub position: GeodeticPosition,
    pub velocity: na::Vector3<f64>, // ECEF, m/s
    pub mass: f64,                  // kg
    pub length: f64,                // m
    pub diameter: f64,              // m
    pub impulse: f64,               // m/s, applied along a random direction at release
    pub cd_subsonic: f64,
    pub cd_supersonic: f64,
    pub shape: String,
}

impl RunParameters {
    pub const LATITUDE: f64 = -39.91144; // deg
    pub const LONGITUDE: f64 = 177.96056; // deg
    pub const ALTITUDE: f64 = 74625.5; // m
    pub const VELOCITY: [f64; 3] = [196.9, -193.5, -2149.0]; // m/s
    pub const MASS: f64 = 1068.0; // kg
    pub const LENGTH: f64 = 12.6; // m
    pub const DIAMETER: f64 = 1.2; // m
    pub const IMPULSE: f64 = 73.7; // m/s
    pub const CD_SUBSONIC: f64 = 0.8;
    pub const CD_SUPERSONIC: f64 = 1.6;
    pub const SHAPE: &'static str = "cylinder";
}

impl Default for RunParameters {
    fn default() -> Self {
        RunParameters {
            position: GeodeticPosition::new(Self::LATITUDE, Self::LONGITUDE, Self::ALTITUDE),
            velocity: na::Vector3::from(Self::VELOCITY),
            mass: Self::MASS,
            length: Self::LENGTH,
            diameter: Self::DIAMETER,
            impulse: Self::IMPULSE,
            cd_subsonic: Self::CD_SUBSONIC,
            cd_supersonic: Self::CD_SUPERSONIC,
            shape: Self::SHAPE.to_string(),
        }
    }
}

/// Standard deviation of one input and whether it is dispersed at all
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread<T> {
    pub std_dev: T,
    pub enabled: bool,
}

impl<T> Spread<T> {
    pub fn new(std_dev: T, enabled: bool) -> Self {
        Spread { std_dev, enabled }
    }
}

impl Default for Spread<f64> {
    fn default() -> Self {
        Spread::new(0.0, false)
    }
}

impl Default for Spread<na::Vector3<f64>> {
    fn default() -> Self {
        Spread::new(na::Vector3::zeros(), false)
    }
}

impl Default for Spread<GeodeticPosition> {
    fn default() -> Self {
        Spread::new(GeodeticPosition::new(0.0, 0.0, 0.0), false)
    }
}

/// Per-field dispersion of the run inputs. Everything is off by default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispersionSpec {
    pub position: Spread<GeodeticPosition>,
    pub velocity: Spread<na::Vector3<f64>>,
    pub mass: Spread<f64>,
    pub length: Spread<f64>,
    pub diameter: Spread<f64>,
    pub impulse: Spread<f64>,
    pub cd_subsonic: Spread<f64>,
    pub cd_supersonic: Spread<f64>,
}
