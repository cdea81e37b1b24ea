// Earth model (WGS84)
pub const WGS84_A: f64 = 6378137.0; // Semi-major axis [m]
pub const WGS84_F: f64 = 1.0 / 298.257223563; // Flattening

pub const G_0: f64 = -9.80665; // Standard gravity, pointing at the geocenter (m/s²)

// Geodetic latitude solve
pub const LATITUDE_TOLERANCE: f64 = 1e-12; // rad
pub const MAX_LATITUDE_ITERATIONS: usize = 50;

// Simulation
pub const MAX_STEPS: usize = 100_000;
pub const DEFAULT_DT: f64 = 0.1; // s

// Dispersion
pub const MIN_POSITIVE_DRAW: f64 = 1e-9; // Replaces negative draws of strictly positive inputs

// Math
pub const PI: f64 = std::f64::consts::PI;
