pub mod coordinate_transformation;

pub use coordinate_transformation::{ecef_to_altitude, ecef_to_geodetic, geodetic_to_ecef, GeodeticPosition};
