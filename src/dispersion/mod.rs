//! Random perturbation of nominal run inputs.
//!
//! Every sampler takes the generator explicitly so a single seeded stream can
//! be threaded through a whole batch.

pub mod sampler;

pub use sampler::{disperse_geodetic, disperse_scalar, disperse_vector, unit_sphere_direction};
