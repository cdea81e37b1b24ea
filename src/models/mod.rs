pub mod projectile;
pub mod records;
pub mod shape;

pub use projectile::{AerodynamicProperties, Projectile};
pub use records::{RunRecord, SummaryRecord};
pub use shape::{ProjectileShape, Shape, ShapeDescription, ShapeKind};
