use crate::constants::PI;
use crate::errors::SimError;
use std::fmt;
use std::str::FromStr;

/// Capabilities every projectile shape provides to the drag model and the writers.
pub trait ProjectileShape {
    /// Area presented to the flow, used in the drag equation
    fn frontal_area(&self) -> f64;
    fn describe(&self) -> ShapeDescription;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cylinder,
    Sphere,
}

impl FromStr for ShapeKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cylinder" => Ok(ShapeKind::Cylinder),
            "sphere" => Ok(ShapeKind::Sphere),
            other => Err(SimError::InvalidShape(other.to_string())),
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ShapeKind::Cylinder => write!(f, "cylinder"),
            ShapeKind::Sphere => write!(f, "sphere"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Tumbling cylinder, broadside to the flow
    Cylinder { diameter: f64, length: f64 },
    Sphere { diameter: f64 },
}

impl Shape {
    /// Builds a shape of `kind`; `length` is ignored for spheres.
    pub fn new(kind: ShapeKind, diameter: f64, length: f64) -> Self {
        match kind {
            ShapeKind::Cylinder => Shape::Cylinder { diameter, length },
            ShapeKind::Sphere => Shape::Sphere { diameter },
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Cylinder { .. } => ShapeKind::Cylinder,
            Shape::Sphere { .. } => ShapeKind::Sphere,
        }
    }
}

impl ProjectileShape for Shape {
    fn frontal_area(&self) -> f64 {
        match *self {
            Shape::Cylinder { diameter, length } => diameter * length,
            Shape::Sphere { diameter } => PI * (diameter / 2.0).powi(2),
        }
    }

    fn describe(&self) -> ShapeDescription {
        let (diameter, length) = match *self {
            Shape::Cylinder { diameter, length } => (diameter, Some(length)),
            Shape::Sphere { diameter } => (diameter, None),
        };
        ShapeDescription {
            kind: self.kind(),
            diameter,
            length,
            frontal_area: self.frontal_area(),
        }
    }
}

/// Shape properties as reported in run summaries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDescription {
    pub kind: ShapeKind,
    pub diameter: f64,
    pub length: Option<f64>,
    pub frontal_area: f64,
}
