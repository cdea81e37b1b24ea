//! Altitude-indexed atmosphere property table.
//!
//! The resource is a comma separated file with two header lines (column
//! names and units) followed by rows of
//! `altitude, temperature, pressure, density, speed_of_sound, dynamic_viscosity`
//! in ascending altitude.

use crate::errors::{SimError, SimResult};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const HEADER_LINES: usize = 2;
const FIELD_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereRow {
    pub altitude: f64,          // m
    pub temperature: f64,       // K
    pub pressure: f64,          // Pa
    pub density: f64,           // kg/m³
    pub speed_of_sound: f64,    // m/s
    pub dynamic_viscosity: f64, // Pa·s
}

impl AtmosphereRow {
    /// Reynolds number for a body of the given characteristic length moving at `speed`
    pub fn reynolds_number(&self, speed: f64, characteristic_length: f64) -> f64 {
        let kinematic_viscosity = self.dynamic_viscosity / self.density;
        speed * characteristic_length / kinematic_viscosity
    }

    fn interpolate(lower: &Self, upper: &Self, altitude: f64) -> Self {
        let fraction = (altitude - lower.altitude) / (upper.altitude - lower.altitude);
        let lerp = |y1: f64, y2: f64| y1 + (y2 - y1) * fraction;

        AtmosphereRow {
            altitude,
            temperature: lerp(lower.temperature, upper.temperature),
            pressure: lerp(lower.pressure, upper.pressure),
            density: lerp(lower.density, upper.density),
            speed_of_sound: lerp(lower.speed_of_sound, upper.speed_of_sound),
            dynamic_viscosity: lerp(lower.dynamic_viscosity, upper.dynamic_viscosity),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AtmosphereTable {
    rows: Vec<AtmosphereRow>,
}

impl AtmosphereTable {
    /// Loads the table from a file on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> SimResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SimError::ResourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Parses the table from any CSV source, skipping the two header lines.
    pub fn from_reader<R: Read>(reader: R) -> SimResult<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in rdr.records().skip(HEADER_LINES) {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line());

            if record.len() < FIELD_COUNT {
                return Err(SimError::MalformedTable {
                    line,
                    reason: format!("expected {} fields, found {}", FIELD_COUNT, record.len()),
                });
            }

            let mut values = [0.0; FIELD_COUNT];
            for (i, value) in values.iter_mut().enumerate() {
                *value = record[i].parse::<f64>().map_err(|e| SimError::MalformedTable {
                    line,
                    reason: format!("column {}: {}", i + 1, e),
                })?;
            }

            rows.push(AtmosphereRow {
                altitude: values[0],
                temperature: values[1],
                pressure: values[2],
                density: values[3],
                speed_of_sound: values[4],
                dynamic_viscosity: values[5],
            });
        }

        Self::from_rows(rows)
    }

    /// Builds a table from rows that must already be sorted by altitude.
    pub fn from_rows(rows: Vec<AtmosphereRow>) -> SimResult<Self> {
        if rows.is_empty() {
            return Err(SimError::EmptyTable);
        }
        if let Some(i) = rows.windows(2).position(|w| w[1].altitude < w[0].altitude) {
            return Err(SimError::MalformedTable {
                line: (i + 1 + HEADER_LINES + 1) as u64,
                reason: "altitudes must be non-decreasing".to_string(),
            });
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[AtmosphereRow] {
        &self.rows
    }

    /// Atmospheric properties at `altitude`, linearly interpolated between the
    /// bracketing rows. Outside the table the nearest boundary row is returned
    /// unchanged.
    pub fn lookup(&self, altitude: f64) -> AtmosphereRow {
        // First row strictly above the requested altitude
        let upper = self.rows.partition_point(|row| row.altitude <= altitude);

        if upper == 0 {
            return self.rows[0];
        }
        if upper == self.rows.len() {
            return self.rows[self.rows.len() - 1];
        }

        let lower = &self.rows[upper - 1];
        if lower.altitude == altitude {
            return *lower;
        }
        AtmosphereRow::interpolate(lower, &self.rows[upper], altitude)
    }
}
