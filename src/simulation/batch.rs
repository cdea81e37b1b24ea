//! Monte Carlo batch driver.

use super::runner::{Simulation, SimulationEvent, SimulationSettings};
use crate::config::{BatchConfig, FailurePolicy};
use crate::coordinates::geodetic_to_ecef;
use crate::dispersion::{disperse_geodetic, disperse_scalar, disperse_vector, unit_sphere_direction};
use crate::errors::{SimError, SimResult};
use crate::fsm::Termination;
use crate::models::{Projectile, Shape, ShapeKind, SummaryRecord};
use crate::output::RecordSink;
use crate::physics::atmosphere::AtmosphereTable;
use rand::Rng;

#[derive(Debug, Default)]
pub struct BatchReport {
    pub summaries: Vec<SummaryRecord>,
    /// Runs skipped under `FailurePolicy::SkipRun`, with the reason
    pub failed: Vec<(usize, String)>,
}

impl BatchReport {
    pub fn completed(&self) -> usize {
        self.summaries.len()
    }

    pub fn count(&self, termination: Termination) -> usize {
        self.summaries.iter().filter(|s| s.termination == termination).count()
    }
}

/// Draws the inputs of one run and builds its projectile.
///
/// Fields are dispersed in a fixed order (position, velocity, mass, length,
/// diameter, impulse, subsonic Cd, supersonic Cd) and one impulse direction is
/// always drawn, so a seeded stream yields the same runs every time.
pub fn prepare_run<R: Rng + ?Sized>(config: &BatchConfig, kind: ShapeKind, rng: &mut R) -> SimResult<Projectile> {
    let nominal = &config.parameters;
    let spread = &config.dispersion;
    let mut params = nominal.clone();

    if spread.position.enabled {
        params.position = disperse_geodetic(rng, &nominal.position, &spread.position.std_dev);
    }
    if spread.velocity.enabled {
        params.velocity = disperse_vector(rng, &nominal.velocity, &spread.velocity.std_dev);
    }
    let scalars = [
        (&spread.mass, nominal.mass, &mut params.mass, false),
        (&spread.length, nominal.length, &mut params.length, false),
        (&spread.diameter, nominal.diameter, &mut params.diameter, false),
        (&spread.impulse, nominal.impulse, &mut params.impulse, true),
        (&spread.cd_subsonic, nominal.cd_subsonic, &mut params.cd_subsonic, false),
        (&spread.cd_supersonic, nominal.cd_supersonic, &mut params.cd_supersonic, false),
    ];
    for (field_spread, mean, value, allow_negative) in scalars {
        if field_spread.enabled {
            *value = disperse_scalar(rng, mean, field_spread.std_dev, allow_negative);
        }
    }

    let velocity = params.velocity + unit_sphere_direction(rng) * params.impulse;
    let position = geodetic_to_ecef(&params.position);

    Projectile::new(
        Shape::new(kind, params.diameter, params.length),
        position,
        velocity,
        params.mass,
        params.cd_subsonic,
        params.cd_supersonic,
    )
}

enum RunOutcome {
    Finished(SummaryRecord),
    Failed(SimError),
}

/// Drives one simulation into the sink. The outer error is the sink's, the
/// inner outcome is the run's.
fn simulate<S: RecordSink>(
    projectile: Projectile,
    atmosphere: &AtmosphereTable,
    settings: SimulationSettings,
    sink: &mut S,
) -> SimResult<RunOutcome> {
    for event in Simulation::new(projectile, atmosphere, settings) {
        match event {
            Ok(SimulationEvent::Step(record)) => sink.record_step(&record)?,
            Ok(SimulationEvent::Summary(record)) => {
                sink.record_summary(&record)?;
                return Ok(RunOutcome::Finished(record));
            }
            Err(e) => return Ok(RunOutcome::Failed(e)),
        }
    }
    unreachable!("simulation ended without a summary")
}

/// Runs every trial of the batch, streaming records into `sink`.
///
/// Sink errors always end the batch. Run errors end it under
/// `FailurePolicy::Abort` and are collected in the report under
/// `FailurePolicy::SkipRun`.
pub fn run_batch<R: Rng + ?Sized, S: RecordSink>(
    config: &BatchConfig,
    atmosphere: &AtmosphereTable,
    rng: &mut R,
    sink: &mut S,
) -> SimResult<BatchReport> {
    let kind: ShapeKind = config.parameters.shape.parse()?;
    let mut report = BatchReport::default();

    for run_num in 0..config.run_count {
        let settings = SimulationSettings {
            run_num,
            dt: config.dt,
            max_steps: config.max_steps,
        };

        let outcome = match prepare_run(config, kind, rng) {
            Ok(projectile) => {
                sink.begin_run(run_num)?;
                simulate(projectile, atmosphere, settings, sink)?
            }
            Err(e) => RunOutcome::Failed(e),
        };

        match outcome {
            RunOutcome::Finished(summary) => {
                println!(
                    "Run {}: Simulation ended at {} secs ({})",
                    run_num, summary.total_time, summary.termination
                );
                report.summaries.push(summary);
            }
            RunOutcome::Failed(e) => match config.failure_policy {
                FailurePolicy::Abort => return Err(e),
                FailurePolicy::SkipRun => {
                    eprintln!("Warning: run {} failed and was skipped: {}", run_num, e);
                    report.failed.push((run_num, e.to_string()));
                }
            },
        }
    }

    sink.finish()?;
    Ok(report)
}
