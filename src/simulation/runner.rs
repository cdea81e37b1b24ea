//! Fixed-step propagation of a single run.
//!
//! A `Simulation` is an iterator: the first item is the release state, every
//! following item is one integration step, and the last item is the run
//! summary. Once the summary (or an error) has been yielded the iterator is
//! exhausted for good.

use crate::constants::{DEFAULT_DT, MAX_STEPS};
use crate::errors::SimResult;
use crate::fsm::{SimulationState, Termination};
use crate::integrators::fixed_step::FixedStep;
use crate::models::{Projectile, ProjectileShape, RunRecord, SummaryRecord};
use crate::physics::atmosphere::AtmosphereTable;
use crate::physics::drag::FlowRegime;
use crate::physics::dynamics::{BallisticDynamics, EquationsOfMotion};
use nalgebra as na;
use std::iter::FusedIterator;

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    Step(RunRecord),
    Summary(SummaryRecord),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSettings {
    pub run_num: usize,
    pub dt: f64,
    pub max_steps: usize,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        SimulationSettings {
            run_num: 0,
            dt: DEFAULT_DT,
            max_steps: MAX_STEPS,
        }
    }
}

pub struct Simulation<T: EquationsOfMotion> {
    projectile: Projectile,
    integrator: FixedStep<T>,
    run_num: usize,
    max_steps: usize,
    initial_velocity: na::Vector3<f64>,
    time: f64,
    steps: usize,
    state: SimulationState,
}

impl<'a> Simulation<BallisticDynamics<'a>> {
    pub fn new(projectile: Projectile, atmosphere: &'a AtmosphereTable, settings: SimulationSettings) -> Self {
        Self::with_dynamics(projectile, BallisticDynamics::new(atmosphere), settings)
    }
}

impl<T: EquationsOfMotion> Simulation<T> {
    pub fn with_dynamics(projectile: Projectile, dynamics: T, settings: SimulationSettings) -> Self {
        Simulation {
            initial_velocity: projectile.velocity(),
            projectile,
            integrator: FixedStep::new(dynamics, settings.dt),
            run_num: settings.run_num,
            max_steps: settings.max_steps,
            time: 0.0,
            steps: 0,
            state: SimulationState::Initializing,
        }
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    fn snapshot(&self) -> RunRecord {
        RunRecord {
            time: self.time,
            position: self.projectile.position(),
            velocity: self.projectile.velocity(),
            altitude: self.projectile.altitude(),
        }
    }

    fn summary(&self, termination: Termination) -> SummaryRecord {
        let aero = self.projectile.aerodynamics();
        SummaryRecord {
            run_num: self.run_num,
            dt: self.integrator.dt(),
            total_time: self.time,
            position: self.projectile.position(),
            altitude: self.projectile.altitude(),
            mass: self.projectile.mass(),
            shape: self.projectile.shape().describe(),
            cd_subsonic: aero.drag_coefficient(FlowRegime::Subsonic),
            cd_supersonic: aero.drag_coefficient(FlowRegime::Supersonic),
            initial_velocity: self.initial_velocity,
            termination,
            steps: self.steps,
        }
    }

    fn terminate(&mut self, termination: Termination) -> SimulationEvent {
        self.state = SimulationState::Terminated(termination);
        SimulationEvent::Summary(self.summary(termination))
    }

    fn step(&mut self) -> SimResult<SimulationEvent> {
        self.time += self.integrator.dt();
        self.integrator.integrate(&mut self.projectile)?;
        self.steps += 1;
        Ok(SimulationEvent::Step(self.snapshot()))
    }
}

impl<T: EquationsOfMotion> Iterator for Simulation<T> {
    type Item = SimResult<SimulationEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            SimulationState::Initializing => {
                self.state = SimulationState::Stepping;
                Some(Ok(SimulationEvent::Step(self.snapshot())))
            }
            SimulationState::Stepping => {
                if self.projectile.altitude() <= 0.0 {
                    Some(Ok(self.terminate(Termination::Grounded)))
                } else if self.steps >= self.max_steps {
                    Some(Ok(self.terminate(Termination::StepLimitReached)))
                } else {
                    let event = self.step();
                    if event.is_err() {
                        self.state = SimulationState::Aborted;
                    }
                    Some(event)
                }
            }
            SimulationState::Terminated(_) | SimulationState::Aborted => None,
        }
    }
}

impl<T: EquationsOfMotion> FusedIterator for Simulation<T> {}
