use super::run_parameters::{DispersionSpec, RunParameters};
use crate::constants::{DEFAULT_DT, MAX_STEPS};
use std::path::PathBuf;

/// What a batch does when one run fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the batch and report the error
    #[default]
    Abort,
    /// Log the failure and carry on with the next run
    SkipRun,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchConfig {
    pub parameters: RunParameters,
    pub dispersion: DispersionSpec,
    pub run_count: usize,
    pub dt: f64, // s
    pub seed: Option<u64>,
    pub file_prefix: String,
    pub full_output: bool,
    pub atmosphere_path: PathBuf,
    pub max_steps: usize,
    pub failure_policy: FailurePolicy,
}

impl BatchConfig {
    pub const RUN_COUNT: usize = 10;
    pub const ATMOSPHERE_FILE: &'static str = "atmosphere.csv";
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            parameters: RunParameters::default(),
            dispersion: DispersionSpec::default(),
            run_count: Self::RUN_COUNT,
            dt: DEFAULT_DT,
            seed: None,
            file_prefix: String::new(),
            full_output: false,
            atmosphere_path: PathBuf::from(Self::ATMOSPHERE_FILE),
            max_steps: MAX_STEPS,
            failure_policy: FailurePolicy::default(),
        }
    }
}
