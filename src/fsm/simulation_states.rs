use std::fmt;

/// Why a run stopped stepping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Altitude reached or crossed zero
    Grounded,
    /// Step cap hit before impact
    StepLimitReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    Initializing,
    Stepping,
    Terminated(Termination),
    /// A step failed; the run yields nothing further
    Aborted,
}

impl SimulationState {
    pub fn is_finished(&self) -> bool {
        matches!(self, SimulationState::Terminated(_) | SimulationState::Aborted)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Termination::Grounded => write!(f, "Grounded"),
            Termination::StepLimitReached => write!(f, "Step Limit Reached"),
        }
    }
}

impl fmt::Display for SimulationState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationState::Initializing => write!(f, "Initializing"),
            SimulationState::Stepping => write!(f, "Stepping"),
            SimulationState::Terminated(reason) => write!(f, "Terminated ({})", reason),
            SimulationState::Aborted => write!(f, "Aborted"),
        }
    }
}
