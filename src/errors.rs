use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("atmosphere resource {path:?} not found: {source}")]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("geodetic latitude did not converge within {iterations} iterations")]
    ConvergenceFailure { iterations: usize },
    #[error("invalid shape '{0}' (expected 'cylinder' or 'sphere')")]
    InvalidShape(String),
    #[error("malformed atmosphere table at line {line}: {reason}")]
    MalformedTable { line: u64, reason: String },
    #[error("atmosphere table has no rows")]
    EmptyTable,
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
