pub mod csv_writer;
pub mod memory;

pub use csv_writer::CsvSink;
pub use memory::MemorySink;

use crate::errors::SimResult;
use crate::models::{RunRecord, SummaryRecord};

/// Consumer of the record stream produced by a batch
pub trait RecordSink {
    fn begin_run(&mut self, run_num: usize) -> SimResult<()>;
    fn record_step(&mut self, record: &RunRecord) -> SimResult<()>;
    fn record_summary(&mut self, summary: &SummaryRecord) -> SimResult<()>;

    fn finish(&mut self) -> SimResult<()> {
        Ok(())
    }
}
