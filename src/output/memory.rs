use super::RecordSink;
use crate::errors::SimResult;
use crate::models::{RunRecord, SummaryRecord};

/// Keeps every record in memory, grouped by run
#[derive(Debug, Default)]
pub struct MemorySink {
    pub trajectories: Vec<(usize, Vec<RunRecord>)>,
    pub summaries: Vec<SummaryRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trajectory(&self, run_num: usize) -> Option<&[RunRecord]> {
        self.trajectories
            .iter()
            .find(|(n, _)| *n == run_num)
            .map(|(_, records)| records.as_slice())
    }
}

impl RecordSink for MemorySink {
    fn begin_run(&mut self, run_num: usize) -> SimResult<()> {
        self.trajectories.push((run_num, Vec::new()));
        Ok(())
    }

    fn record_step(&mut self, record: &RunRecord) -> SimResult<()> {
        if let Some((_, records)) = self.trajectories.last_mut() {
            records.push(*record);
        }
        Ok(())
    }

    fn record_summary(&mut self, summary: &SummaryRecord) -> SimResult<()> {
        self.summaries.push(*summary);
        Ok(())
    }
}
