//! CSV persistence of batch results.
//!
//! `<prefix>solution.csv` collects one summary row per run and is appended to
//! across batches; `<prefix>run_<n>.csv` holds the full trajectory of run `n`
//! when full output is enabled.

use super::RecordSink;
use crate::errors::SimResult;
use crate::models::{RunRecord, SummaryRecord};
use csv::{Writer, WriterBuilder};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct SummaryRow {
    #[serde(rename = "runNum")]
    run_num: usize,
    #[serde(rename = "dT")]
    dt: f64,
    #[serde(rename = "totalTime")]
    total_time: f64,
    pos_x: f64,
    pos_y: f64,
    pos_z: f64,
    altitude: f64,
    mass: f64,
    diameter: f64,
    length: Option<f64>,
    #[serde(rename = "frontalArea")]
    frontal_area: f64,
    #[serde(rename = "CdSubsonic")]
    cd_subsonic: f64,
    #[serde(rename = "CdSupersonic")]
    cd_supersonic: f64,
    #[serde(rename = "initVel_x")]
    init_vel_x: f64,
    #[serde(rename = "initVel_y")]
    init_vel_y: f64,
    #[serde(rename = "initVel_z")]
    init_vel_z: f64,
}

impl From<&SummaryRecord> for SummaryRow {
    fn from(s: &SummaryRecord) -> Self {
        SummaryRow {
            run_num: s.run_num,
            dt: s.dt,
            total_time: s.total_time,
            pos_x: s.position.x,
            pos_y: s.position.y,
            pos_z: s.position.z,
            altitude: s.altitude,
            mass: s.mass,
            diameter: s.shape.diameter,
            length: s.shape.length,
            frontal_area: s.shape.frontal_area,
            cd_subsonic: s.cd_subsonic,
            cd_supersonic: s.cd_supersonic,
            init_vel_x: s.initial_velocity.x,
            init_vel_y: s.initial_velocity.y,
            init_vel_z: s.initial_velocity.z,
        }
    }
}

#[derive(Serialize)]
struct TrajectoryRow {
    time: f64,
    pos_x: f64,
    pos_y: f64,
    pos_z: f64,
    vel_x: f64,
    vel_y: f64,
    vel_z: f64,
    alt: f64,
}

impl From<&RunRecord> for TrajectoryRow {
    fn from(r: &RunRecord) -> Self {
        TrajectoryRow {
            time: r.time,
            pos_x: r.position.x,
            pos_y: r.position.y,
            pos_z: r.position.z,
            vel_x: r.velocity.x,
            vel_y: r.velocity.y,
            vel_z: r.velocity.z,
            alt: r.altitude,
        }
    }
}

pub struct CsvSink {
    prefix: String,
    full_output: bool,
    summary: Writer<File>,
    trajectory: Option<Writer<File>>,
}

impl CsvSink {
    /// Opens `<prefix>solution.csv` for appending, writing the header only when
    /// the file is new.
    pub fn create(prefix: &str, full_output: bool) -> SimResult<Self> {
        let path = Self::summary_path_for(prefix);
        let exists = path.exists();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(CsvSink {
            prefix: prefix.to_string(),
            full_output,
            summary: WriterBuilder::new().has_headers(!exists).from_writer(file),
            trajectory: None,
        })
    }

    fn summary_path_for(prefix: &str) -> PathBuf {
        PathBuf::from(format!("{}solution.csv", prefix))
    }

    pub fn summary_path(&self) -> PathBuf {
        Self::summary_path_for(&self.prefix)
    }

    pub fn trajectory_path(&self, run_num: usize) -> PathBuf {
        PathBuf::from(format!("{}run_{}.csv", self.prefix, run_num))
    }

    fn open_trajectory(path: &Path) -> SimResult<Writer<File>> {
        Ok(Writer::from_path(path)?)
    }
}

impl RecordSink for CsvSink {
    fn begin_run(&mut self, run_num: usize) -> SimResult<()> {
        if let Some(mut previous) = self.trajectory.take() {
            previous.flush()?;
        }
        if self.full_output {
            self.trajectory = Some(Self::open_trajectory(&self.trajectory_path(run_num))?);
        }
        Ok(())
    }

    fn record_step(&mut self, record: &RunRecord) -> SimResult<()> {
        if let Some(writer) = self.trajectory.as_mut() {
            writer.serialize(TrajectoryRow::from(record))?;
        }
        Ok(())
    }

    fn record_summary(&mut self, summary: &SummaryRecord) -> SimResult<()> {
        self.summary.serialize(SummaryRow::from(summary))?;
        self.summary.flush()?;
        if let Some(mut writer) = self.trajectory.take() {
            writer.flush()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> SimResult<()> {
        if let Some(mut writer) = self.trajectory.take() {
            writer.flush()?;
        }
        self.summary.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fsm::Termination;
    use crate::models::{ProjectileShape, Shape};
    use nalgebra as na;
    use std::fs;

    fn summary(run_num: usize, shape: Shape) -> SummaryRecord {
        SummaryRecord {
            run_num,
            dt: 0.1,
            total_time: 12.5,
            position: na::Vector3::new(1.0, 2.0, 3.0),
            altitude: -0.5,
            mass: 1068.0,
            shape: shape.describe(),
            cd_subsonic: 0.8,
            cd_supersonic: 1.6,
            initial_velocity: na::Vector3::new(196.9, -193.5, -2149.0),
            termination: Termination::Grounded,
            steps: 125,
        }
    }

    #[test]
    fn test_summary_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = format!("{}/", dir.path().display());

        for run_num in 0..2 {
            let mut sink = CsvSink::create(&prefix, false).unwrap();
            sink.begin_run(run_num).unwrap();
            sink.record_summary(&summary(run_num, Shape::Cylinder { diameter: 1.2, length: 12.6 }))
                .unwrap();
            sink.finish().unwrap();
        }

        let text = fs::read_to_string(dir.path().join("solution.csv")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "runNum,dT,totalTime,pos_x,pos_y,pos_z,altitude,mass,diameter,length,frontalArea,\
             CdSubsonic,CdSupersonic,initVel_x,initVel_y,initVel_z"
        );
        assert!(lines[1].starts_with("0,0.1,12.5,1.0,2.0,3.0,-0.5,1068.0,1.2,12.6,"));
        assert!(lines[2].starts_with("1,"));
        assert!(!dir.path().join("run_0.csv").exists());
    }

    #[test]
    fn test_sphere_leaves_length_empty() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = format!("{}/ball_", dir.path().display());

        let mut sink = CsvSink::create(&prefix, false).unwrap();
        sink.record_summary(&summary(0, Shape::Sphere { diameter: 2.0 })).unwrap();
        sink.finish().unwrap();

        let text = fs::read_to_string(dir.path().join("ball_solution.csv")).unwrap();
        let row = text.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split(',').collect();
        assert_eq!(fields.len(), 16);
        assert_eq!(fields[8], "2.0");
        assert_eq!(fields[9], "");
    }

    #[test]
    fn test_trajectory_file_per_run() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = format!("{}/", dir.path().display());
        let mut sink = CsvSink::create(&prefix, true).unwrap();

        let record = RunRecord {
            time: 0.0,
            position: na::Vector3::new(6378137.0, 0.0, 0.0),
            velocity: na::Vector3::new(-1.0, 0.0, 0.0),
            altitude: 0.0,
        };
        sink.begin_run(4).unwrap();
        sink.record_step(&record).unwrap();
        sink.record_step(&RunRecord { time: 0.1, ..record }).unwrap();
        sink.record_summary(&summary(4, Shape::Sphere { diameter: 1.0 })).unwrap();
        sink.finish().unwrap();

        let text = fs::read_to_string(sink.trajectory_path(4)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "time,pos_x,pos_y,pos_z,vel_x,vel_y,vel_z,alt");
        assert_eq!(lines[1], "0.0,6378137.0,0.0,0.0,-1.0,0.0,0.0,0.0");
        assert_eq!(lines.len(), 3);
    }
}
