use clap::{Parser, ValueEnum};
use nalgebra as na;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::process::ExitCode;
use trajsim::config::{BatchConfig, DispersionSpec, FailurePolicy, RunParameters, Spread};
use trajsim::coordinates::GeodeticPosition;
use trajsim::errors::SimError;
use trajsim::fsm::Termination;
use trajsim::output::CsvSink;
use trajsim::physics::atmosphere::AtmosphereTable;
use trajsim::simulation::run_batch;

#[derive(Parser)]
#[command(
    name = "TrajectorySim",
    version,
    about = "Monte Carlo ballistic trajectory simulation from release to ground impact"
)]
struct Cli {
    /// Release latitude (deg)
    #[arg(long, default_value_t = RunParameters::LATITUDE, allow_negative_numbers = true)]
    lat: f64,
    /// Release longitude (deg)
    #[arg(long, default_value_t = RunParameters::LONGITUDE, allow_negative_numbers = true)]
    lon: f64,
    /// Release altitude (m)
    #[arg(long, default_value_t = RunParameters::ALTITUDE, allow_negative_numbers = true)]
    alt: f64,
    /// Release velocity, ECEF x (m/s)
    #[arg(long = "vx", default_value_t = RunParameters::VELOCITY[0], allow_negative_numbers = true)]
    vx: f64,
    /// Release velocity, ECEF y (m/s)
    #[arg(long = "vy", default_value_t = RunParameters::VELOCITY[1], allow_negative_numbers = true)]
    vy: f64,
    /// Release velocity, ECEF z (m/s)
    #[arg(long = "vz", default_value_t = RunParameters::VELOCITY[2], allow_negative_numbers = true)]
    vz: f64,
    /// Mass (kg)
    #[arg(long, default_value_t = RunParameters::MASS)]
    mass: f64,
    /// Cylinder length (m)
    #[arg(long, default_value_t = RunParameters::LENGTH)]
    length: f64,
    /// Diameter (m)
    #[arg(long, default_value_t = RunParameters::DIAMETER)]
    diameter: f64,
    /// Release impulse along a random direction (m/s)
    #[arg(long, default_value_t = RunParameters::IMPULSE, allow_negative_numbers = true)]
    impulse: f64,
    /// Subsonic drag coefficient
    #[arg(long, default_value_t = RunParameters::CD_SUBSONIC)]
    cd_subsonic: f64,
    /// Supersonic drag coefficient
    #[arg(long, default_value_t = RunParameters::CD_SUPERSONIC)]
    cd_supersonic: f64,
    /// Projectile shape: cylinder or sphere
    #[arg(long, default_value = RunParameters::SHAPE)]
    shape: String,

    #[arg(long, default_value_t = 0.0)]
    lat_stddev: f64,
    #[arg(long, default_value_t = 0.0)]
    lon_stddev: f64,
    #[arg(long, default_value_t = 0.0)]
    alt_stddev: f64,
    #[arg(long = "vx-stddev", default_value_t = 0.0)]
    vx_stddev: f64,
    #[arg(long = "vy-stddev", default_value_t = 0.0)]
    vy_stddev: f64,
    #[arg(long = "vz-stddev", default_value_t = 0.0)]
    vz_stddev: f64,
    #[arg(long, default_value_t = 0.0)]
    mass_stddev: f64,
    #[arg(long, default_value_t = 0.0)]
    length_stddev: f64,
    #[arg(long, default_value_t = 0.0)]
    diameter_stddev: f64,
    #[arg(long, default_value_t = 0.0)]
    impulse_stddev: f64,
    #[arg(long, default_value_t = 0.0)]
    cd_subsonic_stddev: f64,
    #[arg(long, default_value_t = 0.0)]
    cd_supersonic_stddev: f64,

    /// Disperse the release position
    #[arg(long)]
    rand_pos: bool,
    /// Disperse the release velocity
    #[arg(long)]
    rand_vel: bool,
    #[arg(long)]
    rand_mass: bool,
    #[arg(long)]
    rand_length: bool,
    #[arg(long)]
    rand_diameter: bool,
    #[arg(long)]
    rand_impulse: bool,
    #[arg(long)]
    rand_cd_subsonic: bool,
    #[arg(long)]
    rand_cd_supersonic: bool,

    /// Seed for reproducible batches (drawn from entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Integration time step (s)
    #[arg(long = "dt", default_value_t = trajsim::constants::DEFAULT_DT)]
    dt: f64,
    /// Number of runs in the batch
    #[arg(long, default_value_t = BatchConfig::RUN_COUNT)]
    simcount: usize,
    /// Prefix for output files
    #[arg(long, default_value = "")]
    file_prefix: String,
    /// Write a full trajectory file per run
    #[arg(long)]
    full_output: bool,
    /// Atmosphere table
    #[arg(long, default_value = BatchConfig::ATMOSPHERE_FILE)]
    atmosphere: PathBuf,
    /// Step cap per run
    #[arg(long, default_value_t = trajsim::constants::MAX_STEPS)]
    max_steps: usize,
    /// What to do when a run fails
    #[arg(long, value_enum, default_value_t = OnFailure::Abort)]
    on_failure: OnFailure,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum OnFailure {
    Abort,
    Skip,
}

impl Cli {
    fn into_config(self) -> BatchConfig {
        let parameters = RunParameters {
            position: GeodeticPosition::new(self.lat, self.lon, self.alt),
            velocity: na::Vector3::new(self.vx, self.vy, self.vz),
            mass: self.mass,
            length: self.length,
            diameter: self.diameter,
            impulse: self.impulse,
            cd_subsonic: self.cd_subsonic,
            cd_supersonic: self.cd_supersonic,
            shape: self.shape,
        };
        let dispersion = DispersionSpec {
            position: Spread::new(
                GeodeticPosition::new(self.lat_stddev, self.lon_stddev, self.alt_stddev),
                self.rand_pos,
            ),
            velocity: Spread::new(na::Vector3::new(self.vx_stddev, self.vy_stddev, self.vz_stddev), self.rand_vel),
            mass: Spread::new(self.mass_stddev, self.rand_mass),
            length: Spread::new(self.length_stddev, self.rand_length),
            diameter: Spread::new(self.diameter_stddev, self.rand_diameter),
            impulse: Spread::new(self.impulse_stddev, self.rand_impulse),
            cd_subsonic: Spread::new(self.cd_subsonic_stddev, self.rand_cd_subsonic),
            cd_supersonic: Spread::new(self.cd_supersonic_stddev, self.rand_cd_supersonic),
        };

        BatchConfig {
            parameters,
            dispersion,
            run_count: self.simcount,
            dt: self.dt,
            seed: self.seed,
            file_prefix: self.file_prefix,
            full_output: self.full_output,
            atmosphere_path: self.atmosphere,
            max_steps: self.max_steps,
            failure_policy: match self.on_failure {
                OnFailure::Abort => FailurePolicy::Abort,
                OnFailure::Skip => FailurePolicy::SkipRun,
            },
        }
    }
}

fn exit_code(error: &SimError) -> ExitCode {
    match error {
        SimError::InvalidShape(_) => ExitCode::from(1),
        _ => ExitCode::from(255),
    }
}

fn run(config: &BatchConfig) -> Result<(), SimError> {
    // Reject a bad shape before touching any file
    config.parameters.shape.parse::<trajsim::models::ShapeKind>()?;

    let atmosphere = AtmosphereTable::load(&config.atmosphere_path)?;

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    println!("Using seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut sink = CsvSink::create(&config.file_prefix, config.full_output)?;
    let report = run_batch(config, &atmosphere, &mut rng, &mut sink)?;

    println!(
        "{} runs completed ({} grounded, {} hit the step limit), {} failed",
        report.completed(),
        report.count(Termination::Grounded),
        report.count(Termination::StepLimitReached),
        report.failed.len()
    );
    println!("Summary written to {}", sink.summary_path().display());
    Ok(())
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => {
            // --help / --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            eprintln!("Invalid arguments provided");
            return ExitCode::from(1);
        }
    };

    let config = cli.into_config();
    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code(&e)
        }
    }
}
