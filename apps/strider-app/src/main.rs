//! Strider runner CLI.
//!
//! Loads an exported ONNX policy and drives the humanoid model in real time
//! under a task-preset gait, with live velocity commands from the keyboard
//! (numpad 8/2 forward, 4/6 lateral, 7/9 yaw; each line of input is read
//! once entered).

mod keyboard;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use thiserror::Error;
use tracing::info;

use strider_control::command::{CommandBindings, CommandState};
use strider_control::joints::RobotSpec;
use strider_control::runner::ControlLoop;
use strider_core::config::{GaitParams, RunConfig};
use strider_core::error::{ConfigError, StriderError};
use strider_policy::onnx::{OnnxPolicy, OnnxPolicyError};
use strider_sim::console::ConsoleViewer;
use strider_sim::servo::ServoSim;

use keyboard::KeyListener;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Real-time legged-robot policy runner.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Task preset selecting the gait parameter set.
    #[arg(long, default_value = "walk", value_parser = ["walk", "run"])]
    task: String,

    /// Path to the exported ONNX policy. Defaults to exported/<task>.onnx.
    #[arg(long)]
    policy: Option<PathBuf>,

    /// Path to the robot model definition.
    #[arg(long, default_value = "assets/humanoid.xml")]
    model: PathBuf,

    /// Simulation duration in seconds.
    #[arg(long, default_value_t = 100.0)]
    duration: f64,

    /// Optional TOML file overriding simulation parameters. The gait
    /// section always comes from the task preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log a state line every N macro-steps.
    #[arg(long, default_value_t = 50)]
    report_stride: u64,
}

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Strider(#[from] StriderError),

    #[error("policy error: {0}")]
    Policy(#[from] OnnxPolicyError),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Strider(err.into())
    }
}

// ---------------------------------------------------------------------------
// Run
// ---------------------------------------------------------------------------

fn build_config(cli: &Cli) -> Result<RunConfig, AppError> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };
    config.gait = match cli.task.as_str() {
        "run" => GaitParams::run(),
        _ => GaitParams::walk(),
    };
    config.sim.duration = cli.duration;
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let policy_path = cli
        .policy
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("exported/{}.onnx", cli.task)));

    if !policy_path.is_file() {
        return Err(ConfigError::MissingFile {
            kind: "policy",
            path: policy_path,
        }
        .into());
    }
    if !cli.model.is_file() {
        return Err(ConfigError::MissingFile {
            kind: "model",
            path: cli.model.clone(),
        }
        .into());
    }

    let config = build_config(cli)?;
    let spec = RobotSpec::humanoid();

    info!(task = %cli.task, "loaded task preset");
    info!(policy = %policy_path.display(), "loading policy");
    info!(model = %cli.model.display(), robot = spec.name, "loading model");

    let policy = OnnxPolicy::from_file(&policy_path)?;
    let sim = ServoSim::new(spec.default_pose.clone(), config.sim.physics_dt);

    let command = Arc::new(CommandState::new());
    let listener = KeyListener::spawn(Arc::clone(&command), CommandBindings::numpad());
    info!("keyboard commands: 8/2 forward, 4/6 lateral, 7/9 yaw (then Enter)");

    let mut control = ControlLoop::new(
        &spec,
        &config,
        Box::new(sim),
        Box::new(policy),
        Arc::clone(&command),
    )?
    .with_viewer(Box::new(ConsoleViewer::new(cli.report_stride)));

    let result = control.run();
    listener.stop();
    result?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
