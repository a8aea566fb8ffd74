//! End-to-end control loop scenarios against recording collaborators.

use std::sync::{Arc, Mutex};

use strider_control::command::CommandState;
use strider_control::joints::RobotSpec;
use strider_control::runner::ControlLoop;
use strider_core::config::{RunConfig, SimParams};
use strider_core::error::SimError;
use strider_core::traits::{Policy, Simulator, Viewer};
use strider_core::types::{Action, Observation, SensorFrame};

// ---------------------------------------------------------------------------
// Recording collaborators
// ---------------------------------------------------------------------------

#[derive(Default)]
struct SimLog {
    steps: u64,
    targets: Vec<Vec<f32>>,
}

struct RecordingSim {
    joint_count: usize,
    dt: f64,
    log: Arc<Mutex<SimLog>>,
}

impl RecordingSim {
    fn new(joint_count: usize, dt: f64) -> (Self, Arc<Mutex<SimLog>>) {
        let log = Arc::new(Mutex::new(SimLog::default()));
        (
            Self {
                joint_count,
                dt,
                log: Arc::clone(&log),
            },
            log,
        )
    }
}

impl Simulator for RecordingSim {
    #[allow(clippy::cast_precision_loss)]
    fn time(&self) -> f64 {
        self.log.lock().unwrap().steps as f64 * self.dt
    }
    fn sense(&mut self) -> SensorFrame {
        SensorFrame::zeroed(self.joint_count)
    }
    fn command_targets(&mut self, targets: &[f32]) {
        self.log.lock().unwrap().targets.push(targets.to_vec());
    }
    fn step(&mut self) -> Result<(), SimError> {
        self.log.lock().unwrap().steps += 1;
        Ok(())
    }
    fn name(&self) -> &str {
        "recording"
    }
}

struct ZeroPolicy {
    dim: usize,
}

impl Policy for ZeroPolicy {
    fn get_action(&self, _obs: &Observation) -> Action {
        Action::zeros(self.dim)
    }
    fn name(&self) -> &str {
        "ZeroPolicy"
    }
}

struct ObservingPolicy {
    dim: usize,
    seen: Arc<Mutex<Vec<Vec<f32>>>>,
}

impl Policy for ObservingPolicy {
    fn get_action(&self, obs: &Observation) -> Action {
        self.seen.lock().unwrap().push(obs.as_slice().to_vec());
        Action::zeros(self.dim)
    }
    fn name(&self) -> &str {
        "ObservingPolicy"
    }
}

struct RecordingViewer {
    renders: Arc<Mutex<u64>>,
    closed: Arc<Mutex<bool>>,
}

impl Viewer for RecordingViewer {
    fn render(&mut self, _frame: &SensorFrame, _sim_time: f64) {
        *self.renders.lock().unwrap() += 1;
    }
    fn close(&mut self) {
        *self.closed.lock().unwrap() = true;
    }
}

fn config_for_steps(macro_steps: u32) -> RunConfig {
    RunConfig {
        sim: SimParams {
            duration: f64::from(macro_steps) * 0.02,
            ..SimParams::default()
        },
        ..RunConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn zero_action_commands_exactly_the_default_pose() {
    let spec = RobotSpec::humanoid();
    let (sim, log) = RecordingSim::new(20, 0.005);
    let mut control = ControlLoop::new(
        &spec,
        &config_for_steps(1),
        Box::new(sim),
        Box::new(ZeroPolicy { dim: 20 }),
        Arc::new(CommandState::new()),
    )
    .unwrap();
    control.run().unwrap();

    let log = log.lock().unwrap();
    assert!(!log.targets.is_empty());
    for targets in &log.targets {
        assert_eq!(targets, &spec.default_pose);
    }
}

#[test]
fn decimation_contract_holds() {
    // Four physics substeps per inference, same targets across all four.
    let spec = RobotSpec::humanoid();
    let (sim, log) = RecordingSim::new(20, 0.005);
    let mut control = ControlLoop::new(
        &spec,
        &config_for_steps(3),
        Box::new(sim),
        Box::new(ZeroPolicy { dim: 20 }),
        Arc::new(CommandState::new()),
    )
    .unwrap();
    control.run().unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log.steps, 3 * 4);
    assert_eq!(log.targets.len(), 3 * 4);
    for window in log.targets.chunks(4) {
        assert!(window.iter().all(|t| t == &window[0]));
    }
    assert_eq!(control.steps(), 3);
}

#[test]
fn viewer_renders_once_per_macro_step_and_closes() {
    let spec = RobotSpec::humanoid();
    let (sim, _log) = RecordingSim::new(20, 0.005);
    let renders = Arc::new(Mutex::new(0));
    let closed = Arc::new(Mutex::new(false));
    let viewer = RecordingViewer {
        renders: Arc::clone(&renders),
        closed: Arc::clone(&closed),
    };
    let mut control = ControlLoop::new(
        &spec,
        &config_for_steps(5),
        Box::new(sim),
        Box::new(ZeroPolicy { dim: 20 }),
        Arc::new(CommandState::new()),
    )
    .unwrap()
    .with_viewer(Box::new(viewer));
    control.run().unwrap();

    assert_eq!(*renders.lock().unwrap(), 5);
    assert!(*closed.lock().unwrap());
}

#[test]
fn command_state_flows_into_the_observation() {
    let spec = RobotSpec::humanoid();
    let (sim, _log) = RecordingSim::new(20, 0.005);
    let command = Arc::new(CommandState::new());
    // Five forward presses saturate the command at 1.0 before the run.
    let bindings = strider_control::command::CommandBindings::numpad();
    for _ in 0..6 {
        bindings.apply(&command, '8');
    }
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut control = ControlLoop::new(
        &spec,
        &config_for_steps(1),
        Box::new(sim),
        Box::new(ObservingPolicy {
            dim: 20,
            seen: Arc::clone(&seen),
        }),
        Arc::clone(&command),
    )
    .unwrap();
    control.run().unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    // Newest frame sits at the tail of the flattened history; the command
    // occupies features 9..12 of that frame.
    let tail = &seen[0][780 - 78..];
    assert!((tail[9] - 1.0).abs() < 1e-6);
    assert!(tail[10].abs() < 1e-6);
    assert!(tail[11].abs() < 1e-6);
}

#[test]
fn gait_phase_after_one_macro_step() {
    let spec = RobotSpec::humanoid();
    let (sim, _log) = RecordingSim::new(20, 0.005);
    let mut control = ControlLoop::new(
        &spec,
        &config_for_steps(1),
        Box::new(sim),
        Box::new(ZeroPolicy { dim: 20 }),
        Arc::new(CommandState::new()),
    )
    .unwrap();
    control.run().unwrap();

    let [left, right] = control.gait().phase();
    assert!((left - (0.02 / 0.85 + 0.38) % 1.0).abs() < 1e-12);
    assert!((right - (0.02 / 0.85 + 0.88) % 1.0).abs() < 1e-12);
}

#[test]
fn failing_physics_step_aborts_the_run() {
    struct FailingSim;
    impl Simulator for FailingSim {
        fn time(&self) -> f64 {
            0.0
        }
        fn sense(&mut self) -> SensorFrame {
            SensorFrame::zeroed(20)
        }
        fn command_targets(&mut self, _targets: &[f32]) {}
        fn step(&mut self) -> Result<(), SimError> {
            Err(SimError::PhysicsDiverged)
        }
        fn name(&self) -> &str {
            "failing"
        }
    }

    let spec = RobotSpec::humanoid();
    let mut control = ControlLoop::new(
        &spec,
        &config_for_steps(1),
        Box::new(FailingSim),
        Box::new(ZeroPolicy { dim: 20 }),
        Arc::new(CommandState::new()),
    )
    .unwrap();
    let err = control.run().unwrap_err();
    assert!(matches!(
        err,
        strider_core::error::StriderError::Simulation(SimError::PhysicsDiverged)
    ));
    // The failure surfaced before a single macro-step completed.
    assert_eq!(control.steps(), 0);
}
