//! Joint-servo simulator.
//!
//! Each joint is a first-order position servo: per step the position moves
//! a fixed fraction of the remaining error toward its target, and velocity
//! is the backward difference. The floating base does not move (zero
//! velocities, identity orientation). This is enough to exercise the whole
//! control pipeline in real time without a rigid-body engine.

use strider_core::error::SimError;
use strider_core::time::SimTime;
use strider_core::traits::Simulator;
use strider_core::types::SensorFrame;

/// Default servo time constant in seconds.
const DEFAULT_RESPONSE: f32 = 0.05;

/// First-order joint servo simulator.
///
/// Positions start at the initial pose with targets set to match, so the
/// robot holds still until the first command arrives.
#[derive(Debug, Clone)]
pub struct ServoSim {
    positions: Vec<f32>,
    velocities: Vec<f32>,
    targets: Vec<f32>,
    dt: f64,
    response: f32,
    time: SimTime,
}

impl ServoSim {
    /// Create a servo simulator holding `initial_pose` with timestep `dt`.
    #[must_use]
    pub fn new(initial_pose: Vec<f32>, dt: f64) -> Self {
        let velocities = vec![0.0; initial_pose.len()];
        let targets = initial_pose.clone();
        Self {
            positions: initial_pose,
            velocities,
            targets,
            dt,
            response: DEFAULT_RESPONSE,
            time: SimTime::new(),
        }
    }

    /// Set the servo time constant (seconds). Smaller is stiffer.
    #[must_use]
    pub const fn with_response(mut self, response: f32) -> Self {
        self.response = response;
        self
    }

    /// Current joint positions.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Fraction of the remaining error closed per step, capped at 1.
    #[allow(clippy::cast_possible_truncation)]
    fn alpha(&self) -> f32 {
        (self.dt as f32 / self.response).min(1.0)
    }
}

impl Simulator for ServoSim {
    fn time(&self) -> f64 {
        self.time.secs_f64()
    }

    fn sense(&mut self) -> SensorFrame {
        let mut frame = SensorFrame::zeroed(self.positions.len());
        frame.joint_positions.copy_from_slice(&self.positions);
        frame.joint_velocities.copy_from_slice(&self.velocities);
        frame
    }

    fn command_targets(&mut self, targets: &[f32]) {
        assert_eq!(
            targets.len(),
            self.targets.len(),
            "expected {} targets, got {}",
            self.targets.len(),
            targets.len()
        );
        self.targets.copy_from_slice(targets);
    }

    fn step(&mut self) -> Result<(), SimError> {
        let alpha = self.alpha();
        #[allow(clippy::cast_possible_truncation)]
        let dt = self.dt as f32;
        for i in 0..self.positions.len() {
            let next = self.positions[i] + (self.targets[i] - self.positions[i]) * alpha;
            if next.is_nan() {
                return Err(SimError::PhysicsDiverged);
            }
            self.velocities[i] = (next - self.positions[i]) / dt;
            self.positions[i] = next;
        }
        self.time.advance_secs(self.dt);
        Ok(())
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "servo"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
