//! Macro-step control loop driver.
//!
//! One iteration interleaves policy inference with `decimation` physics
//! substeps: pace to real time, sense, assemble the observation history,
//! infer, command the same targets across every substep, render, advance
//! the gait oscillator. Any failure inside physics stepping ends the run;
//! there is no retry or partial recovery.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use strider_core::config::RunConfig;
use strider_core::error::{StriderError, ValidationError};
use strider_core::time::RatePacer;
use strider_core::traits::{Policy, Simulator, Viewer};
use strider_core::types::Action;

use crate::action::ActionMapper;
use crate::command::CommandState;
use crate::gait::GaitOscillator;
use crate::joints::RobotSpec;
use crate::observe::ObservationAssembler;

// ---------------------------------------------------------------------------
// ControlLoop
// ---------------------------------------------------------------------------

/// Drives the observe → infer → act cycle against boxed collaborators.
///
/// Owns every piece of loop state except the operator command, which is
/// shared with the input listener thread through [`CommandState`].
pub struct ControlLoop {
    sim: Box<dyn Simulator>,
    policy: Box<dyn Policy>,
    viewer: Option<Box<dyn Viewer>>,
    command: Arc<CommandState>,
    assembler: ObservationAssembler,
    mapper: ActionMapper,
    gait: GaitOscillator,
    joint_count: usize,
    decimation: u32,
    duration: f64,
    clip_actions: f32,
    action: Action,
    steps: u64,
}

impl ControlLoop {
    /// Assemble a control loop for `spec` under `config`.
    ///
    /// Validates the configuration and the robot's joint tables up front;
    /// nothing here can fail once [`run`](Self::run) has started except the
    /// collaborators themselves.
    pub fn new(
        spec: &RobotSpec,
        config: &RunConfig,
        sim: Box<dyn Simulator>,
        policy: Box<dyn Policy>,
        command: Arc<CommandState>,
    ) -> Result<Self, StriderError> {
        config.validate()?;
        let assembler = ObservationAssembler::new(spec, &config.sim)?;
        let mapper = ActionMapper::new(spec, config.sim.action_scale)?;
        let gait = GaitOscillator::new(&config.gait, config.sim.control_dt());
        Ok(Self {
            sim,
            policy,
            viewer: None,
            command,
            assembler,
            mapper,
            gait,
            joint_count: spec.joint_count(),
            decimation: config.sim.decimation,
            duration: config.sim.duration,
            clip_actions: config.sim.clip_actions,
            action: Action::zeros(spec.joint_count()),
            steps: 0,
        })
    }

    /// Attach a viewer, rendered once per macro-step.
    #[must_use]
    pub fn with_viewer(mut self, viewer: Box<dyn Viewer>) -> Self {
        self.viewer = Some(viewer);
        self
    }

    /// Run until simulated time reaches the configured duration.
    ///
    /// Never runs faster than real time; may fall behind under load, with
    /// no catch-up skipping. On exit the viewer is closed. The caller is
    /// responsible for stopping the input listener afterwards.
    pub fn run(&mut self) -> Result<(), StriderError> {
        let pacer = RatePacer::start();
        let sim_start = self.sim.time();
        info!(
            sim = self.sim.name(),
            policy = self.policy.name(),
            duration = self.duration,
            decimation = self.decimation,
            "starting control loop"
        );

        while self.sim.time() - sim_start < self.duration {
            let sim_elapsed = Duration::from_secs_f64(self.sim.time() - sim_start);
            pacer.pace(sim_elapsed);

            let frame = self.sim.sense();
            let obs =
                self.assembler
                    .assemble(&frame, self.command.get(), &self.gait, &self.action);

            let raw = self.policy.get_action(&obs);
            if raw.len() < self.joint_count {
                return Err(ValidationError::ActionDimMismatch {
                    expected: self.joint_count,
                    got: raw.len(),
                }
                .into());
            }
            let mut data = raw.into_vec();
            data.truncate(self.joint_count);
            self.action = Action::new(data);
            self.action.validate()?;
            self.action.clip(self.clip_actions);

            let targets = self.mapper.targets(&self.action);
            for _ in 0..self.decimation {
                self.sim.command_targets(&targets);
                self.sim.step()?;
            }

            if let Some(viewer) = &mut self.viewer {
                let state = self.sim.sense();
                viewer.render(&state, self.sim.time());
            }

            self.steps += 1;
            self.gait.advance();
            debug!(step = self.steps, sim_time = self.sim.time(), "macro-step");
        }

        if let Some(viewer) = &mut self.viewer {
            viewer.close();
        }
        info!(steps = self.steps, "control loop finished");
        Ok(())
    }

    /// Macro-steps completed so far.
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// The most recent clamped action.
    pub const fn action(&self) -> &Action {
        &self.action
    }

    /// The gait oscillator (read-only).
    pub const fn gait(&self) -> &GaitOscillator {
        &self.gait
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
