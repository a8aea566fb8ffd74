//! Per-step observation assembly.
//!
//! Builds one macro-step's feature vector from the sensor frame, the
//! operator command, the gait oscillator, and the previous action, then
//! pushes it into the rolling history. The sub-range layout is a fixed
//! contract with the trained policy and must match the training
//! configuration exactly.

use strider_core::config::SimParams;
use strider_core::error::ValidationError;
use strider_core::math::projected_gravity;
use strider_core::types::{Action, Observation, SensorFrame};

use crate::gait::GaitOscillator;
use crate::history::ObsHistory;
use crate::joints::{JointIndexMap, RobotSpec};

/// Feature offsets of the fixed head of every frame; the joint-dependent
/// ranges follow from the joint count.
const LIN_VEL: usize = 0;
const ANG_VEL: usize = 3;
const GRAVITY: usize = 6;
const COMMAND: usize = 9;
const JOINT_FEATURES: usize = 12;
/// sin(2) + cos(2) + air ratio(2) at the tail.
const GAIT_FEATURES: usize = 6;

/// Features per frame for a robot with `joint_count` joints:
/// 12 base/command features, three joint blocks, six gait features.
#[must_use]
pub const fn frame_len(joint_count: usize) -> usize {
    JOINT_FEATURES + 3 * joint_count + GAIT_FEATURES
}

// ---------------------------------------------------------------------------
// ObservationAssembler
// ---------------------------------------------------------------------------

/// Builds per-step observation frames and maintains the rolling history.
///
/// `assemble` is the only mutating operation and only mutates the history
/// ring; everything else is read-only state fixed at construction.
#[derive(Debug, Clone)]
pub struct ObservationAssembler {
    joint_map: JointIndexMap,
    default_pose: Vec<f32>,
    history: ObsHistory,
    obs_per_step: usize,
    clip_observations: f32,
    clip_actions: f32,
}

impl ObservationAssembler {
    /// Build an assembler for the given robot and parameters.
    ///
    /// Fails if the joint table is malformed or `obs_per_step` disagrees
    /// with the layout implied by the joint count.
    pub fn new(spec: &RobotSpec, params: &SimParams) -> Result<Self, ValidationError> {
        let joint_map = spec.index_map()?;
        let expected = frame_len(spec.joint_count());
        if params.obs_per_step != expected {
            return Err(ValidationError::ObservationDimMismatch {
                expected,
                got: params.obs_per_step,
            });
        }
        Ok(Self {
            joint_map,
            default_pose: spec.default_pose.clone(),
            history: ObsHistory::new(params.history_len, params.obs_per_step),
            obs_per_step: params.obs_per_step,
            clip_observations: params.clip_observations,
            clip_actions: params.clip_actions,
        })
    }

    /// Assemble the current frame, push it into the history, and return the
    /// clamped flattened history for inference.
    pub fn assemble(
        &mut self,
        frame: &SensorFrame,
        command: [f32; 3],
        gait: &GaitOscillator,
        previous_action: &Action,
    ) -> Observation {
        let n = self.joint_map.joint_count();
        let mut obs = vec![0.0f32; self.obs_per_step];

        obs[LIN_VEL..LIN_VEL + 3].copy_from_slice(&frame.linear_velocity);
        obs[ANG_VEL..ANG_VEL + 3].copy_from_slice(&frame.angular_velocity);

        let gravity = projected_gravity(frame.orientation);
        obs[GRAVITY..GRAVITY + 3].copy_from_slice(gravity.as_slice());

        obs[COMMAND..COMMAND + 3].copy_from_slice(&command);

        // Joint positions as deltas from the default pose, policy order.
        let deltas: Vec<f32> = frame
            .joint_positions
            .iter()
            .zip(&self.default_pose)
            .map(|(pos, default)| pos - default)
            .collect();
        let pos_start = JOINT_FEATURES;
        obs[pos_start..pos_start + n].copy_from_slice(&self.joint_map.to_policy_order(&deltas));

        let vel_start = pos_start + n;
        obs[vel_start..vel_start + n]
            .copy_from_slice(&self.joint_map.to_policy_order(&frame.joint_velocities));

        let action_start = vel_start + n;
        for (slot, raw) in obs[action_start..action_start + n]
            .iter_mut()
            .zip(previous_action.as_slice())
        {
            *slot = raw.clamp(-self.clip_actions, self.clip_actions);
        }

        let gait_start = action_start + n;
        obs[gait_start..gait_start + 2].copy_from_slice(&gait.phase_sin());
        obs[gait_start + 2..gait_start + 4].copy_from_slice(&gait.phase_cos());
        obs[gait_start + 4..gait_start + 6].copy_from_slice(&gait.air_ratio());

        self.history.push(&obs);
        self.history.flattened_clamped(self.clip_observations)
    }

    /// The rolling history (read-only).
    pub const fn history(&self) -> &ObsHistory {
        &self.history
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
