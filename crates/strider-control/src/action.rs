//! Action-to-target mapping.
//!
//! The policy emits one value per joint in policy-native order. Actuator
//! targets are that vector scaled, reordered into engine-native order, and
//! offset by the default pose. The same target vector is commanded on every
//! physics substep of a macro-step.

use strider_core::error::ValidationError;
use strider_core::types::Action;

use crate::joints::{JointIndexMap, RobotSpec};

/// Pure transform from a clamped action to engine-native position targets:
/// `targets = (action · scale)[policy→engine] + default_pose`.
#[derive(Debug, Clone)]
pub struct ActionMapper {
    joint_map: JointIndexMap,
    default_pose: Vec<f32>,
    scale: f32,
}

impl ActionMapper {
    /// Build a mapper for the given robot and action scale.
    pub fn new(spec: &RobotSpec, scale: f32) -> Result<Self, ValidationError> {
        Ok(Self {
            joint_map: spec.index_map()?,
            default_pose: spec.default_pose.clone(),
            scale,
        })
    }

    /// Compute engine-native position targets for `action`.
    ///
    /// Panics if the action length differs from the joint count.
    #[must_use]
    pub fn targets(&self, action: &Action) -> Vec<f32> {
        let scaled: Vec<f32> = action.as_slice().iter().map(|a| a * self.scale).collect();
        let mut targets = self.joint_map.to_engine_order(&scaled);
        for (target, default) in targets.iter_mut().zip(&self.default_pose) {
            *target += default;
        }
        targets
    }

    /// The action scale factor.
    pub const fn scale(&self) -> f32 {
        self.scale
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
