//! Joint-order remapping between the physics engine and the policy.
//!
//! The engine enumerates joints limb by limb; the trained policy interleaves
//! left/right pairs. Both are fixed orderings of the same joint set, so the
//! conversion is a pair of mutually-inverse gather tables derived once from
//! the robot definition.

use strider_core::error::ValidationError;

// ---------------------------------------------------------------------------
// JointIndexMap
// ---------------------------------------------------------------------------

/// Bidirectional permutation between engine-native and policy-native joint
/// order.
///
/// Gather semantics: `out[i] = in[table[i]]`. The inverse table is derived
/// at construction, so `policy_to_engine[engine_to_policy[i]] == i` holds by
/// construction for every index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JointIndexMap {
    engine_to_policy: Vec<usize>,
    policy_to_engine: Vec<usize>,
}

impl JointIndexMap {
    /// Build a map from the engine→policy gather table.
    ///
    /// Rejects tables that are not a permutation of `0..joint_count`.
    pub fn new(
        engine_to_policy: Vec<usize>,
        joint_count: usize,
    ) -> Result<Self, ValidationError> {
        if engine_to_policy.len() != joint_count {
            return Err(ValidationError::JointMapLength {
                expected: joint_count,
                got: engine_to_policy.len(),
            });
        }

        let mut policy_to_engine = vec![usize::MAX; joint_count];
        for (policy_idx, &engine_idx) in engine_to_policy.iter().enumerate() {
            if engine_idx >= joint_count {
                return Err(ValidationError::JointMapIndexOutOfRange {
                    index: engine_idx,
                    joints: joint_count,
                });
            }
            if policy_to_engine[engine_idx] != usize::MAX {
                return Err(ValidationError::JointMapDuplicateIndex { index: engine_idx });
            }
            policy_to_engine[engine_idx] = policy_idx;
        }

        Ok(Self {
            engine_to_policy,
            policy_to_engine,
        })
    }

    /// Number of joints covered by the map.
    pub const fn joint_count(&self) -> usize {
        self.engine_to_policy.len()
    }

    /// Reorder an engine-native vector into policy-native order.
    ///
    /// Panics if `values.len()` differs from the joint count.
    #[must_use]
    pub fn to_policy_order(&self, values: &[f32]) -> Vec<f32> {
        gather(&self.engine_to_policy, values)
    }

    /// Reorder a policy-native vector into engine-native order.
    ///
    /// Panics if `values.len()` differs from the joint count.
    #[must_use]
    pub fn to_engine_order(&self, values: &[f32]) -> Vec<f32> {
        gather(&self.policy_to_engine, values)
    }

    /// The engine→policy gather table.
    pub fn engine_to_policy(&self) -> &[usize] {
        &self.engine_to_policy
    }

    /// The policy→engine gather table.
    pub fn policy_to_engine(&self) -> &[usize] {
        &self.policy_to_engine
    }
}

fn gather(table: &[usize], values: &[f32]) -> Vec<f32> {
    assert_eq!(
        values.len(),
        table.len(),
        "joint vector length {} does not match joint count {}",
        values.len(),
        table.len()
    );
    table.iter().map(|&src| values[src]).collect()
}

// ---------------------------------------------------------------------------
// RobotSpec
// ---------------------------------------------------------------------------

/// Static description of a robot model: joint ordering and default pose.
///
/// The default pose is the zero-reference for both observation deltas and
/// actuation offsets, in engine-native order.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotSpec {
    /// Model name.
    pub name: &'static str,
    /// Joint names in engine-native order.
    pub joint_names: Vec<&'static str>,
    /// Engine→policy gather table.
    pub engine_to_policy: Vec<usize>,
    /// Default joint positions (rad), engine-native order.
    pub default_pose: Vec<f32>,
}

impl RobotSpec {
    /// The 20-joint humanoid (12 leg + 8 arm joints) this runner ships with.
    #[must_use]
    pub fn humanoid() -> Self {
        Self {
            name: "humanoid20",
            joint_names: vec![
                "hip_roll_l_joint",
                "hip_pitch_l_joint",
                "hip_yaw_l_joint",
                "knee_pitch_l_joint",
                "ankle_pitch_l_joint",
                "ankle_roll_l_joint",
                "hip_roll_r_joint",
                "hip_pitch_r_joint",
                "hip_yaw_r_joint",
                "knee_pitch_r_joint",
                "ankle_pitch_r_joint",
                "ankle_roll_r_joint",
                "shoulder_pitch_l_joint",
                "shoulder_roll_l_joint",
                "shoulder_yaw_l_joint",
                "elbow_pitch_l_joint",
                "shoulder_pitch_r_joint",
                "shoulder_roll_r_joint",
                "shoulder_yaw_r_joint",
                "elbow_pitch_r_joint",
            ],
            // Policy slot -> engine index. The policy interleaves l/r pairs:
            // hip rolls, shoulder pitches, hip pitches, shoulder rolls, ...
            engine_to_policy: vec![
                0, 6, 12, 16, 1, 7, 13, 17, 2, 8, 14, 18, 3, 9, 15, 19, 4, 10, 5, 11,
            ],
            default_pose: vec![
                0.0, -0.5, 0.0, 1.0, -0.5, 0.0, // left leg
                0.0, -0.5, 0.0, 1.0, -0.5, 0.0, // right leg
                0.0, 0.1, 0.0, -0.3, // left arm
                0.0, -0.1, 0.0, -0.3, // right arm
            ],
        }
    }

    pub const fn joint_count(&self) -> usize {
        self.default_pose.len()
    }

    /// Build the validated index map for this robot.
    pub fn index_map(&self) -> Result<JointIndexMap, ValidationError> {
        JointIndexMap::new(self.engine_to_policy.clone(), self.joint_count())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
