use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// Flat f32 vector handed to the policy.
///
/// For the control runner this is the flattened observation history
/// (`history_len * obs_per_step` elements, oldest frame first), already
/// clamped to the configured observation bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    data: Vec<f32>,
}

impl Observation {
    pub const fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![0.0; len],
        }
    }

    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Clamp every element to `[-limit, limit]` in place.
    pub fn clamp(&mut self, limit: f32) {
        for val in &mut self.data {
            *val = val.clamp(-limit, limit);
        }
    }
}

impl std::ops::Index<usize> for Observation {
    type Output = f32;
    fn index(&self, i: usize) -> &f32 {
        &self.data[i]
    }
}

impl From<Vec<f32>> for Observation {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// Raw policy output: one continuous value per actuated joint, in
/// policy-native joint order.
///
/// Retained across macro-steps as the previous-action observation feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    data: Vec<f32>,
}

impl Action {
    pub const fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![0.0; len],
        }
    }

    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Clamp every element to `[-limit, limit]` in place.
    pub fn clip(&mut self, limit: f32) {
        for val in &mut self.data {
            *val = val.clamp(-limit, limit);
        }
    }

    /// Validate action data (no NaN, no Inf).
    pub fn validate(&self) -> Result<(), ValidationError> {
        for val in &self.data {
            if val.is_nan() {
                return Err(ValidationError::ActionContainsNan);
            }
            if val.is_infinite() {
                return Err(ValidationError::ActionContainsInf);
            }
        }
        Ok(())
    }
}

impl From<Vec<f32>> for Action {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}

// ---------------------------------------------------------------------------
// SensorFrame
// ---------------------------------------------------------------------------

/// One macro-step's worth of sensor readings from the physics collaborator.
///
/// Joint arrays are in engine-native order; the orientation quaternion is
/// scalar-last `(x, y, z, w)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorFrame {
    /// Base linear velocity in the body frame (m/s).
    pub linear_velocity: [f32; 3],
    /// Base angular velocity in the body frame (rad/s).
    pub angular_velocity: [f32; 3],
    /// Base orientation quaternion, scalar-last `(x, y, z, w)`.
    pub orientation: [f32; 4],
    /// Joint positions (rad), engine-native order.
    pub joint_positions: Vec<f32>,
    /// Joint velocities (rad/s), engine-native order.
    pub joint_velocities: Vec<f32>,
}

impl SensorFrame {
    /// All-zero frame with an identity orientation.
    pub fn zeroed(joint_count: usize) -> Self {
        Self {
            linear_velocity: [0.0; 3],
            angular_velocity: [0.0; 3],
            orientation: [0.0, 0.0, 0.0, 1.0],
            joint_positions: vec![0.0; joint_count],
            joint_velocities: vec![0.0; joint_count],
        }
    }

    pub const fn joint_count(&self) -> usize {
        self.joint_positions.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
