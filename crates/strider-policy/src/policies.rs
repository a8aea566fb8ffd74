//! Basic policy implementations.
//!
//! All policies implement [`Policy`] from `strider-core`. These exist for
//! tests and for exercising the loop without a trained network.

use std::sync::Mutex;

use strider_core::traits::Policy;
use strider_core::types::{Action, Observation};

// ---------------------------------------------------------------------------
// ZeroPolicy
// ---------------------------------------------------------------------------

/// Policy that always returns a zero-valued action.
///
/// Under the action mapper a zero action commands exactly the default pose,
/// which makes this the standard stand-still smoke policy.
pub struct ZeroPolicy {
    dim: usize,
}

impl ZeroPolicy {
    pub const fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Policy for ZeroPolicy {
    fn get_action(&self, _obs: &Observation) -> Action {
        Action::zeros(self.dim)
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "ZeroPolicy"
    }

    fn is_deterministic(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// ConstantPolicy
// ---------------------------------------------------------------------------

/// Policy that always returns the same fixed action.
pub struct ConstantPolicy {
    action: Action,
}

impl ConstantPolicy {
    pub const fn new(action: Action) -> Self {
        Self { action }
    }
}

impl Policy for ConstantPolicy {
    fn get_action(&self, _obs: &Observation) -> Action {
        self.action.clone()
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "ConstantPolicy"
    }

    fn is_deterministic(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// ScriptedPolicy
// ---------------------------------------------------------------------------

/// Policy that replays a fixed sequence of actions, cycling when exhausted.
pub struct ScriptedPolicy {
    actions: Vec<Action>,
    index: Mutex<usize>,
}

impl ScriptedPolicy {
    /// Create from a non-empty action sequence.
    ///
    /// Panics if `actions` is empty.
    pub fn new(actions: Vec<Action>) -> Self {
        assert!(!actions.is_empty(), "scripted policy needs at least one action");
        Self {
            actions,
            index: Mutex::new(0),
        }
    }
}

impl Policy for ScriptedPolicy {
    fn get_action(&self, _obs: &Observation) -> Action {
        let mut index = self.index.lock().expect("script index lock poisoned");
        let action = self.actions[*index].clone();
        *index = (*index + 1) % self.actions.len();
        action
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "ScriptedPolicy"
    }

    fn is_deterministic(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
