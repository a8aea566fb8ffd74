use crate::error::SimError;
use crate::types::{Action, Observation, SensorFrame};

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// A policy that maps observations to actions.
pub trait Policy: Send + Sync + 'static {
    /// Given an observation, produce an action.
    ///
    /// The runner consumes the first `joint_count` elements of the result;
    /// the policy may return more but never fewer.
    fn get_action(&self, obs: &Observation) -> Action;

    /// Human-readable name for this policy.
    fn name(&self) -> &str;

    /// Whether this policy is deterministic (no randomness).
    fn is_deterministic(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// Engine-agnostic physics collaborator.
///
/// The control loop only ever drives an implementation of this trait: it
/// reads sensor state, commands actuator targets in engine-native joint
/// order, and advances the integrator one fixed timestep at a time.
pub trait Simulator: Send + 'static {
    /// Current simulated time in seconds.
    fn time(&self) -> f64;

    /// Read the current sensor state.
    fn sense(&mut self) -> SensorFrame;

    /// Set actuator position targets (engine-native joint order) for the
    /// next integration step. Targets persist until overwritten.
    fn command_targets(&mut self, targets: &[f32]);

    /// Advance the simulation by one fixed timestep.
    ///
    /// Failures are fatal to the run and propagate out of the control loop.
    fn step(&mut self) -> Result<(), SimError>;

    /// Human-readable engine name (e.g., "servo").
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Viewer
// ---------------------------------------------------------------------------

/// Display consumer, called once per macro-step with the post-step state.
///
/// The core never reads anything back from the viewer.
pub trait Viewer: Send + 'static {
    /// Present the current simulation state.
    fn render(&mut self, frame: &SensorFrame, sim_time: f64);

    /// Release display resources. Called once when the loop exits.
    fn close(&mut self) {}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct DummyPolicy;

    impl Policy for DummyPolicy {
        fn get_action(&self, _obs: &Observation) -> Action {
            Action::zeros(1)
        }

        #[allow(clippy::unnecessary_literal_bound)]
        fn name(&self) -> &str {
            "DummyPolicy"
        }
    }

    struct DummySim;

    impl Simulator for DummySim {
        fn time(&self) -> f64 {
            0.0
        }
        fn sense(&mut self) -> SensorFrame {
            SensorFrame::zeroed(1)
        }
        fn command_targets(&mut self, _targets: &[f32]) {}
        fn step(&mut self) -> Result<(), SimError> {
            Ok(())
        }
        #[allow(clippy::unnecessary_literal_bound)]
        fn name(&self) -> &str {
            "dummy"
        }
    }

    struct DummyViewer;

    impl Viewer for DummyViewer {
        fn render(&mut self, _frame: &SensorFrame, _sim_time: f64) {}
    }

    /// Verify the traits are object-safe (usable as boxed trait objects).
    #[test]
    fn traits_are_object_safe() {
        fn _policy(_: Box<dyn Policy>) {}
        fn _sim(_: Box<dyn Simulator>) {}
        fn _viewer(_: Box<dyn Viewer>) {}
    }

    #[test]
    fn policy_defaults_deterministic() {
        let p = DummyPolicy;
        assert!(p.is_deterministic());
        assert_eq!(p.name(), "DummyPolicy");
    }

    #[test]
    fn dummy_sim_can_be_boxed() {
        let mut sim: Box<dyn Simulator> = Box::new(DummySim);
        assert_eq!(sim.name(), "dummy");
        assert!(sim.step().is_ok());
        assert_eq!(sim.sense().joint_count(), 1);
    }

    #[test]
    fn viewer_close_default_is_noop() {
        let mut v = DummyViewer;
        v.render(&SensorFrame::zeroed(1), 0.0);
        v.close();
    }
}
