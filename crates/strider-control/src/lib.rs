//! Observation/action pipeline and control loop for the Strider runner.
//!
//! The pieces compose in one direction: a [`SensorFrame`] from the physics
//! collaborator flows through the [`ObservationAssembler`] (joint remapping,
//! gait phase, command velocity, history buffering) to the policy, whose
//! action the [`ActionMapper`] turns back into engine-native actuator
//! targets. [`ControlLoop`] drives one macro-step of that pipeline per
//! inference, paced to real time.
//!
//! [`SensorFrame`]: strider_core::types::SensorFrame
//! [`ObservationAssembler`]: observe::ObservationAssembler
//! [`ActionMapper`]: action::ActionMapper
//! [`ControlLoop`]: runner::ControlLoop

pub mod action;
pub mod command;
pub mod gait;
pub mod history;
pub mod joints;
pub mod observe;
pub mod runner;

pub mod prelude {
    pub use crate::action::ActionMapper;
    pub use crate::command::{CommandAxis, CommandBindings, CommandState};
    pub use crate::gait::GaitOscillator;
    pub use crate::history::ObsHistory;
    pub use crate::joints::{JointIndexMap, RobotSpec};
    pub use crate::observe::ObservationAssembler;
    pub use crate::runner::ControlLoop;
}
