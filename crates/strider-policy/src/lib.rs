//! Policy implementations for the Strider control runner.
//!
//! Provides basic policies (zero, constant, scripted) for tests and dry
//! runs, plus ONNX Runtime inference behind the `onnx` feature flag. All
//! policies implement [`Policy`](strider_core::traits::Policy); the control
//! loop never knows which one it is driving.

#[cfg(feature = "onnx")]
pub mod onnx;
pub mod policies;

pub mod prelude {
    #[cfg(feature = "onnx")]
    pub use crate::onnx::{OnnxPolicy, OnnxPolicyError};
    pub use crate::policies::{ConstantPolicy, ScriptedPolicy, ZeroPolicy};
}
