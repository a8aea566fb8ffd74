//! Demo-grade collaborators for the Strider control loop.
//!
//! [`ServoSim`](servo::ServoSim) is a joint-servo stand-in for a full
//! rigid-body engine: it tracks commanded position targets with first-order
//! dynamics and synthesizes the sensor frame the loop expects. A real
//! engine binding plugs in through the same
//! [`Simulator`](strider_core::traits::Simulator) trait.
//!
//! [`ConsoleViewer`](console::ConsoleViewer) reports state through
//! `tracing` instead of a window.

pub mod console;
pub mod servo;

pub mod prelude {
    pub use crate::console::ConsoleViewer;
    pub use crate::servo::ServoSim;
}
