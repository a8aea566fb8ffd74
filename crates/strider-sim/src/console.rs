//! Console viewer.
//!
//! Reports simulation state through `tracing` at a configurable stride so
//! a 50 Hz loop does not flood the log.

use tracing::info;

use strider_core::traits::Viewer;
use strider_core::types::SensorFrame;

/// Viewer that logs a state line every `stride` render calls.
#[derive(Debug, Clone)]
pub struct ConsoleViewer {
    stride: u64,
    renders: u64,
}

impl ConsoleViewer {
    /// Log every `stride`-th macro-step (minimum 1).
    #[must_use]
    pub fn new(stride: u64) -> Self {
        Self {
            stride: stride.max(1),
            renders: 0,
        }
    }

    /// Render calls seen so far.
    pub const fn renders(&self) -> u64 {
        self.renders
    }
}

impl Default for ConsoleViewer {
    fn default() -> Self {
        Self::new(50)
    }
}

impl Viewer for ConsoleViewer {
    fn render(&mut self, frame: &SensorFrame, sim_time: f64) {
        if self.renders % self.stride == 0 {
            #[allow(clippy::cast_precision_loss)]
            let mean_speed = frame.joint_velocities.iter().map(|v| v.abs()).sum::<f32>()
                / frame.joint_count().max(1) as f32;
            info!(
                sim_time = format_args!("{sim_time:.2}"),
                joints = frame.joint_count(),
                mean_joint_speed = format_args!("{mean_speed:.3}"),
                "state"
            );
        }
        self.renders += 1;
    }

    fn close(&mut self) {
        info!(renders = self.renders, "viewer closed");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
