use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the Strider runner.
#[derive(Debug, Error)]
pub enum StriderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] SimError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Configuration errors. All of these are fatal before the loop starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid physics_dt: {0} (must be > 0)")]
    InvalidPhysicsDt(f64),

    #[error("Invalid decimation: {0} (must be >= 1)")]
    InvalidDecimation(u32),

    #[error("Invalid duration: {0} (must be > 0)")]
    InvalidDuration(f64),

    #[error("Invalid gait cycle: {0} (must be > 0)")]
    InvalidGaitCycle(f64),

    #[error("{kind} file not found: {path}")]
    MissingFile { kind: &'static str, path: PathBuf },
}

/// Runtime failures from the physics collaborator.
///
/// These propagate out of the control loop unmodified; there is no retry.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("Physics diverged: NaN detected in state")]
    PhysicsDiverged,

    #[error("Step failed: {0}")]
    StepFailed(String),
}

/// Construction and per-step validation errors.
///
/// Copy + static messages for cheap propagation in hot paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Joint map length mismatch: expected {expected}, got {got}")]
    JointMapLength { expected: usize, got: usize },

    #[error("Joint map index {index} out of range for {joints} joints")]
    JointMapIndexOutOfRange { index: usize, joints: usize },

    #[error("Joint map index {index} appears more than once")]
    JointMapDuplicateIndex { index: usize },

    #[error("Action dimension mismatch: expected {expected}, got {got}")]
    ActionDimMismatch { expected: usize, got: usize },

    #[error("Observation dimension mismatch: expected {expected}, got {got}")]
    ObservationDimMismatch { expected: usize, got: usize },

    #[error("Action contains NaN")]
    ActionContainsNan,

    #[error("Action contains Inf")]
    ActionContainsInf,
}
