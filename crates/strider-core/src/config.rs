use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_physics_dt() -> f64 {
    0.005
}
const fn default_decimation() -> u32 {
    4
}
const fn default_duration() -> f64 {
    100.0
}
const fn default_joint_count() -> usize {
    20
}
const fn default_obs_per_step() -> usize {
    78
}
const fn default_history_len() -> usize {
    10
}
const fn default_clip_observations() -> f32 {
    100.0
}
const fn default_clip_actions() -> f32 {
    100.0
}
const fn default_action_scale() -> f32 {
    0.25
}

// ---------------------------------------------------------------------------
// SimParams
// ---------------------------------------------------------------------------

/// Control-loop parameters.
///
/// Must be kept consistent with the configuration the policy was trained
/// under; the observation layout and clipping bounds are part of the
/// inference contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Physics integration timestep in seconds (default: 0.005 = 200 Hz).
    #[serde(default = "default_physics_dt")]
    pub physics_dt: f64,

    /// Physics substeps per policy inference (default: 4).
    #[serde(default = "default_decimation")]
    pub decimation: u32,

    /// Simulated run duration in seconds (default: 100).
    #[serde(default = "default_duration")]
    pub duration: f64,

    /// Number of actuated joints (default: 20).
    #[serde(default = "default_joint_count")]
    pub joint_count: usize,

    /// Observation features per macro-step (default: 78).
    #[serde(default = "default_obs_per_step")]
    pub obs_per_step: usize,

    /// Macro-steps of observation history fed to the policy (default: 10).
    #[serde(default = "default_history_len")]
    pub history_len: usize,

    /// Symmetric clamp on every observation element (default: 100).
    #[serde(default = "default_clip_observations")]
    pub clip_observations: f32,

    /// Symmetric clamp on every action element (default: 100).
    #[serde(default = "default_clip_actions")]
    pub clip_actions: f32,

    /// Scale applied to actions before the default-pose offset (default: 0.25).
    #[serde(default = "default_action_scale")]
    pub action_scale: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            physics_dt: default_physics_dt(),
            decimation: default_decimation(),
            duration: default_duration(),
            joint_count: default_joint_count(),
            obs_per_step: default_obs_per_step(),
            history_len: default_history_len(),
            clip_observations: default_clip_observations(),
            clip_actions: default_clip_actions(),
            action_scale: default_action_scale(),
        }
    }
}

impl SimParams {
    /// Validate parameters. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.physics_dt <= 0.0 {
            return Err(ConfigError::InvalidPhysicsDt(self.physics_dt));
        }
        if self.decimation == 0 {
            return Err(ConfigError::InvalidDecimation(self.decimation));
        }
        if self.duration <= 0.0 {
            return Err(ConfigError::InvalidDuration(self.duration));
        }
        Ok(())
    }

    /// Macro-step period in seconds: one inference and `decimation` substeps.
    pub fn control_dt(&self) -> f64 {
        self.physics_dt * f64::from(self.decimation)
    }

    /// Policy inference rate in Hz.
    pub fn control_hz(&self) -> f64 {
        1.0 / self.control_dt()
    }
}

// ---------------------------------------------------------------------------
// GaitParams
// ---------------------------------------------------------------------------

/// Gait timing parameters for the two legs.
///
/// The presets mirror the parameter sets the walk and run policies were
/// trained with; mixing a preset with the other task's policy produces a
/// phase reference the network has never seen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaitParams {
    /// Fraction of the cycle the left leg is airborne.
    pub air_ratio_l: f64,
    /// Fraction of the cycle the right leg is airborne.
    pub air_ratio_r: f64,
    /// Left-leg phase offset in [0, 1).
    pub phase_offset_l: f64,
    /// Right-leg phase offset in [0, 1).
    pub phase_offset_r: f64,
    /// Gait cycle length in seconds.
    pub cycle: f64,
}

impl GaitParams {
    /// Walking gait preset.
    #[must_use]
    pub const fn walk() -> Self {
        Self {
            air_ratio_l: 0.38,
            air_ratio_r: 0.38,
            phase_offset_l: 0.38,
            phase_offset_r: 0.88,
            cycle: 0.85,
        }
    }

    /// Running gait preset.
    #[must_use]
    pub const fn run() -> Self {
        Self {
            air_ratio_l: 0.6,
            air_ratio_r: 0.6,
            phase_offset_l: 0.6,
            phase_offset_r: 0.1,
            cycle: 0.5,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycle <= 0.0 {
            return Err(ConfigError::InvalidGaitCycle(self.cycle));
        }
        Ok(())
    }
}

impl Default for GaitParams {
    fn default() -> Self {
        Self::walk()
    }
}

// ---------------------------------------------------------------------------
// RunConfig
// ---------------------------------------------------------------------------

/// Complete run configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub sim: SimParams,
    #[serde(default)]
    pub gait: GaitParams,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sim.validate()?;
        self.gait.validate()?;
        Ok(())
    }

    /// Load from a TOML file and validate.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- SimParams ----

    #[test]
    fn sim_params_default_values() {
        let params = SimParams::default();
        assert!((params.physics_dt - 0.005).abs() < f64::EPSILON);
        assert_eq!(params.decimation, 4);
        assert!((params.duration - 100.0).abs() < f64::EPSILON);
        assert_eq!(params.joint_count, 20);
        assert_eq!(params.obs_per_step, 78);
        assert_eq!(params.history_len, 10);
        assert!((params.clip_observations - 100.0).abs() < f32::EPSILON);
        assert!((params.clip_actions - 100.0).abs() < f32::EPSILON);
        assert!((params.action_scale - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn sim_params_control_dt() {
        let params = SimParams::default();
        // 0.005 * 4 = 0.02 → 50 Hz
        assert!((params.control_dt() - 0.02).abs() < 1e-12);
        assert!((params.control_hz() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn sim_params_validate_ok() {
        assert!(SimParams::default().validate().is_ok());
    }

    #[test]
    fn sim_params_validate_bad_dt() {
        let params = SimParams {
            physics_dt: 0.0,
            ..SimParams::default()
        };
        assert!(matches!(
            params.validate().unwrap_err(),
            ConfigError::InvalidPhysicsDt(_)
        ));
    }

    #[test]
    fn sim_params_validate_bad_decimation() {
        let params = SimParams {
            decimation: 0,
            ..SimParams::default()
        };
        assert!(matches!(
            params.validate().unwrap_err(),
            ConfigError::InvalidDecimation(0)
        ));
    }

    #[test]
    fn sim_params_validate_bad_duration() {
        let params = SimParams {
            duration: -1.0,
            ..SimParams::default()
        };
        assert!(matches!(
            params.validate().unwrap_err(),
            ConfigError::InvalidDuration(_)
        ));
    }

    // ---- GaitParams ----

    #[test]
    fn gait_walk_preset() {
        let gait = GaitParams::walk();
        assert!((gait.air_ratio_l - 0.38).abs() < f64::EPSILON);
        assert!((gait.air_ratio_r - 0.38).abs() < f64::EPSILON);
        assert!((gait.phase_offset_l - 0.38).abs() < f64::EPSILON);
        assert!((gait.phase_offset_r - 0.88).abs() < f64::EPSILON);
        assert!((gait.cycle - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn gait_run_preset() {
        let gait = GaitParams::run();
        assert!((gait.air_ratio_l - 0.6).abs() < f64::EPSILON);
        assert!((gait.phase_offset_l - 0.6).abs() < f64::EPSILON);
        assert!((gait.phase_offset_r - 0.1).abs() < f64::EPSILON);
        assert!((gait.cycle - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn gait_default_is_walk() {
        assert_eq!(GaitParams::default(), GaitParams::walk());
    }

    #[test]
    fn gait_validate_bad_cycle() {
        let gait = GaitParams {
            cycle: 0.0,
            ..GaitParams::walk()
        };
        assert!(matches!(
            gait.validate().unwrap_err(),
            ConfigError::InvalidGaitCycle(_)
        ));
    }

    // ---- RunConfig ----

    #[test]
    fn run_config_toml_deserialization() {
        let toml_str = r"
            [sim]
            physics_dt = 0.002
            decimation = 10
            duration = 30.0

            [gait]
            air_ratio_l = 0.5
            air_ratio_r = 0.5
            phase_offset_l = 0.0
            phase_offset_r = 0.5
            cycle = 0.7
        ";
        let config: RunConfig = toml::from_str(toml_str).unwrap();
        assert!((config.sim.physics_dt - 0.002).abs() < f64::EPSILON);
        assert_eq!(config.sim.decimation, 10);
        // Unspecified sim fields fall back to defaults.
        assert_eq!(config.sim.joint_count, 20);
        assert!((config.gait.cycle - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn run_config_toml_empty_is_defaults() {
        let config: RunConfig = toml::from_str("").unwrap();
        assert_eq!(config, RunConfig::default());
    }

    #[test]
    fn run_config_from_file() {
        let dir = std::env::temp_dir().join("strider_test_run_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("run.toml");
        std::fs::write(
            &path,
            r"
            [sim]
            duration = 12.5
        ",
        )
        .unwrap();

        let config = RunConfig::from_file(&path).unwrap();
        assert!((config.sim.duration - 12.5).abs() < f64::EPSILON);

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn run_config_from_file_invalid() {
        let dir = std::env::temp_dir().join("strider_test_run_config_invalid");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(
            &path,
            r"
            [sim]
            physics_dt = -0.005
        ",
        )
        .unwrap();

        assert!(RunConfig::from_file(&path).is_err());

        let _ = std::fs::remove_file(&path);
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn run_config_from_file_not_found() {
        assert!(RunConfig::from_file("/nonexistent/run.toml").is_err());
    }
}
