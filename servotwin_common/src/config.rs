//! TOML simulation configuration with validation.
//!
//! Loads a [`SimConfig`] from a TOML file or string and validates every
//! parameter before any stepping begins: positive time step and
//! duration, positive inertia and thresholds, finite values everywhere.
//! A run must never start from a configuration that would divide by
//! zero or propagate non-finite state.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DT, DEFAULT_DURATION, DEFAULT_REFERENCE_DEG, DT_MAX, DT_MIN, DURATION_MAX,
};

// ─── Error Type ─────────────────────────────────────────────────────

/// Configuration loading/validation error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML parse error.
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Parameter validation error.
    #[error("config validation: {0}")]
    Validation(String),
}

// ─── Section Types ──────────────────────────────────────────────────

/// Physical parameters of one rotational actuator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ActuatorConfig {
    /// Rotor inertia J [kg·m²].
    pub inertia: f64,
    /// Viscous damping b [N·m·s/rad].
    pub damping: f64,
    /// Torque constant Kt [N·m/A].
    pub torque_constant: f64,
    /// Constant external load torque [N·m].
    pub load_torque: f64,
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self {
            inertia: 0.0035,
            damping: 0.025,
            torque_constant: 0.05,
            load_torque: 0.0,
        }
    }
}

impl ActuatorConfig {
    fn validate(&self, section: &str) -> Result<(), String> {
        if !self.inertia.is_finite() || self.inertia <= 0.0 {
            return Err(format!("{section}.inertia must be positive, got {}", self.inertia));
        }
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(format!(
                "{section}.damping must be non-negative, got {}",
                self.damping
            ));
        }
        if !self.torque_constant.is_finite() {
            return Err(format!(
                "{section}.torque_constant must be finite, got {}",
                self.torque_constant
            ));
        }
        if !self.load_torque.is_finite() {
            return Err(format!(
                "{section}.load_torque must be finite, got {}",
                self.load_torque
            ));
        }
        Ok(())
    }
}

/// PID controller gains.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PidConfig {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
}

impl Default for PidConfig {
    fn default() -> Self {
        Self {
            kp: 4.0,
            ki: 0.05,
            kd: 0.2,
        }
    }
}

impl PidConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, v) in [("kp", self.kp), ("ki", self.ki), ("kd", self.kd)] {
            if !v.is_finite() {
                return Err(format!("controller.{name} must be finite, got {v}"));
            }
        }
        Ok(())
    }
}

/// Residual thresholds for fault classification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Position residual threshold [deg].
    pub position_threshold_deg: f64,
    /// Velocity residual threshold [deg/s].
    pub velocity_threshold_deg: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            position_threshold_deg: 2.0,
            velocity_threshold_deg: 5.0,
        }
    }
}

impl DetectionConfig {
    /// Position threshold in radians.
    pub fn position_threshold(&self) -> f64 {
        self.position_threshold_deg.to_radians()
    }

    /// Velocity threshold in radians per second.
    pub fn velocity_threshold(&self) -> f64 {
        self.velocity_threshold_deg.to_radians()
    }

    fn validate(&self) -> Result<(), String> {
        if !self.position_threshold_deg.is_finite() || self.position_threshold_deg <= 0.0 {
            return Err(format!(
                "detection.position_threshold_deg must be positive, got {}",
                self.position_threshold_deg
            ));
        }
        if !self.velocity_threshold_deg.is_finite() || self.velocity_threshold_deg <= 0.0 {
            return Err(format!(
                "detection.velocity_threshold_deg must be positive, got {}",
                self.velocity_threshold_deg
            ));
        }
        Ok(())
    }
}

/// Drift-fault injection parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectionConfig {
    /// Bias drift rate [deg/s]. Zero disables the injected fault.
    pub drift_rate_deg: f64,
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self { drift_rate_deg: 1.0 }
    }
}

impl InjectionConfig {
    /// Drift rate in radians per second.
    pub fn drift_rate(&self) -> f64 {
        self.drift_rate_deg.to_radians()
    }

    fn validate(&self) -> Result<(), String> {
        if !self.drift_rate_deg.is_finite() {
            return Err(format!(
                "injection.drift_rate_deg must be finite, got {}",
                self.drift_rate_deg
            ));
        }
        Ok(())
    }
}

/// Time base and reference signal for one run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Sample period dt [s].
    pub dt: f64,
    /// Run duration [s].
    pub duration: f64,
    /// Step reference [deg].
    pub reference_deg: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            duration: DEFAULT_DURATION,
            reference_deg: DEFAULT_REFERENCE_DEG,
        }
    }
}

impl RunConfig {
    /// Number of samples in the run: `ceil(duration / dt)`.
    pub fn sample_count(&self) -> usize {
        (self.duration / self.dt).ceil() as usize
    }

    /// Uniformly sampled time vector `[0, dt, 2·dt, …)`.
    pub fn time_vector(&self) -> Vec<f64> {
        (0..self.sample_count()).map(|i| i as f64 * self.dt).collect()
    }

    /// Constant step reference [rad], one sample per time sample.
    pub fn reference(&self) -> Vec<f64> {
        vec![self.reference_deg.to_radians(); self.sample_count()]
    }

    fn validate(&self) -> Result<(), String> {
        if !self.dt.is_finite() || self.dt < DT_MIN || self.dt > DT_MAX {
            return Err(format!(
                "run.dt {} out of range [{DT_MIN}, {DT_MAX}]",
                self.dt
            ));
        }
        if !self.duration.is_finite() || self.duration < self.dt || self.duration > DURATION_MAX {
            return Err(format!(
                "run.duration {} out of range [dt, {DURATION_MAX}]",
                self.duration
            ));
        }
        if !self.reference_deg.is_finite() {
            return Err(format!(
                "run.reference_deg must be finite, got {}",
                self.reference_deg
            ));
        }
        Ok(())
    }
}

// ─── Top-Level Config ───────────────────────────────────────────────

/// Complete simulation configuration.
///
/// Defaults reproduce the reference fault-injection scenario: a 60° step
/// at 1 kHz for 2 s, deliberately mismatched twin parameters, 1°/s
/// sensor drift, 2° / 5°/s residual thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Time base and reference.
    pub run: RunConfig,
    /// Real actuator parameters.
    pub real: ActuatorConfig,
    /// Digital twin parameters (independently configured).
    pub twin: ActuatorConfig,
    /// Controller gains.
    pub controller: PidConfig,
    /// Residual thresholds.
    pub detection: DetectionConfig,
    /// Drift-fault injection.
    pub injection: InjectionConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            run: RunConfig::default(),
            real: ActuatorConfig::default(),
            twin: ActuatorConfig {
                inertia: 0.0033,
                damping: 0.022,
                torque_constant: 0.047,
                load_torque: 0.0,
            },
            controller: PidConfig::default(),
            detection: DetectionConfig::default(),
            injection: InjectionConfig::default(),
        }
    }
}

impl SimConfig {
    /// Parse and validate a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let toml_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&toml_str)
    }

    /// Run all validation rules. Must pass before any stepping begins.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.run.validate().map_err(ConfigError::Validation)?;
        self.real.validate("real").map_err(ConfigError::Validation)?;
        self.twin.validate("twin").map_err(ConfigError::Validation)?;
        self.controller.validate().map_err(ConfigError::Validation)?;
        self.detection.validate().map_err(ConfigError::Validation)?;
        self.injection.validate().map_err(ConfigError::Validation)?;
        Ok(())
    }
}

// ─── Tests ──────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
        // Reference scenario: mismatched twin.
        assert!(config.twin.inertia != config.real.inertia);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = SimConfig::from_toml("").unwrap();
        assert_eq!(config.run.dt, DEFAULT_DT);
        assert_eq!(config.twin.inertia, 0.0033);
        assert_eq!(config.controller.kp, 4.0);
    }

    #[test]
    fn partial_toml_overrides_one_section() {
        let config = SimConfig::from_toml(
            r#"
[run]
dt = 0.002
duration = 1.0
"#,
        )
        .unwrap();
        assert_eq!(config.run.dt, 0.002);
        assert_eq!(config.run.duration, 1.0);
        // Untouched sections keep scenario defaults.
        assert_eq!(config.real.inertia, 0.0035);
        assert_eq!(config.injection.drift_rate_deg, 1.0);
    }

    #[test]
    fn reject_zero_dt() {
        let err = SimConfig::from_toml("[run]\ndt = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("run.dt"), "got: {err}");
    }

    #[test]
    fn reject_negative_dt() {
        let err = SimConfig::from_toml("[run]\ndt = -0.001\n").unwrap_err();
        assert!(err.to_string().contains("run.dt"), "got: {err}");
    }

    #[test]
    fn reject_duration_shorter_than_dt() {
        let err = SimConfig::from_toml("[run]\ndt = 0.5\nduration = 0.1\n").unwrap_err();
        assert!(err.to_string().contains("run.duration"), "got: {err}");
    }

    #[test]
    fn reject_non_positive_inertia() {
        let err = SimConfig::from_toml("[real]\ninertia = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("real.inertia"), "got: {err}");

        let err = SimConfig::from_toml("[twin]\ninertia = -1.0\n").unwrap_err();
        assert!(err.to_string().contains("twin.inertia"), "got: {err}");
    }

    #[test]
    fn reject_non_positive_thresholds() {
        let err =
            SimConfig::from_toml("[detection]\nposition_threshold_deg = 0.0\n").unwrap_err();
        assert!(err.to_string().contains("position_threshold_deg"), "got: {err}");

        let err =
            SimConfig::from_toml("[detection]\nvelocity_threshold_deg = -5.0\n").unwrap_err();
        assert!(err.to_string().contains("velocity_threshold_deg"), "got: {err}");
    }

    #[test]
    fn reject_non_finite_values() {
        let err = SimConfig::from_toml("[controller]\nkp = inf\n").unwrap_err();
        assert!(err.to_string().contains("controller.kp"), "got: {err}");

        let err = SimConfig::from_toml("[injection]\ndrift_rate_deg = nan\n").unwrap_err();
        assert!(err.to_string().contains("drift_rate_deg"), "got: {err}");
    }

    #[test]
    fn reject_malformed_toml() {
        let err = SimConfig::from_toml("this is not valid toml @@@@");
        assert!(err.is_err());
    }

    #[test]
    fn sample_count_matches_duration() {
        let run = RunConfig {
            dt: 0.001,
            duration: 2.0,
            reference_deg: 60.0,
        };
        assert_eq!(run.sample_count(), 2000);

        let t = run.time_vector();
        assert_eq!(t.len(), 2000);
        assert_eq!(t[0], 0.0);
        assert!((t[1999] - 1.999).abs() < 1e-12);

        let reference = run.reference();
        assert_eq!(reference.len(), 2000);
        assert!((reference[0] - 60.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn threshold_unit_conversion() {
        let detection = DetectionConfig::default();
        assert!((detection.position_threshold() - 2.0_f64.to_radians()).abs() < 1e-12);
        assert!((detection.velocity_threshold() - 5.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sim.toml");
        std::fs::write(&path, "[run]\nduration = 0.5\n").unwrap();

        let config = SimConfig::load(&path).unwrap();
        assert_eq!(config.run.duration, 0.5);
    }

    #[test]
    fn load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SimConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("missing.toml"), "got: {err}");
    }
}
