use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_target_rpm() -> f64 {
    2.0
}
const fn default_voltage() -> f64 {
    5.0
}
const fn default_current() -> f64 {
    100.0
}
const fn default_radius() -> f64 {
    15.0
}
const fn default_mass() -> f64 {
    0.5
}
const fn default_slowing_factor() -> f64 {
    0.1
}
const fn default_iterations_limit() -> u32 {
    20
}
const fn default_k_p() -> f64 {
    1.0
}
const fn default_true() -> bool {
    true
}
fn default_output() -> PathBuf {
    PathBuf::from("rpm_history.json")
}

// ---------------------------------------------------------------------------
// SamplePoint
// ---------------------------------------------------------------------------

/// Which rpm value a tick appends to the history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplePoint {
    /// After the slowing factor has been applied (end-of-tick state).
    #[default]
    AfterDrag,
    /// After acceleration but before the slowing factor.
    BeforeDrag,
}

// ---------------------------------------------------------------------------
// MotorConfig
// ---------------------------------------------------------------------------

/// Physical and loop parameters shared by every controller kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotorConfig {
    /// Starting speed (default: 0).
    #[serde(default)]
    pub initial_rpm: f64,

    /// Desired speed (default: 2).
    #[serde(default = "default_target_rpm")]
    pub target_rpm: f64,

    /// Supply voltage. Used as the bang-bang "on" level by the simple
    /// controller (default: 5).
    #[serde(default = "default_voltage")]
    pub voltage: f64,

    /// Motor current, fixed for the whole run (default: 100).
    #[serde(default = "default_current")]
    pub current: f64,

    /// Rotor blade length (default: 15).
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// Rotor blade mass (default: 0.5).
    #[serde(default = "default_mass")]
    pub mass: f64,

    /// Fraction of rpm lost every tick to friction and air (default: 0.1).
    #[serde(default = "default_slowing_factor")]
    pub slowing_factor: f64,

    /// Number of ticks to simulate (default: 20).
    #[serde(default = "default_iterations_limit")]
    pub iterations_limit: u32,

    /// Which rpm each tick records (default: after drag).
    #[serde(default)]
    pub sample_point: SamplePoint,
}

impl Default for MotorConfig {
    fn default() -> Self {
        Self {
            initial_rpm: 0.0,
            target_rpm: default_target_rpm(),
            voltage: default_voltage(),
            current: default_current(),
            radius: default_radius(),
            mass: default_mass(),
            slowing_factor: default_slowing_factor(),
            iterations_limit: default_iterations_limit(),
            sample_point: SamplePoint::default(),
        }
    }
}

impl MotorConfig {
    /// Set the target speed.
    #[must_use]
    pub const fn with_target_rpm(mut self, target_rpm: f64) -> Self {
        self.target_rpm = target_rpm;
        self
    }

    /// Set the number of ticks.
    #[must_use]
    pub const fn with_iterations_limit(mut self, limit: u32) -> Self {
        self.iterations_limit = limit;
        self
    }

    /// Set which rpm value is recorded per tick.
    #[must_use]
    pub const fn with_sample_point(mut self, sample_point: SamplePoint) -> Self {
        self.sample_point = sample_point;
        self
    }

    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("initial_rpm", self.initial_rpm),
            ("target_rpm", self.target_rpm),
            ("voltage", self.voltage),
            ("current", self.current),
            ("slowing_factor", self.slowing_factor),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        // Both appear in the acceleration denominator.
        for (field, value) in [("mass", self.mass), ("radius", self.radius)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.iterations_limit == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PidGains
// ---------------------------------------------------------------------------

/// Fixed PID gains.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidGains {
    #[serde(default = "default_k_p")]
    pub k_p: f64,
    #[serde(default)]
    pub k_i: f64,
    #[serde(default)]
    pub k_d: f64,
}

impl Default for PidGains {
    fn default() -> Self {
        Self {
            k_p: default_k_p(),
            k_i: 0.0,
            k_d: 0.0,
        }
    }
}

impl PidGains {
    pub const fn new(k_p: f64, k_i: f64, k_d: f64) -> Self {
        Self { k_p, k_i, k_d }
    }

    /// Validate gains. All three must be finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("k_p", self.k_p), ("k_i", self.k_i), ("k_d", self.k_d)] {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    message: format!("{value} is not finite"),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ControllerConfig
// ---------------------------------------------------------------------------

/// Control strategy for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControllerConfig {
    /// Bang-bang: full voltage below target, zero at or above it.
    Simple,
    /// PID with fixed gains.
    Pid(PidGains),
    /// PID whose proportional and integral gains come from fuzzy inference.
    FuzzyPid,
}

impl ControllerConfig {
    /// Short name used in logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Pid(_) => "pid",
            Self::FuzzyPid => "fuzzy_pid",
        }
    }
}

// ---------------------------------------------------------------------------
// RunConfig
// ---------------------------------------------------------------------------

/// One named simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Key under which the run's history is stored.
    pub name: String,
    pub controller: ControllerConfig,
    #[serde(flatten)]
    pub motor: MotorConfig,
}

impl RunConfig {
    pub fn new(name: impl Into<String>, controller: ControllerConfig, motor: MotorConfig) -> Self {
        Self {
            name: name.into(),
            controller,
            motor,
        }
    }

    /// Validate the motor parameters and, for PID runs, the gains.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "name".into(),
                message: "run name must not be empty".into(),
            });
        }
        if let ControllerConfig::Pid(gains) = &self.controller {
            gains.validate()?;
        }
        self.motor.validate()
    }
}

// ---------------------------------------------------------------------------
// ScenarioConfig
// ---------------------------------------------------------------------------

/// A set of runs executed together and persisted to one history file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Run every simulation on its own thread (default: true).
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// History output file (default: `rpm_history.json`).
    #[serde(default = "default_output")]
    pub output: PathBuf,

    pub runs: Vec<RunConfig>,
}

impl ScenarioConfig {
    /// The three-way comparison: bang-bang, PID (`k_p=2, k_i=0.01, k_d=0`)
    /// and fuzzy PID, all sharing the same target and tick count.
    pub fn standard(target_rpm: f64, iterations_limit: u32) -> Self {
        let motor = MotorConfig::default()
            .with_target_rpm(target_rpm)
            .with_iterations_limit(iterations_limit);
        Self {
            parallel: true,
            output: default_output(),
            runs: vec![
                RunConfig::new("simple_motor", ControllerConfig::Simple, motor.clone()),
                RunConfig::new(
                    "pid_motor",
                    ControllerConfig::Pid(PidGains::new(2.0, 0.01, 0.0)),
                    motor.clone(),
                ),
                RunConfig::new("fuzzy_pid_motor", ControllerConfig::FuzzyPid, motor),
            ],
        }
    }

    /// Validate every run and check names are unique.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runs.is_empty() {
            return Err(ConfigError::EmptyScenario);
        }
        let mut seen = HashSet::with_capacity(self.runs.len());
        for run in &self.runs {
            run.validate()?;
            if !seen.insert(run.name.as_str()) {
                return Err(ConfigError::DuplicateRunName(run.name.clone()));
            }
        }
        Ok(())
    }

    /// Parse and validate a TOML scenario.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- MotorConfig ----

    #[test]
    fn motor_config_default_values() {
        let cfg = MotorConfig::default();
        assert!(cfg.initial_rpm.abs() < f64::EPSILON);
        assert!((cfg.target_rpm - 2.0).abs() < f64::EPSILON);
        assert!((cfg.voltage - 5.0).abs() < f64::EPSILON);
        assert!((cfg.current - 100.0).abs() < f64::EPSILON);
        assert!((cfg.radius - 15.0).abs() < f64::EPSILON);
        assert!((cfg.mass - 0.5).abs() < f64::EPSILON);
        assert!((cfg.slowing_factor - 0.1).abs() < f64::EPSILON);
        assert_eq!(cfg.iterations_limit, 20);
        assert_eq!(cfg.sample_point, SamplePoint::AfterDrag);
    }

    #[test]
    fn motor_config_validate_ok() {
        assert!(MotorConfig::default().validate().is_ok());
    }

    #[test]
    fn motor_config_rejects_zero_mass() {
        let cfg = MotorConfig {
            mass: 0.0,
            ..MotorConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "mass", .. }));
    }

    #[test]
    fn motor_config_rejects_negative_radius() {
        let cfg = MotorConfig {
            radius: -2.0,
            ..MotorConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "radius", .. }));
    }

    #[test]
    fn motor_config_rejects_nan_voltage() {
        let cfg = MotorConfig {
            voltage: f64::NAN,
            ..MotorConfig::default()
        };
        assert!(matches!(
            cfg.validate().unwrap_err(),
            ConfigError::NonFinite { field: "voltage", .. }
        ));
    }

    #[test]
    fn motor_config_rejects_zero_iterations() {
        let cfg = MotorConfig::default().with_iterations_limit(0);
        assert!(matches!(cfg.validate().unwrap_err(), ConfigError::ZeroIterations));
    }

    // ---- PidGains ----

    #[test]
    fn pid_gains_default() {
        let gains = PidGains::default();
        assert!((gains.k_p - 1.0).abs() < f64::EPSILON);
        assert!(gains.k_i.abs() < f64::EPSILON);
        assert!(gains.k_d.abs() < f64::EPSILON);
    }

    #[test]
    fn pid_gains_reject_infinite() {
        let gains = PidGains::new(1.0, f64::INFINITY, 0.0);
        assert!(gains.validate().is_err());
    }

    // ---- ScenarioConfig ----

    #[test]
    fn standard_scenario_has_three_runs() {
        let scenario = ScenarioConfig::standard(70.0, 20);
        let names: Vec<_> = scenario.runs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["simple_motor", "pid_motor", "fuzzy_pid_motor"]);
        assert!(scenario.validate().is_ok());
        assert!(scenario.parallel);
        assert_eq!(scenario.output, PathBuf::from("rpm_history.json"));
        for run in &scenario.runs {
            assert!((run.motor.target_rpm - 70.0).abs() < f64::EPSILON);
            assert_eq!(run.motor.iterations_limit, 20);
        }
        assert_eq!(
            scenario.runs[1].controller,
            ControllerConfig::Pid(PidGains::new(2.0, 0.01, 0.0))
        );
    }

    #[test]
    fn empty_scenario_is_rejected() {
        let scenario = ScenarioConfig {
            runs: Vec::new(),
            ..ScenarioConfig::standard(70.0, 20)
        };
        assert!(matches!(
            scenario.validate().unwrap_err(),
            ConfigError::EmptyScenario
        ));
    }

    #[test]
    fn duplicate_run_names_are_rejected() {
        let mut scenario = ScenarioConfig::standard(70.0, 20);
        scenario.runs[2].name = "simple_motor".into();
        assert!(matches!(
            scenario.validate().unwrap_err(),
            ConfigError::DuplicateRunName(name) if name == "simple_motor"
        ));
    }

    #[test]
    fn scenario_toml_deserialization() {
        let toml_str = r#"
            parallel = false
            output = "out.json"

            [[runs]]
            name = "bang"
            target_rpm = 30.0
            controller = { kind = "simple" }

            [[runs]]
            name = "pid"
            target_rpm = 30.0
            iterations_limit = 50
            sample_point = "before_drag"
            controller = { kind = "pid", k_p = 2.0, k_i = 0.01 }

            [[runs]]
            name = "fuzzy"
            controller = { kind = "fuzzy_pid" }
        "#;
        let scenario = ScenarioConfig::from_toml_str(toml_str).unwrap();
        assert!(!scenario.parallel);
        assert_eq!(scenario.output, PathBuf::from("out.json"));
        assert_eq!(scenario.runs.len(), 3);

        assert_eq!(scenario.runs[0].controller, ControllerConfig::Simple);
        assert!((scenario.runs[0].motor.target_rpm - 30.0).abs() < f64::EPSILON);
        assert_eq!(scenario.runs[0].motor.iterations_limit, 20);

        assert_eq!(
            scenario.runs[1].controller,
            ControllerConfig::Pid(PidGains::new(2.0, 0.01, 0.0))
        );
        assert_eq!(scenario.runs[1].motor.iterations_limit, 50);
        assert_eq!(scenario.runs[1].motor.sample_point, SamplePoint::BeforeDrag);

        assert_eq!(scenario.runs[2].controller, ControllerConfig::FuzzyPid);
        assert_eq!(scenario.runs[2].motor, MotorConfig::default());
    }

    #[test]
    fn scenario_toml_invalid_mass_fails_validation() {
        let toml_str = r#"
            [[runs]]
            name = "bad"
            mass = 0.0
            controller = { kind = "simple" }
        "#;
        let err = ScenarioConfig::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "mass", .. }));
    }

    #[test]
    fn scenario_toml_unknown_kind_is_parse_error() {
        let toml_str = r#"
            [[runs]]
            name = "x"
            controller = { kind = "lqr" }
        "#;
        let err = ScenarioConfig::from_toml_str(toml_str).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let err = ScenarioConfig::from_file("/nonexistent/rotorsim/scenario.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn controller_names() {
        assert_eq!(ControllerConfig::Simple.name(), "simple");
        assert_eq!(ControllerConfig::Pid(PidGains::default()).name(), "pid");
        assert_eq!(ControllerConfig::FuzzyPid.name(), "fuzzy_pid");
    }
}
