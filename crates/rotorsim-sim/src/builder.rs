//! Fluent construction of a [`ScenarioConfig`].
//!
//! # Example
//!
//! ```
//! use rotorsim_core::config::{ControllerConfig, PidGains};
//! use rotorsim_sim::ScenarioBuilder;
//!
//! let scenario = ScenarioBuilder::new()
//!     .with_target_rpm(70.0)
//!     .with_iterations_limit(50)
//!     .with_run("pid_motor", ControllerConfig::Pid(PidGains::new(2.0, 0.01, 0.0)))
//!     .build()?;
//! assert_eq!(scenario.runs.len(), 1);
//! # Ok::<(), rotorsim_core::error::ConfigError>(())
//! ```

use std::path::PathBuf;

use rotorsim_core::config::{
    ControllerConfig, MotorConfig, RunConfig, SamplePoint, ScenarioConfig,
};
use rotorsim_core::error::ConfigError;

// ---------------------------------------------------------------------------
// ScenarioBuilder
// ---------------------------------------------------------------------------

/// Builds a validated [`ScenarioConfig`].
///
/// Motor settings (`with_motor`, `with_target_rpm`, ...) apply to every run
/// that does not carry its own motor, regardless of call order.
#[derive(Clone, Debug)]
pub struct ScenarioBuilder {
    motor: MotorConfig,
    runs: Vec<(String, ControllerConfig, Option<MotorConfig>)>,
    parallel: bool,
    output: Option<PathBuf>,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    /// Empty builder with default motor settings, running in parallel.
    #[must_use]
    pub fn new() -> Self {
        Self {
            motor: MotorConfig::default(),
            runs: Vec::new(),
            parallel: true,
            output: None,
        }
    }

    /// Replace the shared motor settings.
    #[must_use]
    pub const fn with_motor(mut self, motor: MotorConfig) -> Self {
        self.motor = motor;
        self
    }

    #[must_use]
    pub const fn with_target_rpm(mut self, target_rpm: f64) -> Self {
        self.motor.target_rpm = target_rpm;
        self
    }

    #[must_use]
    pub const fn with_iterations_limit(mut self, limit: u32) -> Self {
        self.motor.iterations_limit = limit;
        self
    }

    #[must_use]
    pub const fn with_sample_point(mut self, sample_point: SamplePoint) -> Self {
        self.motor.sample_point = sample_point;
        self
    }

    /// Add a run using the shared motor settings.
    #[must_use]
    pub fn with_run(mut self, name: impl Into<String>, controller: ControllerConfig) -> Self {
        self.runs.push((name.into(), controller, None));
        self
    }

    /// Add a run with its own motor settings.
    #[must_use]
    pub fn with_run_config(mut self, run: RunConfig) -> Self {
        self.runs.push((run.name, run.controller, Some(run.motor)));
        self
    }

    /// Add the bang-bang, PID and fuzzy PID comparison runs.
    #[must_use]
    pub fn with_standard_runs(mut self) -> Self {
        let standard = ScenarioConfig::standard(0.0, 1);
        for run in standard.runs {
            self.runs.push((run.name, run.controller, None));
        }
        self
    }

    #[must_use]
    pub const fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    #[must_use]
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Assemble and validate the scenario.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from [`ScenarioConfig::validate`].
    pub fn build(self) -> Result<ScenarioConfig, ConfigError> {
        let defaults = ScenarioConfig::standard(self.motor.target_rpm, self.motor.iterations_limit);
        let runs = self
            .runs
            .into_iter()
            .map(|(name, controller, motor)| {
                RunConfig::new(name, controller, motor.unwrap_or_else(|| self.motor.clone()))
            })
            .collect();
        let config = ScenarioConfig {
            parallel: self.parallel,
            output: self.output.unwrap_or(defaults.output),
            runs,
        };
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
    use rotorsim_core::config::PidGains;
    use rotorsim_test_utils::reference_motor;

    #[test]
    fn standard_runs_match_standard_scenario() {
        let built = ScenarioBuilder::new()
            .with_standard_runs()
            .with_target_rpm(70.0)
            .with_iterations_limit(20)
            .build()
            .unwrap();
        assert_eq!(built, ScenarioConfig::standard(70.0, 20));
    }

    #[test]
    fn motor_settings_apply_regardless_of_order() {
        let built = ScenarioBuilder::new()
            .with_run("simple_motor", ControllerConfig::Simple)
            .with_target_rpm(55.0)
            .build()
            .unwrap();
        assert!((built.runs[0].motor.target_rpm - 55.0).abs() < f64::EPSILON);
    }

    #[test]
    fn run_config_keeps_its_own_motor() {
        let own = reference_motor().with_target_rpm(10.0);
        let built = ScenarioBuilder::new()
            .with_target_rpm(90.0)
            .with_run_config(RunConfig::new("own", ControllerConfig::Simple, own.clone()))
            .with_run("shared", ControllerConfig::Pid(PidGains::default()))
            .build()
            .unwrap();
        assert_eq!(built.runs[0].motor, own);
        assert!((built.runs[1].motor.target_rpm - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sequential_and_output() {
        let built = ScenarioBuilder::new()
            .with_run("a", ControllerConfig::Simple)
            .sequential()
            .with_output("out.json")
            .build()
            .unwrap();
        assert!(!built.parallel);
        assert_eq!(built.output, PathBuf::from("out.json"));
    }

    #[test]
    fn duplicate_names_rejected() {
        let err = ScenarioBuilder::new()
            .with_run("a", ControllerConfig::Simple)
            .with_run("a", ControllerConfig::FuzzyPid)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateRunName(name) if name == "a"));
    }

    #[test]
    fn no_runs_rejected() {
        assert!(matches!(
            ScenarioBuilder::new().build().unwrap_err(),
            ConfigError::EmptyScenario
        ));
    }
}
