//! Scenario harness: build every run, execute them and collect the results.
//!
//! All simulations are constructed before any of them runs, so a bad run
//! configuration fails the whole scenario up front. Runs share no state;
//! in parallel mode each gets its own scoped thread and results are still
//! reported in the order the runs were listed.

use std::thread;

use rotorsim_core::config::ScenarioConfig;
use rotorsim_core::error::RotorsimError;
use rotorsim_core::history::RunHistories;
use rotorsim_motor::motor::MotorModel;
use rotorsim_motor::tick::{RunOutcome, Simulation};
use tracing::info;

use crate::stats::RunStats;

// ---------------------------------------------------------------------------
// RunReport
// ---------------------------------------------------------------------------

/// One finished run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub name: String,
    pub target_rpm: f64,
    pub outcome: RunOutcome,
    /// `None` only for a run with no ticks, which validation rejects.
    pub stats: Option<RunStats>,
}

impl RunReport {
    /// Run `sim` to completion and summarize it.
    pub fn from_simulation<M: MotorModel>(sim: Simulation<M>) -> Self {
        let name = sim.name().to_owned();
        let target_rpm = sim.target_rpm();
        let outcome = sim.run();
        let stats = RunStats::compute(&outcome.history, target_rpm, outcome.fallback_ticks);
        Self {
            name,
            target_rpm,
            outcome,
            stats,
        }
    }
}

// ---------------------------------------------------------------------------
// ScenarioReport
// ---------------------------------------------------------------------------

/// Every run of a scenario, in configuration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenarioReport {
    pub runs: Vec<RunReport>,
}

impl ScenarioReport {
    /// Histories keyed by run name, in run order.
    pub fn histories(&self) -> RunHistories {
        self.runs
            .iter()
            .map(|run| (run.name.clone(), run.outcome.history.clone()))
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&RunReport> {
        self.runs.iter().find(|run| run.name == name)
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Validate `config`, then run every simulation it lists.
pub fn run_scenario(config: &ScenarioConfig) -> Result<ScenarioReport, RotorsimError> {
    config.validate()?;
    let sims = config
        .runs
        .iter()
        .map(Simulation::from_config)
        .collect::<Result<Vec<_>, _>>()?;

    info!(runs = sims.len(), parallel = config.parallel, "scenario started");
    let runs = if config.parallel {
        run_parallel(sims)
    } else {
        sims.into_iter().map(RunReport::from_simulation).collect()
    };
    Ok(ScenarioReport { runs })
}

fn run_parallel(sims: Vec<Simulation>) -> Vec<RunReport> {
    thread::scope(|scope| {
        let handles: Vec<_> = sims
            .into_iter()
            .map(|sim| scope.spawn(move || RunReport::from_simulation(sim)))
            .collect();
        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(report) => report,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}


// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rotorsim_core::config::{ControllerConfig, RunConfig};
    use rotorsim_core::error::ConfigError;
    use rotorsim_test_utils::reference_motor;

    #[test]
    fn standard_scenario_reports_three_runs_in_order() {
        let report = run_scenario(&ScenarioConfig::standard(70.0, 20)).unwrap();
        let names: Vec<_> = report.runs.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["simple_motor", "pid_motor", "fuzzy_pid_motor"]);
        assert!(report.runs.iter().all(|r| r.outcome.history.len() == 20));
        assert!(report.runs.iter().all(|r| r.stats.is_some()));
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let mut config = ScenarioConfig::standard(70.0, 20);
        let parallel = run_scenario(&config).unwrap();
        config.parallel = false;
        let sequential = run_scenario(&config).unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn histories_keep_run_order() {
        let report = run_scenario(&ScenarioConfig::standard(70.0, 5)).unwrap();
        let histories = report.histories();
        assert_eq!(
            histories.names().collect::<Vec<_>>(),
            ["simple_motor", "pid_motor", "fuzzy_pid_motor"]
        );
        assert_eq!(histories.get("pid_motor"), Some(&report.runs[1].outcome.history));
    }

    #[test]
    fn invalid_run_fails_before_any_run() {
        let mut config = ScenarioConfig::standard(70.0, 20);
        config.runs.push(RunConfig::new(
            "broken",
            ControllerConfig::Simple,
            reference_motor().with_iterations_limit(0),
        ));
        let err = run_scenario(&config).unwrap_err();
        assert!(matches!(err, RotorsimError::Config(ConfigError::ZeroIterations)));
    }

    #[test]
    fn empty_scenario_rejected() {
        let config = ScenarioConfig {
            runs: Vec::new(),
            ..ScenarioConfig::standard(70.0, 20)
        };
        assert!(matches!(
            run_scenario(&config),
            Err(RotorsimError::Config(ConfigError::EmptyScenario))
        ));
    }

    #[test]
    fn report_lookup_by_name() {
        let report = run_scenario(&ScenarioConfig::standard(70.0, 3)).unwrap();
        assert_eq!(report.len(), 3);
        assert!(!report.is_empty());
        assert!(report.get("fuzzy_pid_motor").is_some());
        assert!(report.get("nope").is_none());
    }
}
