//! Scenario-level driver for rotorsim.
//!
//! [`run_scenario`] builds every run in a [`ScenarioConfig`], executes them
//! (one scoped thread per run unless the scenario is sequential) and returns
//! a [`ScenarioReport`] holding each run's history and [`RunStats`].
//!
//! # Example
//!
//! ```
//! use rotorsim_core::config::ScenarioConfig;
//! use rotorsim_sim::run_scenario;
//!
//! let report = run_scenario(&ScenarioConfig::standard(70.0, 20))?;
//! let histories = report.histories();
//! assert_eq!(histories.len(), 3);
//! # Ok::<(), rotorsim_core::error::RotorsimError>(())
//! ```
//!
//! [`ScenarioConfig`]: rotorsim_core::config::ScenarioConfig

pub mod builder;
pub mod harness;
pub mod stats;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use builder::ScenarioBuilder;
pub use harness::{RunReport, ScenarioReport, run_scenario};
pub use stats::RunStats;
