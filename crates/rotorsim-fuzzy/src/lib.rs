//! Mamdani fuzzy inference for gain scheduling.
//!
//! Pure Rust, no simulation dependencies. Provides triangular membership
//! functions over discretized universes, single-antecedent rules, an
//! inference engine with min-implication, max-aggregation and centroid
//! defuzzification, and the two preconfigured gain controllers used by the
//! fuzzy PID control law.
//!
//! # Quick Start
//!
//! ```
//! use rotorsim_fuzzy::prelude::*;
//!
//! let mut kp = FuzzyGainController::proportional()?;
//! let mut ki = FuzzyGainController::integral()?;
//!
//! let error = 70.0;
//! let p = kp.get_gain(error).value();
//! let i = ki.get_gain(error).value();
//! assert!(p > 0.0 && i > 0.0);
//! # Ok::<(), rotorsim_core::error::FuzzyError>(())
//! ```

pub mod engine;
pub mod membership;
pub mod presets;
pub mod rule;
pub mod universe;
pub mod variable;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::engine::{Inference, InferenceEngine};
    pub use crate::membership::Triangle;
    pub use crate::presets::{FuzzyGainController, GainKind};
    pub use crate::rule::{Rule, RuleBase};
    pub use crate::universe::Universe;
    pub use crate::variable::{Antecedent, Consequent, FuzzyVariable};
}
