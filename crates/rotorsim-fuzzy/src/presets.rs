//! Gain-scheduling controllers built on fixed fuzzy configurations.
//!
//! Both controllers share the error antecedent and differ only in the output
//! universe and its membership placement.
//!
//! | Controller   | Output universe          | Rules (error → gain)                      |
//! |--------------|--------------------------|-------------------------------------------|
//! | Proportional | `arange(0, 3, 0.5)`      | small→large, medium→small, large→small    |
//! | Integral     | `arange(0.01, 0.1, 0.01)`| small→small, medium→medium, large→large   |

use rotorsim_core::error::FuzzyError;

use crate::engine::{Inference, InferenceEngine};
use crate::membership::Triangle;
use crate::rule::Rule;
use crate::universe::Universe;
use crate::variable::{Antecedent, Consequent, FuzzyVariable};

/// Labeled triangle as `(label, [a, b, c])`.
pub type TermSpec = (&'static str, [f64; 3]);

/// Error antecedent shared by both controllers.
pub mod error {
    use super::TermSpec;

    pub const START: f64 = 0.0;
    pub const STOP: f64 = 100.0;
    pub const STEP: f64 = 1.0;

    pub const TERMS: [TermSpec; 3] = [
        ("small", [0.0, 0.0, 30.0]),
        ("medium", [10.0, 40.0, 80.0]),
        ("large", [60.0, 100.0, 100.0]),
    ];
}

/// Proportional gain consequent.
pub mod proportional {
    use super::TermSpec;

    pub const START: f64 = 0.0;
    pub const STOP: f64 = 3.0;
    pub const STEP: f64 = 0.5;

    pub const TERMS: [TermSpec; 2] = [("small", [0.0, 0.0, 2.0]), ("large", [1.0, 3.0, 3.0])];

    /// Defined alongside the live terms but never registered on the
    /// consequent and never referenced by a rule.
    pub const UNUSED_TERMS: [TermSpec; 1] = [("medium", [0.5, 1.5, 2.5])];

    pub const RULES: [(&str, &str); 3] = [("small", "large"), ("medium", "small"), ("large", "small")];
}

/// Integral gain consequent.
pub mod integral {
    use super::TermSpec;

    pub const START: f64 = 0.01;
    pub const STOP: f64 = 0.1;
    pub const STEP: f64 = 0.01;

    pub const TERMS: [TermSpec; 3] = [
        ("small", [0.0, 0.0, 0.04]),
        ("medium", [0.02, 0.06, 0.1]),
        ("large", [0.08, 0.1, 0.1]),
    ];

    pub const RULES: [(&str, &str); 3] = [("small", "small"), ("medium", "medium"), ("large", "large")];
}

fn variable(
    name: &str,
    (start, stop, step): (f64, f64, f64),
    terms: &[TermSpec],
) -> Result<FuzzyVariable, FuzzyError> {
    let mut var = FuzzyVariable::new(name, Universe::arange(start, stop, step)?);
    for &(label, vertices) in terms {
        var.add_term(label, Triangle::try_from(vertices)?)?;
    }
    Ok(var)
}

fn error_antecedent() -> Result<Antecedent, FuzzyError> {
    variable("error", (error::START, error::STOP, error::STEP), &error::TERMS).map(Antecedent::new)
}

// ---------------------------------------------------------------------------
// GainKind
// ---------------------------------------------------------------------------

/// Which PID term a [`FuzzyGainController`] schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GainKind {
    Proportional,
    Integral,
}

// ---------------------------------------------------------------------------
// FuzzyGainController
// ---------------------------------------------------------------------------

/// Maps a signed tracking error to a gain through a fixed inference engine.
#[derive(Clone, Debug)]
pub struct FuzzyGainController {
    kind: GainKind,
    engine: InferenceEngine,
}

impl FuzzyGainController {
    /// Proportional-gain controller. Small errors get the large gain.
    pub fn proportional() -> Result<Self, FuzzyError> {
        let consequent = variable(
            "gain",
            (proportional::START, proportional::STOP, proportional::STEP),
            &proportional::TERMS,
        )?;
        Self::build(GainKind::Proportional, consequent, &proportional::RULES)
    }

    /// Integral-gain controller. Gain grows with the error.
    pub fn integral() -> Result<Self, FuzzyError> {
        let consequent = variable(
            "gain",
            (integral::START, integral::STOP, integral::STEP),
            &integral::TERMS,
        )?;
        Self::build(GainKind::Integral, consequent, &integral::RULES)
    }

    /// Wrap a custom engine. Its input is the tracking error and its output
    /// the gain.
    pub const fn from_engine(kind: GainKind, engine: InferenceEngine) -> Self {
        Self { kind, engine }
    }

    fn build(
        kind: GainKind,
        consequent: FuzzyVariable,
        rules: &[(&str, &str)],
    ) -> Result<Self, FuzzyError> {
        let rules = rules.iter().map(|&(a, c)| Rule::new(a, c)).collect();
        let engine = InferenceEngine::new(error_antecedent()?, Consequent::new(consequent), rules)?;
        Ok(Self { kind, engine })
    }

    pub const fn kind(&self) -> GainKind {
        self.kind
    }

    pub const fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Gain for `error`. Errors outside `[0, 99]` are clipped to that range
    /// by the antecedent, so negative errors behave like zero error.
    pub fn get_gain(&mut self, error: f64) -> Inference {
        self.engine.infer(error)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
