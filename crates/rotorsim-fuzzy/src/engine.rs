//! Mamdani inference engine.
//!
//! # Pipeline
//!
//! ```text
//! crisp x ─► fuzzify (antecedent) ─► firing strength per rule
//!         ─► clip consequent shape at strength (min)
//!         ─► aggregate across rules (pointwise max)
//!         ─► centroid over output universe ─► crisp y
//! ```
//!
//! Each call is independent. The only retained state is the last result,
//! kept for inspection.

use rotorsim_core::error::FuzzyError;
use tracing::warn;

use crate::rule::{Rule, RuleBase};
use crate::variable::{Antecedent, Consequent};

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

/// Result of a recovering inference call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Inference {
    /// Centroid of a non-empty aggregated shape.
    Centroid(f64),
    /// No rule fired; the output universe midpoint was substituted.
    Fallback(f64),
}

impl Inference {
    /// The crisp output, whichever way it was obtained.
    pub const fn value(self) -> f64 {
        match self {
            Self::Centroid(v) | Self::Fallback(v) => v,
        }
    }

    pub const fn is_fallback(self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

// ---------------------------------------------------------------------------
// InferenceEngine
// ---------------------------------------------------------------------------

/// One input variable, one output variable and a bound rule base.
#[derive(Clone, Debug)]
pub struct InferenceEngine {
    antecedent: Antecedent,
    consequent: Consequent,
    rules: RuleBase,
    last: Option<Inference>,
}

impl InferenceEngine {
    /// Bind `rules` to the variables. Fails on an empty rule base or an
    /// unknown label; no partially-built engine is returned.
    pub fn new(
        antecedent: Antecedent,
        consequent: Consequent,
        rules: Vec<Rule>,
    ) -> Result<Self, FuzzyError> {
        let rules = RuleBase::bind(rules, &antecedent, &consequent)?;
        Ok(Self {
            antecedent,
            consequent,
            rules,
            last: None,
        })
    }

    pub const fn antecedent(&self) -> &Antecedent {
        &self.antecedent
    }

    pub const fn consequent(&self) -> &Consequent {
        &self.consequent
    }

    pub const fn rules(&self) -> &RuleBase {
        &self.rules
    }

    /// Output of the most recent successful or recovered call.
    pub const fn last_output(&self) -> Option<Inference> {
        self.last
    }

    /// Aggregated output shape for `x`: the pointwise maximum of every rule's
    /// clipped consequent, sampled over the output universe.
    pub fn aggregate(&self, x: f64) -> Vec<f64> {
        let mut shape = vec![0.0_f64; self.consequent.variable().universe().len()];
        for rule in self.rules.bound() {
            let strength = rule.firing_strength(&self.antecedent, x);
            if strength <= 0.0 {
                continue;
            }
            for (acc, clipped) in shape.iter_mut().zip(rule.clipped(&self.consequent, strength)) {
                *acc = acc.max(clipped);
            }
        }
        shape
    }

    /// Infer without recovery: an all-zero aggregate is reported as
    /// [`FuzzyError::DefuzzificationUndefined`].
    pub fn try_infer(&mut self, x: f64) -> Result<f64, FuzzyError> {
        let value = self.consequent.defuzzify(&self.aggregate(x))?;
        self.last = Some(Inference::Centroid(value));
        Ok(value)
    }

    /// Infer, substituting the output universe midpoint when no rule fires.
    pub fn infer(&mut self, x: f64) -> Inference {
        let inference = match self.consequent.centroid(&self.aggregate(x)) {
            Some(value) => Inference::Centroid(value),
            None => {
                let variable = self.consequent.variable();
                let fallback = variable.universe().midpoint();
                warn!(
                    input = x,
                    variable = variable.name(),
                    fallback,
                    "no rule fired, using universe midpoint"
                );
                Inference::Fallback(fallback)
            }
        };
        self.last = Some(inference);
        inference
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
