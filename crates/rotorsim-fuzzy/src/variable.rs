//! Linguistic variables: a universe plus labeled membership functions.
//!
//! [`FuzzyVariable`] holds the shared data. [`Antecedent`] wraps it for the
//! input side (fuzzification of a crisp value), [`Consequent`] for the output
//! side (centroid defuzzification of an aggregated shape).

use indexmap::IndexMap;
use rotorsim_core::error::FuzzyError;

use crate::membership::Triangle;
use crate::universe::Universe;

// ---------------------------------------------------------------------------
// FuzzyVariable
// ---------------------------------------------------------------------------

/// Named variable with a universe and unique labels.
#[derive(Clone, Debug)]
pub struct FuzzyVariable {
    name: String,
    universe: Universe,
    terms: IndexMap<String, Triangle>,
}

impl FuzzyVariable {
    pub fn new(name: impl Into<String>, universe: Universe) -> Self {
        Self {
            name: name.into(),
            universe,
            terms: IndexMap::new(),
        }
    }

    /// Register a labeled membership function. Labels must be unique.
    pub fn add_term(&mut self, label: impl Into<String>, shape: Triangle) -> Result<(), FuzzyError> {
        let label = label.into();
        if self.terms.contains_key(&label) {
            return Err(FuzzyError::DuplicateLabel {
                variable: self.name.clone(),
                label,
            });
        }
        self.terms.insert(label, shape);
        Ok(())
    }

    /// Builder form of [`add_term`](Self::add_term).
    pub fn with_term(mut self, label: impl Into<String>, shape: Triangle) -> Result<Self, FuzzyError> {
        self.add_term(label, shape)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn term(&self, label: &str) -> Option<&Triangle> {
        self.terms.get(label)
    }

    /// Position of `label` in registration order.
    pub(crate) fn term_index(&self, label: &str) -> Result<usize, FuzzyError> {
        self.terms
            .get_index_of(label)
            .ok_or_else(|| FuzzyError::UnknownLabel {
                variable: self.name.clone(),
                label: label.to_owned(),
            })
    }

    pub(crate) fn term_at(&self, index: usize) -> &Triangle {
        &self.terms[index]
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// Degree of every label at `x`, in registration order.
    pub fn fuzzify(&self, x: f64) -> IndexMap<String, f64> {
        self.terms
            .iter()
            .map(|(label, shape)| (label.clone(), shape.degree(x)))
            .collect()
    }

    /// The membership function for `label` evaluated at every universe sample.
    pub fn sampled(&self, label: &str) -> Option<Vec<f64>> {
        let shape = self.terms.get(label)?;
        Some(self.universe.samples().iter().map(|&x| shape.degree(x)).collect())
    }
}

// ---------------------------------------------------------------------------
// Antecedent
// ---------------------------------------------------------------------------

/// Input-side variable.
///
/// By default crisp inputs are clipped to `[lo, hi]` of the universe before
/// fuzzification, so an out-of-range input behaves like the nearest edge.
#[derive(Clone, Debug)]
pub struct Antecedent {
    variable: FuzzyVariable,
    clip_to_bounds: bool,
}

impl Antecedent {
    pub const fn new(variable: FuzzyVariable) -> Self {
        Self {
            variable,
            clip_to_bounds: true,
        }
    }

    /// Evaluate inputs as given instead of clipping them to the universe.
    #[must_use]
    pub const fn with_clip_to_bounds(mut self, clip: bool) -> Self {
        self.clip_to_bounds = clip;
        self
    }

    pub const fn variable(&self) -> &FuzzyVariable {
        &self.variable
    }

    pub const fn clips_to_bounds(&self) -> bool {
        self.clip_to_bounds
    }

    /// The value actually fed to the membership functions.
    pub fn effective_input(&self, x: f64) -> f64 {
        if self.clip_to_bounds {
            self.variable.universe.clamp(x)
        } else {
            x
        }
    }

    /// Degree of every label at `x`.
    pub fn fuzzify(&self, x: f64) -> IndexMap<String, f64> {
        self.variable.fuzzify(self.effective_input(x))
    }

    pub(crate) fn degree_at(&self, index: usize, x: f64) -> f64 {
        self.variable.term_at(index).degree(self.effective_input(x))
    }
}

// ---------------------------------------------------------------------------
// Consequent
// ---------------------------------------------------------------------------

/// Output-side variable.
#[derive(Clone, Debug)]
pub struct Consequent {
    variable: FuzzyVariable,
}

impl Consequent {
    pub const fn new(variable: FuzzyVariable) -> Self {
        Self { variable }
    }

    pub const fn variable(&self) -> &FuzzyVariable {
        &self.variable
    }

    /// Discrete centroid `Σ(yᵢ·μᵢ) / Σμᵢ` of an aggregated shape sampled on
    /// this variable's universe.
    ///
    /// Returns [`FuzzyError::DefuzzificationUndefined`] carrying the
    /// universe midpoint when the shape is zero everywhere.
    ///
    /// # Panics
    ///
    /// Panics if `shape` is not the same length as the universe.
    pub fn defuzzify(&self, shape: &[f64]) -> Result<f64, FuzzyError> {
        self.centroid(shape)
            .ok_or_else(|| FuzzyError::DefuzzificationUndefined {
                variable: self.variable.name.clone(),
                fallback: self.variable.universe.midpoint(),
            })
    }

    /// Centroid of `shape`, or `None` when the shape is zero everywhere.
    ///
    /// # Panics
    ///
    /// Panics if `shape` is not the same length as the universe.
    pub fn centroid(&self, shape: &[f64]) -> Option<f64> {
        let universe = &self.variable.universe;
        assert_eq!(
            shape.len(),
            universe.len(),
            "aggregated shape must be sampled on the output universe"
        );

        let (numerator, denominator) = universe
            .samples()
            .iter()
            .zip(shape)
            .fold((0.0, 0.0), |(num, den), (&y, &mu)| (y.mul_add(mu, num), den + mu));

        (denominator > 0.0).then_some(numerator / denominator)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
