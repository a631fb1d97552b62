//! Discretized universes of discourse.

use rotorsim_core::error::FuzzyError;

/// Evenly spaced samples over a half-open interval `[start, stop)`.
///
/// Built the way `arange` builds ranges: `n = ceil((stop - start) / step)`
/// samples, sample `i` at `start + i * step`. `stop` itself is never a
/// sample: `arange(0.01, 0.1, 0.01)` yields nine samples ending at 0.09.
///
/// `lo` and `hi` are the first and last samples, not `start` and `stop`.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    samples: Vec<f64>,
    step: f64,
}

impl Universe {
    /// Build a universe over `[start, stop)` with the given `step`.
    ///
    /// Fails with [`FuzzyError::InvalidStep`] for a non-finite or
    /// non-positive step and [`FuzzyError::ZeroWidthUniverse`] when fewer
    /// than two samples would result.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        clippy::suboptimal_flops
    )]
    pub fn arange(start: f64, stop: f64, step: f64) -> Result<Self, FuzzyError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(FuzzyError::InvalidStep(step));
        }
        let span = ((stop - start) / step).ceil();
        if !span.is_finite() || span < 2.0 {
            return Err(FuzzyError::ZeroWidthUniverse { start, stop, step });
        }
        let count = span as usize;
        // Plain multiply-add: a fused mul_add rounds differently.
        let samples = (0..count).map(|i| start + i as f64 * step).collect();
        Ok(Self { samples, step })
    }

    /// Lowest sample.
    pub fn lo(&self) -> f64 {
        self.samples[0]
    }

    /// Highest sample.
    pub fn hi(&self) -> f64 {
        self.samples[self.samples.len() - 1]
    }

    /// `(lo + hi) / 2`, the neutral output used when inference is undefined.
    pub fn midpoint(&self) -> f64 {
        (self.lo() + self.hi()) / 2.0
    }

    pub const fn step(&self) -> f64 {
        self.step
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples (always >= 2).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Clip `x` to `[lo, hi]`.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.lo(), self.hi())
    }

    /// `true` when `x` lies within `[lo, hi]`.
    pub fn contains(&self, x: f64) -> bool {
        (self.lo()..=self.hi()).contains(&x)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
