//! Triangular membership functions.

use rotorsim_core::error::FuzzyError;

/// Triangle `(a, b, c)` with `a <= b <= c`.
///
/// Degree is 0 outside `[a, c]`, rises linearly from `a` to `b`, falls
/// linearly from `b` to `c` and is exactly 1 at `b`. When `a == b` (or
/// `b == c`) the rising (or falling) edge is dropped, giving a shoulder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangle {
    /// Create a triangle, rejecting unordered or non-finite vertices.
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, FuzzyError> {
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(FuzzyError::NonFiniteTriangle { a, b, c });
        }
        if a > b || b > c {
            return Err(FuzzyError::MalformedTriangle { a, b, c });
        }
        Ok(Self { a, b, c })
    }

    /// Membership degree of `x`, always in `[0, 1]`. NaN has degree 0.
    #[allow(clippy::float_cmp)]
    pub fn degree(&self, x: f64) -> f64 {
        let Self { a, b, c } = *self;
        if !(a..=c).contains(&x) {
            return 0.0;
        }
        if x == b {
            return 1.0;
        }
        let degree = if x < b {
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        };
        degree.clamp(0.0, 1.0)
    }

    /// Vertices as `[a, b, c]`.
    pub const fn vertices(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    /// Closed interval where the degree can be non-zero.
    pub const fn support(&self) -> (f64, f64) {
        (self.a, self.c)
    }

    /// Peak location (degree 1).
    pub const fn peak(&self) -> f64 {
        self.b
    }
}

impl TryFrom<[f64; 3]> for Triangle {
    type Error = FuzzyError;

    fn try_from([a, b, c]: [f64; 3]) -> Result<Self, Self::Error> {
        Self::new(a, b, c)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
