use thiserror::Error;

/// Top-level error type for rotorsim.
#[derive(Debug, Error)]
pub enum RotorsimError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fuzzy inference error: {0}")]
    Fuzzy(#[from] FuzzyError),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),
}

/// Configuration errors for motors, controllers and scenario files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid {field}: {value} (must be > 0)")]
    NonPositive { field: &'static str, value: f64 },

    #[error("Invalid {field}: {value} (must be finite)")]
    NonFinite { field: &'static str, value: f64 },

    #[error("iterations_limit must be at least 1")]
    ZeroIterations,

    #[error("Scenario has no runs")]
    EmptyScenario,

    #[error("Duplicate run name: {0}")]
    DuplicateRunName(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Fuzzy system errors.
///
/// Everything except [`FuzzyError::DefuzzificationUndefined`] is a
/// construction-time configuration failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    #[error("Malformed triangle ({a}, {b}, {c}): expected a <= b <= c")]
    MalformedTriangle { a: f64, b: f64, c: f64 },

    #[error("Triangle ({a}, {b}, {c}) contains a non-finite vertex")]
    NonFiniteTriangle { a: f64, b: f64, c: f64 },

    #[error("Invalid universe step: {0} (must be finite and > 0)")]
    InvalidStep(f64),

    #[error("Zero-width universe [{start}, {stop}) with step {step}")]
    ZeroWidthUniverse { start: f64, stop: f64, step: f64 },

    #[error("Duplicate label '{label}' on variable '{variable}'")]
    DuplicateLabel { variable: String, label: String },

    #[error("Unknown label '{label}' on variable '{variable}'")]
    UnknownLabel { variable: String, label: String },

    #[error("Rule base is empty")]
    EmptyRuleBase,

    #[error("Aggregated output of '{variable}' is zero everywhere (fallback {fallback})")]
    DefuzzificationUndefined { variable: String, fallback: f64 },
}

impl FuzzyError {
    /// `true` for errors raised while building a fuzzy system.
    pub const fn is_configuration(&self) -> bool {
        !matches!(self, Self::DefuzzificationUndefined { .. })
    }
}

/// History persistence errors.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run '{run}' sample {index} is {value}, which JSON cannot represent")]
    NonFiniteSample { run: String, index: usize, value: f64 },
}
