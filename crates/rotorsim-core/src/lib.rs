// rotorsim-core: errors, configuration and history types shared by the rotorsim crates.

pub mod config;
pub mod error;
pub mod history;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::{
        ControllerConfig, MotorConfig, PidGains, RunConfig, SamplePoint, ScenarioConfig,
    };
    pub use crate::error::{ConfigError, FuzzyError, RecordError, RotorsimError};
    pub use crate::history::{History, RunHistories, display_label};
}
