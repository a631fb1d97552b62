//! DC motor simulation under closed-loop speed control.
//!
//! - [`motor`]: the discrete motor model and the [`MotorModel`](motor::MotorModel) seam
//! - [`control`]: bang-bang, PID and fuzzy-scheduled PID control laws
//! - [`tick`]: the fixed-step loop tying a law to a motor, with per-tick observers
//!
//! # Example
//!
//! ```
//! use rotorsim_core::config::{ControllerConfig, MotorConfig, RunConfig};
//! use rotorsim_motor::prelude::*;
//!
//! let motor = MotorConfig::default().with_target_rpm(70.0);
//! let run = RunConfig::new("simple_motor", ControllerConfig::Simple, motor);
//! let outcome = Simulation::from_config(&run)?.run();
//! assert_eq!(outcome.history.len(), 20);
//! # Ok::<(), rotorsim_core::error::RotorsimError>(())
//! ```

pub mod control;
pub mod motor;
pub mod tick;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::control::{ControlLaw, ControlOutput, ControlState, FuzzyPid};
    pub use crate::motor::{DcMotor, MotorModel, MotorState, MotorTick};
    pub use crate::tick::{NoopObserver, RunOutcome, Simulation, TickObserver, TickSample};
}
