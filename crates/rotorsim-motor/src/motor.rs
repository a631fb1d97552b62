//! Rotor motor model.
//!
//! One discrete tick per control step:
//!
//! ```text
//! force        = voltage · current
//! torque       = radius · force                  (observability only)
//! acceleration = force / (mass · radius²)
//! rpm         += acceleration
//! rpm         -= rpm · slowing_factor            (every tick, even coasting)
//! ```
//!
//! [`MotorModel`] is the seam the tick loop drives; [`DcMotor`] is the
//! concrete model.

use rotorsim_core::config::MotorConfig;
use rotorsim_core::error::ConfigError;

// ---------------------------------------------------------------------------
// MotorState
// ---------------------------------------------------------------------------

/// Snapshot of the motor after a tick.
///
/// `current`, `radius`, `mass` and `slowing_factor` are fixed parameters.
/// `force`, `torque` and `acceleration` are recomputed every tick from the
/// applied voltage; only `rpm` carries over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotorState {
    pub rpm: f64,
    pub voltage: f64,
    pub current: f64,
    pub radius: f64,
    pub mass: f64,
    pub force: f64,
    pub torque: f64,
    pub acceleration: f64,
    pub slowing_factor: f64,
}

impl MotorState {
    /// Apply one tick at `voltage`. Pure: returns the next state and the
    /// rpm reached before the slowing factor was applied.
    #[must_use]
    #[allow(clippy::suboptimal_flops)]
    pub fn advance(self, voltage: f64) -> (Self, f64) {
        let force = voltage * self.current;
        let torque = self.radius * force;
        let acceleration = force / (self.mass * self.radius.powi(2));
        let before_drag = self.rpm + acceleration;
        let rpm = before_drag - before_drag * self.slowing_factor;
        (
            Self {
                rpm,
                voltage,
                force,
                torque,
                acceleration,
                ..self
            },
            before_drag,
        )
    }
}

// ---------------------------------------------------------------------------
// MotorTick
// ---------------------------------------------------------------------------

/// What one tick produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotorTick {
    /// rpm after acceleration, before the slowing factor.
    pub before_drag: f64,
    /// rpm at the end of the tick.
    pub after_drag: f64,
}

// ---------------------------------------------------------------------------
// MotorModel trait
// ---------------------------------------------------------------------------

/// Anything the tick loop can drive with a voltage.
pub trait MotorModel: Send {
    /// Advance one tick at `voltage`.
    fn step(&mut self, voltage: f64) -> MotorTick;

    /// Current state snapshot.
    fn state(&self) -> MotorState;

    /// Current speed.
    fn rpm(&self) -> f64 {
        self.state().rpm
    }
}

// ---------------------------------------------------------------------------
// DcMotor
// ---------------------------------------------------------------------------

/// Validated motor: `mass` and `radius` are strictly positive, so the
/// acceleration denominator is never zero.
#[derive(Clone, Debug)]
pub struct DcMotor {
    state: MotorState,
}

impl DcMotor {
    /// Create a motor at rest voltage with the given parameters.
    pub fn new(
        initial_rpm: f64,
        current: f64,
        radius: f64,
        mass: f64,
        slowing_factor: f64,
    ) -> Result<Self, ConfigError> {
        for (field, value) in [("mass", mass), ("radius", radius)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("initial_rpm", initial_rpm),
            ("current", current),
            ("slowing_factor", slowing_factor),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        Ok(Self {
            state: MotorState {
                rpm: initial_rpm,
                voltage: 0.0,
                current,
                radius,
                mass,
                force: 0.0,
                torque: 0.0,
                acceleration: 0.0,
                slowing_factor,
            },
        })
    }

    /// Create from a run's motor configuration. The configured `voltage` is
    /// the bang-bang supply level, not an initial state, so the motor starts
    /// with zero applied voltage.
    pub fn from_config(config: &MotorConfig) -> Result<Self, ConfigError> {
        Self::new(
            config.initial_rpm,
            config.current,
            config.radius,
            config.mass,
            config.slowing_factor,
        )
    }
}

impl MotorModel for DcMotor {
    fn step(&mut self, voltage: f64) -> MotorTick {
        let (next, before_drag) = self.state.advance(voltage);
        self.state = next;
        MotorTick {
            before_drag,
            after_drag: next.rpm,
        }
    }

    fn state(&self) -> MotorState {
        self.state
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
