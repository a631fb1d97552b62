//! Control laws: bang-bang, PID and fuzzy-scheduled PID.
//!
//! All three share one [`ControlState`] threaded through the tick loop.
//! Neither the integral nor the derivative is scaled by a timestep; the loop
//! runs at a fixed, unit step.

use rotorsim_core::config::{ControllerConfig, MotorConfig, PidGains};
use rotorsim_core::error::FuzzyError;
use rotorsim_fuzzy::presets::FuzzyGainController;

// ---------------------------------------------------------------------------
// ControlState
// ---------------------------------------------------------------------------

/// Loop state carried from one tick to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ControlState {
    /// Ticks completed so far. Only ever increases.
    pub iterations_done: u32,
    /// Speed at the end of the last tick.
    pub rpm: f64,
    /// Sum of all errors seen by a PID law.
    pub integral: f64,
    /// Error seen by a PID law on the previous tick.
    pub last_error: f64,
}

impl ControlState {
    pub const fn new(initial_rpm: f64) -> Self {
        Self {
            iterations_done: 0,
            rpm: initial_rpm,
            integral: 0.0,
            last_error: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// ControlOutput
// ---------------------------------------------------------------------------

/// Voltage for this tick plus the gains that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlOutput {
    pub voltage: f64,
    /// Gains in effect; `None` for the bang-bang law.
    pub gains: Option<PidGains>,
    /// Number of fuzzy gains (0–2) that fell back to the universe midpoint.
    pub fuzzy_fallbacks: u8,
}

// ---------------------------------------------------------------------------
// FuzzyPid
// ---------------------------------------------------------------------------

/// PID whose `k_p` and `k_i` are looked up from the tracking error each
/// tick. The derivative channel is disabled (`k_d = 0`).
#[derive(Clone, Debug)]
pub struct FuzzyPid {
    proportional: FuzzyGainController,
    integral: FuzzyGainController,
}

impl FuzzyPid {
    pub fn new() -> Result<Self, FuzzyError> {
        Ok(Self {
            proportional: FuzzyGainController::proportional()?,
            integral: FuzzyGainController::integral()?,
        })
    }

    /// Schedule gains with caller-supplied controllers.
    pub const fn with_controllers(
        proportional: FuzzyGainController,
        integral: FuzzyGainController,
    ) -> Self {
        Self {
            proportional,
            integral,
        }
    }

    pub const fn proportional(&self) -> &FuzzyGainController {
        &self.proportional
    }

    pub const fn integral(&self) -> &FuzzyGainController {
        &self.integral
    }
}

// ---------------------------------------------------------------------------
// ControlLaw
// ---------------------------------------------------------------------------

/// Closed set of control strategies.
#[derive(Clone, Debug)]
pub enum ControlLaw {
    /// Full `voltage` while below target, zero at or above it.
    BangBang { voltage: f64 },
    /// Fixed-gain PID.
    Pid(PidGains),
    /// Fuzzy gain-scheduled PID.
    FuzzyPid(Box<FuzzyPid>),
}

impl ControlLaw {
    /// Build the law a run is configured with. The bang-bang level comes
    /// from the motor's configured voltage.
    pub fn from_config(
        controller: &ControllerConfig,
        motor: &MotorConfig,
    ) -> Result<Self, FuzzyError> {
        Ok(match controller {
            ControllerConfig::Simple => Self::BangBang {
                voltage: motor.voltage,
            },
            ControllerConfig::Pid(gains) => Self::Pid(*gains),
            ControllerConfig::FuzzyPid => Self::FuzzyPid(Box::new(FuzzyPid::new()?)),
        })
    }

    /// Short name used in logs.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BangBang { .. } => "simple",
            Self::Pid(_) => "pid",
            Self::FuzzyPid(_) => "fuzzy_pid",
        }
    }

    /// Voltage for the current tick.
    ///
    /// `error` is `target - rpm`. PID laws update `state.integral` and
    /// `state.last_error`; the bang-bang law leaves the state untouched.
    pub fn compute_voltage(&mut self, error: f64, state: &mut ControlState) -> ControlOutput {
        match self {
            Self::BangBang { voltage } => ControlOutput {
                // error > 0 ⇔ rpm < target
                voltage: if error > 0.0 { *voltage } else { 0.0 },
                gains: None,
                fuzzy_fallbacks: 0,
            },
            Self::Pid(gains) => {
                let (integral, derivative) = pid_terms(error, state);
                ControlOutput {
                    voltage: pid_voltage(*gains, error, integral, derivative),
                    gains: Some(*gains),
                    fuzzy_fallbacks: 0,
                }
            }
            Self::FuzzyPid(fuzzy) => {
                let (integral, derivative) = pid_terms(error, state);
                let k_p = fuzzy.proportional.get_gain(error);
                let k_i = fuzzy.integral.get_gain(error);
                let gains = PidGains::new(k_p.value(), k_i.value(), 0.0);
                ControlOutput {
                    voltage: pid_voltage(gains, error, integral, derivative),
                    gains: Some(gains),
                    fuzzy_fallbacks: u8::from(k_p.is_fallback()) + u8::from(k_i.is_fallback()),
                }
            }
        }
    }
}

/// Accumulate the integral and compute the derivative. The first tick's
/// derivative is measured against a zero previous error.
fn pid_terms(error: f64, state: &mut ControlState) -> (f64, f64) {
    state.integral += error;
    let derivative = error - state.last_error;
    state.last_error = error;
    (state.integral, derivative)
}

#[allow(clippy::suboptimal_flops)]
fn pid_voltage(gains: PidGains, error: f64, integral: f64, derivative: f64) -> f64 {
    error * gains.k_p + integral * gains.k_i + derivative * gains.k_d
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
