//! Fixed-step tick loop driving a [`MotorModel`] with a [`ControlLaw`].
//!
//! Each tick:
//!
//! 1. `error = target_rpm - rpm`
//! 2. the control law turns the error into a voltage
//! 3. the motor advances one tick at that voltage
//! 4. one rpm sample is appended to the history
//! 5. `iterations_done` increments
//!
//! The loop always runs exactly `iterations_limit` ticks; reaching the target
//! does not end it early. Per-tick side effects go through a
//! [`TickObserver`].

use rotorsim_core::config::{RunConfig, SamplePoint};
use rotorsim_core::error::RotorsimError;
use rotorsim_core::history::History;
use tracing::{debug, info};

use crate::control::{ControlLaw, ControlOutput, ControlState};
use crate::motor::{DcMotor, MotorModel, MotorState};

// ---------------------------------------------------------------------------
// TickSample
// ---------------------------------------------------------------------------

/// Everything one tick produced, handed to observers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickSample {
    /// Zero-based tick index.
    pub tick: u32,
    /// Tracking error the control law saw.
    pub error: f64,
    pub control: ControlOutput,
    /// Motor state at the end of the tick.
    pub motor: MotorState,
    /// rpm before the slowing factor.
    pub before_drag: f64,
    /// Value appended to the history.
    pub recorded: f64,
}

// ---------------------------------------------------------------------------
// TickObserver
// ---------------------------------------------------------------------------

/// Called once per tick, after the sample has been recorded.
pub trait TickObserver {
    fn on_tick(&mut self, sample: &TickSample, state: &ControlState);
}

impl<F> TickObserver for F
where
    F: FnMut(&TickSample, &ControlState),
{
    fn on_tick(&mut self, sample: &TickSample, state: &ControlState) {
        self(sample, state);
    }
}

/// Observer that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl TickObserver for NoopObserver {
    fn on_tick(&mut self, _sample: &TickSample, _state: &ControlState) {}
}

// ---------------------------------------------------------------------------
// RunOutcome
// ---------------------------------------------------------------------------

/// Result of a completed run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    /// One sample per tick, in tick order.
    pub history: History,
    pub final_state: ControlState,
    pub motor: MotorState,
    /// Ticks on which at least one fuzzy gain fell back to its midpoint.
    pub fallback_ticks: u32,
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

/// One control law driving one motor toward a fixed target.
pub struct Simulation<M: MotorModel = DcMotor> {
    name: String,
    law: ControlLaw,
    motor: M,
    target_rpm: f64,
    iterations_limit: u32,
    sample_point: SamplePoint,
}

impl Simulation<DcMotor> {
    /// Validate `config` and build the motor and control law it describes.
    pub fn from_config(config: &RunConfig) -> Result<Self, RotorsimError> {
        config.validate()?;
        let motor = DcMotor::from_config(&config.motor)?;
        let law = ControlLaw::from_config(&config.controller, &config.motor)?;
        Ok(Self::new(
            config.name.clone(),
            law,
            motor,
            config.motor.target_rpm,
            config.motor.iterations_limit,
        )
        .with_sample_point(config.motor.sample_point))
    }
}

impl<M: MotorModel> Simulation<M> {
    pub fn new(
        name: impl Into<String>,
        law: ControlLaw,
        motor: M,
        target_rpm: f64,
        iterations_limit: u32,
    ) -> Self {
        Self {
            name: name.into(),
            law,
            motor,
            target_rpm,
            iterations_limit,
            sample_point: SamplePoint::default(),
        }
    }

    #[must_use]
    pub const fn with_sample_point(mut self, sample_point: SamplePoint) -> Self {
        self.sample_point = sample_point;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn law(&self) -> &ControlLaw {
        &self.law
    }

    pub const fn motor(&self) -> &M {
        &self.motor
    }

    pub const fn target_rpm(&self) -> f64 {
        self.target_rpm
    }

    pub const fn iterations_limit(&self) -> u32 {
        self.iterations_limit
    }

    /// Run to completion without an observer.
    pub fn run(self) -> RunOutcome {
        self.run_with(&mut NoopObserver)
    }

    /// Run to completion, calling `observer` after every tick.
    pub fn run_with(mut self, observer: &mut impl TickObserver) -> RunOutcome {
        let mut state = ControlState::new(self.motor.rpm());
        let mut history = History::with_capacity(self.iterations_limit as usize);
        let mut fallback_ticks = 0;

        info!(
            run = %self.name,
            law = self.law.name(),
            target_rpm = self.target_rpm,
            iterations = self.iterations_limit,
            "run started"
        );

        while state.iterations_done < self.iterations_limit {
            let error = self.target_rpm - state.rpm;
            let control = self.law.compute_voltage(error, &mut state);
            let tick = self.motor.step(control.voltage);
            let recorded = match self.sample_point {
                SamplePoint::AfterDrag => tick.after_drag,
                SamplePoint::BeforeDrag => tick.before_drag,
            };
            history.push(recorded);

            let sample = TickSample {
                tick: state.iterations_done,
                error,
                control,
                motor: self.motor.state(),
                before_drag: tick.before_drag,
                recorded,
            };
            state.rpm = tick.after_drag;
            state.iterations_done += 1;
            if control.fuzzy_fallbacks > 0 {
                fallback_ticks += 1;
            }

            debug!(
                run = %self.name,
                tick = sample.tick,
                error,
                voltage = control.voltage,
                rpm = sample.motor.rpm,
                force = sample.motor.force,
                torque = sample.motor.torque,
                acceleration = sample.motor.acceleration,
                k_p = control.gains.map(|g| g.k_p),
                k_i = control.gains.map(|g| g.k_i),
                "tick"
            );
            observer.on_tick(&sample, &state);
        }

        info!(
            run = %self.name,
            final_rpm = state.rpm,
            fallback_ticks,
            "run finished"
        );

        RunOutcome {
            history,
            final_state: state,
            motor: self.motor.state(),
            fallback_ticks,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
