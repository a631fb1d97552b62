//! Reference configurations and closed-form replays for simulation tests.

use rotorsim_core::config::{MotorConfig, SamplePoint};

/// `initial_rpm=0, target_rpm=70, voltage=5, current=100, radius=15,
/// mass=0.5, slowing_factor=0.1, iterations_limit=20`.
pub fn reference_motor() -> MotorConfig {
    MotorConfig::default()
        .with_target_rpm(70.0)
        .with_iterations_limit(20)
}

/// Replay the bang-bang law with straight-line arithmetic, independent of
/// the simulation crates. Used as an oracle for end-to-end histories.
#[allow(clippy::suboptimal_flops)]
pub fn replay_bang_bang(config: &MotorConfig) -> Vec<f64> {
    let mut rpm = config.initial_rpm;
    let mut samples = Vec::with_capacity(config.iterations_limit as usize);
    for _ in 0..config.iterations_limit {
        let voltage = if rpm < config.target_rpm {
            config.voltage
        } else {
            0.0
        };
        let force = voltage * config.current;
        let acceleration = force / (config.mass * config.radius.powi(2));
        rpm += acceleration;
        let before_drag = rpm;
        rpm -= rpm * config.slowing_factor;
        samples.push(match config.sample_point {
            SamplePoint::AfterDrag => rpm,
            SamplePoint::BeforeDrag => before_drag,
        });
    }
    samples
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_motor_is_valid() {
        let cfg = reference_motor();
        assert!(cfg.validate().is_ok());
        assert!((cfg.target_rpm - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn replay_first_tick() {
        let samples = replay_bang_bang(&reference_motor());
        assert_eq!(samples.len(), 20);
        // 500 / 112.5 = 4.444…, minus 10 %
        assert!((samples[0] - 4.0).abs() < 1e-12);
    }
}
