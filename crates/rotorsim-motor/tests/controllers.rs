//! End-to-end runs of the three control laws against the reference motor.

use approx::assert_relative_eq;
use rotorsim_core::config::{ControllerConfig, PidGains, RunConfig};
use rotorsim_motor::prelude::*;
use rotorsim_test_utils::{reference_motor, replay_bang_bang};

fn run(name: &str, controller: ControllerConfig) -> RunOutcome {
    Simulation::from_config(&RunConfig::new(name, controller, reference_motor()))
        .unwrap()
        .run()
}

#[test]
fn simple_motor_reference_history() {
    let outcome = run("simple_motor", ControllerConfig::Simple);
    let samples = outcome.history.as_slice();
    assert_eq!(samples.len(), 20);

    // rpm settles toward 40 without ever reaching 70, so full voltage is
    // applied on every tick and the history rises monotonically.
    for pair in samples.windows(2) {
        assert!(pair[1] > pair[0], "{} !> {}", pair[1], pair[0]);
    }
    assert!(samples.iter().all(|&rpm| rpm < 70.0));

    for (got, want) in samples.iter().zip(replay_bang_bang(&reference_motor())) {
        assert_relative_eq!(*got, want, epsilon = 1e-12);
    }
}

#[test]
fn simple_motor_oscillates_once_target_is_reached() {
    let config = reference_motor().with_target_rpm(10.0);
    let outcome = Simulation::from_config(&RunConfig::new(
        "low_target",
        ControllerConfig::Simple,
        config.clone(),
    ))
    .unwrap()
    .run();
    let samples = outcome.history.as_slice();
    assert!(samples.iter().any(|&rpm| rpm >= 10.0));
    assert!(samples.windows(2).any(|pair| pair[1] < pair[0]));
    for (got, want) in samples.iter().zip(replay_bang_bang(&config)) {
        assert_relative_eq!(*got, want, epsilon = 1e-12);
    }
}

#[test]
fn pid_motor_first_tick() {
    let outcome = run(
        "pid_motor",
        ControllerConfig::Pid(PidGains::new(2.0, 0.01, 0.0)),
    );
    // voltage = 2·70 + 0.01·70 = 140.7; acceleration = 140.7·100 / 112.5
    let first = 140.7 * 100.0 / 112.5 * 0.9;
    assert_relative_eq!(outcome.history.as_slice()[0], first, epsilon = 1e-9);
    assert_eq!(outcome.history.len(), 20);
    assert_eq!(outcome.fallback_ticks, 0);
}

#[test]
fn fuzzy_pid_motor_runs_without_fallback() {
    let outcome = run("fuzzy_pid_motor", ControllerConfig::FuzzyPid);
    assert_eq!(outcome.history.len(), 20);
    assert_eq!(outcome.fallback_ticks, 0);
    assert!(outcome.history.iter().all(f64::is_finite));
    assert_relative_eq!(outcome.final_state.integral, {
        let mut sum = 0.0;
        let mut rpm = 0.0;
        for &sample in outcome.history.as_slice() {
            sum += 70.0 - rpm;
            rpm = sample;
        }
        sum
    }, epsilon = 1e-9);
}

#[test]
fn fuzzy_pid_first_tick_uses_scheduled_gains() {
    let mut gains = Vec::new();
    let sim = Simulation::from_config(&RunConfig::new(
        "fuzzy_pid_motor",
        ControllerConfig::FuzzyPid,
        reference_motor(),
    ))
    .unwrap();
    sim.run_with(&mut |sample: &TickSample, _: &ControlState| {
        gains.push(sample.control.gains.unwrap());
    });
    assert_eq!(gains.len(), 20);
    assert_relative_eq!(gains[0].k_p, 0.75, epsilon = 1e-12);
    assert!(gains.iter().all(|g| g.k_d == 0.0));
}

#[test]
fn independent_runs_do_not_interfere() {
    let pid = ControllerConfig::Pid(PidGains::new(2.0, 0.01, 0.0));
    let alone = run("pid_motor", pid);
    let _ = run("fuzzy_pid_motor", ControllerConfig::FuzzyPid);
    let again = run("pid_motor", pid);
    assert_eq!(alone, again);
}
