//! Integration tests for the closed-loop heating simulation

use approx::assert_abs_diff_eq;
use heatloop::prelude::*;

/// The reference experiment: 2 gallons of water, 1kW heater, 53C setpoint,
/// 35s control interval over one hour
fn reference_config() -> SimulationConfig {
    SimulationConfig::default()
}

#[test]
fn test_reference_scenario_step_count() {
    let mut sim = reference_config().build().unwrap();
    let trace = sim.run(3600.0);

    // 3600 / 35 truncates to 102 steps, all four channels aligned
    assert_eq!(trace.len(), 102);
    assert_eq!(trace.time_s().len(), 102);
    assert_eq!(trace.temperature_c().len(), 102);
    assert_eq!(trace.error_c().len(), 102);
    assert_eq!(trace.duty_cycle().len(), 102);
}

#[test]
fn test_reference_scenario_saturates_then_settles() {
    let config = reference_config();
    let mut sim = config.build().unwrap();
    let trace = sim.run(config.duration_s);

    // While the error is large the raw controller output is far above 1,
    // so the clamped duty cycle starts pinned at 1.0
    for i in 0..5 {
        assert_eq!(trace.duty_cycle()[i], 1.0, "step {} should saturate", i);
    }

    // Full-power heating raises the temperature monotonically over the
    // initial span
    let temps = trace.temperature_c();
    for i in 1..20 {
        assert!(
            temps[i] > temps[i - 1],
            "initial rise must be monotone: step {} went {} -> {}",
            i,
            temps[i - 1],
            temps[i]
        );
    }

    // The error trends toward zero and stays bounded: no divergence, no
    // unbounded oscillation under these gains
    let final_error = trace.error_c()[trace.len() - 1];
    assert!(
        final_error.abs() < 1.0,
        "error should settle near zero, got {}",
        final_error
    );
    for (i, &temp) in temps.iter().enumerate() {
        assert!(temp < 55.0, "bounded overshoot violated at step {}: {}C", i, temp);
    }
}

#[test]
fn test_duty_cycle_stays_in_unit_interval() {
    let config = reference_config();
    let mut sim = config.build().unwrap();
    let trace = sim.run(config.duration_s);

    for (i, &duty) in trace.duty_cycle().iter().enumerate() {
        assert!(
            (0.0..=1.0).contains(&duty),
            "duty cycle out of range at step {}: {}",
            i,
            duty
        );
    }
}

#[test]
fn test_error_channel_tracks_temperature() {
    let config = reference_config();
    let setpoint = config.controller.setpoint_c;
    let mut sim = config.build().unwrap();
    let trace = sim.run(config.duration_s);

    for i in 0..trace.len() {
        let sample = trace.get(i).unwrap();
        assert_eq!(sample.error_c, setpoint - sample.temperature_c);
    }
}

#[test]
fn test_unpowered_system_relaxes_to_ambient() {
    // Setpoint below the liquid temperature: the controller output goes
    // negative, the clamp holds the duty at zero, and every step is pure
    // idle. The liquid must relax monotonically toward ambient without
    // overshoot (k * dt = 0.01 here, well below 1).
    let liquid = Liquid::new(0.001, 80.0, 20.0, Liquid::HEAT_CAPACITY_WATER, 1.0);
    let pid = PidController::new(0.0, 1.0, 0.0, 0.0, 10.0);
    let mut sim = Simulation::new(liquid, pid, 1000.0, 10.0);

    let trace = sim.run(5000.0);

    let mut prev = 80.0;
    for i in 0..trace.len() {
        let sample = trace.get(i).unwrap();
        assert_eq!(sample.duty_cycle, 0.0);
        assert!(sample.temperature_c < prev, "cooling must be monotone");
        assert!(sample.temperature_c >= 20.0, "must not overshoot ambient");
        prev = sample.temperature_c;
    }
    assert_abs_diff_eq!(trace.last().unwrap().temperature_c, 20.0, epsilon = 0.5);
}

#[test]
fn test_identical_runs_are_identical() {
    // Two simulations built from the same scenario share no hidden state
    let config = reference_config();
    let mut a = config.build().unwrap();
    let mut b = config.build().unwrap();

    let trace_a = a.run(config.duration_s);
    let trace_b = b.run(config.duration_s);

    assert_eq!(trace_a.len(), trace_b.len());
    for i in 0..trace_a.len() {
        assert_eq!(trace_a.get(i), trace_b.get(i), "traces diverged at step {}", i);
    }
    assert_eq!(a.controller().error_sum(), b.controller().error_sum());
    assert_eq!(a.controller().previous_error(), b.controller().previous_error());
}

#[test]
fn test_proportional_cap_limits_duty() {
    // With p_max capping the proportional term below the clamp ceiling,
    // the duty cycle can never saturate even under a huge error
    let liquid = Liquid::new(0.0001, 20.0, 20.0, Liquid::HEAT_CAPACITY_WATER, 7.57);
    let pid = PidController::new(53.0, 1.0, 0.0, 0.0, 35.0).with_p_max(0.5);
    let mut sim = Simulation::new(liquid, pid, 1000.0, 35.0);

    let trace = sim.run(700.0);
    for &duty in trace.duty_cycle() {
        assert!(duty <= 0.5, "capped proportional term exceeded p_max: {}", duty);
    }

    // The same scenario without the cap saturates immediately
    let liquid = Liquid::new(0.0001, 20.0, 20.0, Liquid::HEAT_CAPACITY_WATER, 7.57);
    let pid = PidController::new(53.0, 1.0, 0.0, 0.0, 35.0);
    let mut sim = Simulation::new(liquid, pid, 1000.0, 35.0);

    let trace = sim.run(700.0);
    assert_eq!(trace.duty_cycle()[0], 1.0);
}

#[test]
fn test_first_step_energy_balance() {
    // The first reference step saturates the heater for the full 35s, so
    // the temperature rise is exactly Q / (m * c) with no idle loss
    let config = reference_config();
    let mut sim = config.build().unwrap();

    let sample = sim.step();
    let expected = config.liquid.initial_temperature_c
        + Liquid::temperature_change_c(
            config.heater_watts * config.dt_s,
            config.liquid.mass_kg,
            config.liquid.heat_capacity,
        );
    assert_abs_diff_eq!(sample.temperature_c, expected, epsilon = 1e-12);
}

#[test]
fn test_scenario_from_toml() {
    let text = r#"
        heater_watts = 500.0
        dt_s = 5.0
        duration_s = 100.0

        [liquid]
        k = 0.0
        initial_temperature_c = 20.0
        ambient_temperature_c = 20.0
        heat_capacity = 4200.0
        mass_kg = 1.0

        [controller]
        setpoint_c = 30.0
        kp = 1.0
        ki = 0.0
        kd = 0.0
    "#;

    let config = SimulationConfig::from_toml_str(text).unwrap();
    let mut sim = config.build().unwrap();
    let trace = sim.run(config.duration_s);

    assert_eq!(trace.len(), 20);
    // k = 0 and a saturated heater: every step adds exactly 500W * 5s
    // into 1kg of water
    let per_step = Liquid::temperature_change_c(500.0 * 5.0, 1.0, 4200.0);
    assert_abs_diff_eq!(
        trace.get(0).unwrap().temperature_c,
        20.0 + per_step,
        epsilon = 1e-12
    );
}
