//! Fixed-step closed-loop simulation driver

use crate::models::{Liquid, PidController};
use crate::trace::{Sample, Trace};

/// Couples a [`Liquid`] plant to a [`PidController`] over fixed time steps
///
/// Each step reads the plant temperature, asks the controller for a raw
/// output, clamps it to the unit interval to obtain a heater duty cycle,
/// and splits the step accordingly: the heater runs at full power for
/// `duty * dt` seconds, then the liquid idles for the remainder. Heating
/// always precedes idling within a step; the heater is on for the first
/// fraction of the interval and off for the rest.
///
/// Clamping the controller output is the driver's responsibility - the
/// controller itself only caps individual terms.
///
/// # Example
///
/// ```ignore
/// let liquid = Liquid::new(0.0001, 20.0, 20.0, Liquid::HEAT_CAPACITY_WATER, 7.57);
/// let pid = PidController::new(53.0, 1.0, 0.00001, 0.0, 35.0);
///
/// let mut sim = Simulation::new(liquid, pid, 1000.0, 35.0);
/// let trace = sim.run(3600.0);
/// println!("final T = {:.2}C", trace.last().unwrap().temperature_c);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    liquid: Liquid,
    controller: PidController,
    /// Heater output while on (W)
    heater_watts: f64,
    /// Step size (s), conventionally the controller's dt
    dt: f64,
    /// Elapsed simulation time (s)
    time_s: f64,
}

impl Simulation {
    /// Create a driver over the given plant and controller
    ///
    /// # Panics
    ///
    /// Panics if `dt <= 0` or `heater_watts < 0`.
    pub fn new(liquid: Liquid, controller: PidController, heater_watts: f64, dt: f64) -> Self {
        assert!(dt > 0.0, "Step size must be positive");
        assert!(heater_watts >= 0.0, "Heater power must not be negative");

        Self {
            liquid,
            controller,
            heater_watts,
            dt,
            time_s: 0.0,
        }
    }

    /// Elapsed simulation time (s)
    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    /// The plant being driven
    pub fn liquid(&self) -> &Liquid {
        &self.liquid
    }

    /// The controller driving the plant
    pub fn controller(&self) -> &PidController {
        &self.controller
    }

    /// Execute one control step and return the recorded sample
    ///
    /// The sample's timestamp is the step's start time; its temperature
    /// and error reflect the plant state after the step.
    pub fn step(&mut self) -> Sample {
        let start_time_s = self.time_s;
        let temperature = self.liquid.temperature_c();

        let raw = self.controller.evaluate(temperature);
        let duty_cycle = raw.clamp(0.0, 1.0);

        // Heater on for the first fraction of the interval, off for the
        // remainder. time_off cannot go negative after the clamp, but the
        // split must not assume a pre-clamped duty cycle.
        let time_on = duty_cycle * self.dt;
        let time_off = self.dt - time_on;

        self.liquid.apply_heat(self.heater_watts, time_on);
        if time_off > 0.0 {
            self.liquid.idle(time_off);
        }

        self.time_s += self.dt;

        let temperature_c = self.liquid.temperature_c();
        let sample = Sample {
            time_s: start_time_s,
            temperature_c,
            error_c: self.controller.setpoint() - temperature_c,
            duty_cycle,
        };

        tracing::debug!(
            time_s = sample.time_s,
            temperature_c = sample.temperature_c,
            duty_cycle = sample.duty_cycle,
            "step"
        );

        sample
    }

    /// Run for `duration_s` seconds and return the recorded trace
    ///
    /// Executes `duration_s / dt` steps (truncating; a trailing partial
    /// step is not simulated), always to completion - there is no early
    /// termination.
    pub fn run(&mut self, duration_s: f64) -> Trace {
        let steps = (duration_s / self.dt) as usize;

        tracing::info!(
            steps,
            dt_s = self.dt,
            heater_watts = self.heater_watts,
            setpoint_c = self.controller.setpoint(),
            "starting simulation run"
        );

        let mut trace = Trace::with_capacity(steps);
        for _ in 0..steps {
            let sample = self.step();
            trace.push(sample);
        }

        trace
    }
}
