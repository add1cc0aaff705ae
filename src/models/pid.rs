//! Setpoint-tracking PID controller with per-term output caps

/// PID controller evaluated against a fixed setpoint
///
/// Each evaluation recomputes the instantaneous error
/// `err = setpoint - position` and layers the terms: the full
/// [`evaluate`](PidController::evaluate) adds the integral term on top of
/// [`proportional_derivative`](PidController::proportional_derivative),
/// which adds the derivative term on top of
/// [`proportional_only`](PidController::proportional_only).
///
/// Every term can be individually capped from above (`p_max`, `i_max`,
/// `d_max`); an unset cap leaves that term unbounded. Caps are per-term,
/// applied before the terms are summed, and there is no floor on any
/// term - negative corrections pass through uncapped. Range-limiting the
/// combined output is the caller's job.
///
/// # State contract
///
/// `evaluate` performs exactly one derivative-state update
/// (`previous_error`) and one integral-state update (`error_sum`) per
/// call. Call it exactly once per control step. The partial forms also
/// touch state (`proportional_derivative` updates `previous_error`), so
/// they must not be interleaved with `evaluate` calls in the same loop or
/// the state will double-update.
///
/// # Example
///
/// ```ignore
/// let mut pid = PidController::new(53.0, 1.0, 0.00001, 0.0, 35.0);
///
/// let duty = pid.evaluate(liquid.temperature_c()).clamp(0.0, 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct PidController {
    /// Target the controller drives the position toward
    setpoint: f64,
    kp: f64,
    ki: f64,
    kd: f64,
    /// Fixed evaluation interval (s); divides the derivative term
    dt: f64,

    /// Optional per-term ceilings; None means unbounded
    p_max: Option<f64>,
    i_max: Option<f64>,
    d_max: Option<f64>,

    /// Error at the previous derivative evaluation
    previous_error: f64,
    /// Time-weighted error accumulator for the integral term
    error_sum: f64,
}

impl PidController {
    /// Create a controller with the given setpoint, gains, and step size
    ///
    /// All term caps start unset; add them with
    /// [`with_p_max`](Self::with_p_max) and friends. Internal state is
    /// initialized to zero.
    ///
    /// # Panics
    ///
    /// Panics if `dt <= 0`.
    pub fn new(setpoint: f64, kp: f64, ki: f64, kd: f64, dt: f64) -> Self {
        assert!(dt > 0.0, "Step size must be positive");

        Self {
            setpoint,
            kp,
            ki,
            kd,
            dt,
            p_max: None,
            i_max: None,
            d_max: None,
            previous_error: 0.0,
            error_sum: 0.0,
        }
    }

    /// Cap the proportional term from above
    pub fn with_p_max(mut self, p_max: f64) -> Self {
        self.p_max = Some(p_max);
        self
    }

    /// Cap the integral term from above
    pub fn with_i_max(mut self, i_max: f64) -> Self {
        self.i_max = Some(i_max);
        self
    }

    /// Cap the derivative term from above
    pub fn with_d_max(mut self, d_max: f64) -> Self {
        self.d_max = Some(d_max);
        self
    }

    /// Target setpoint
    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }

    /// Current integral accumulator
    pub fn error_sum(&self) -> f64 {
        self.error_sum
    }

    /// Error seen by the last derivative evaluation
    pub fn previous_error(&self) -> f64 {
        self.previous_error
    }

    /// Zero the mutable controller state
    pub fn reset(&mut self) {
        self.previous_error = 0.0;
        self.error_sum = 0.0;
    }

    fn error(&self, position: f64) -> f64 {
        self.setpoint - position
    }

    /// Apply an optional upper cap; never a floor
    fn capped(value: f64, ceiling: Option<f64>) -> f64 {
        match ceiling {
            Some(max) => value.min(max),
            None => value,
        }
    }

    fn proportional_term(&self, error: f64) -> f64 {
        Self::capped(self.kp * error, self.p_max)
    }

    fn derivative_term(&self, error: f64, previous_error: f64) -> f64 {
        let delta_error_over_dt = (error - previous_error) / self.dt;
        Self::capped(self.kd * delta_error_over_dt, self.d_max)
    }

    fn integral_term(&self, error_sum: f64) -> f64 {
        Self::capped(self.ki * error_sum, self.i_max)
    }

    /// Proportional term only: `Kp * err`, capped above at `p_max`
    ///
    /// Stateless.
    pub fn proportional_only(&self, position: f64) -> f64 {
        self.proportional_term(self.error(position))
    }

    /// Proportional plus derivative terms
    ///
    /// Computes the error slope against the previously seen error and
    /// updates `previous_error` as a side effect. The derivative term
    /// alone is capped above at `d_max`; the proportional term carries
    /// its own cap, applied before the sum.
    pub fn proportional_derivative(&mut self, position: f64) -> f64 {
        let error = self.error(position);
        let derivative = self.derivative_term(error, self.previous_error);
        self.previous_error = error;

        self.proportional_only(position) + derivative
    }

    /// Full PID evaluation
    ///
    /// Accumulates `err * dt` into `error_sum` as a side effect, then
    /// layers the capped integral term on top of
    /// [`proportional_derivative`](Self::proportional_derivative). One
    /// call performs exactly one integral-state update and one
    /// derivative-state update.
    pub fn evaluate(&mut self, position: f64) -> f64 {
        let error = self.error(position);
        self.error_sum += error * self.dt;

        self.integral_term(self.error_sum) + self.proportional_derivative(position)
    }
}
