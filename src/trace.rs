//! Recorded closed-loop time series

/// One recorded simulation step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Elapsed time at the start of the step (s)
    pub time_s: f64,
    /// Liquid temperature after the step (degC)
    pub temperature_c: f64,
    /// Tracking error `setpoint - temperature` after the step (degC)
    pub error_c: f64,
    /// Heater duty cycle applied during the step, in [0, 1]
    pub duty_cycle: f64,
}

/// Multi-channel recording of a simulation run
///
/// Four aligned columns - time, temperature, tracking error, duty
/// cycle - with one entry appended per simulation step. This is the
/// entire surface a plotting or analysis consumer needs; it carries no
/// reference to the models that produced it.
///
/// # Example
///
/// ```ignore
/// let trace = sim.run(3600.0);
///
/// for (t, temp) in trace.time_s().iter().zip(trace.temperature_c()) {
///     println!("{:.0}s {:.2}C", t, temp);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Trace {
    time_s: Vec<f64>,
    temperature_c: Vec<f64>,
    error_c: Vec<f64>,
    duty_cycle: Vec<f64>,
}

impl Trace {
    /// Create an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty trace with capacity for `n` samples
    pub fn with_capacity(n: usize) -> Self {
        Self {
            time_s: Vec::with_capacity(n),
            temperature_c: Vec::with_capacity(n),
            error_c: Vec::with_capacity(n),
            duty_cycle: Vec::with_capacity(n),
        }
    }

    /// Append one sample to all channels
    pub fn push(&mut self, sample: Sample) {
        self.time_s.push(sample.time_s);
        self.temperature_c.push(sample.temperature_c);
        self.error_c.push(sample.error_c);
        self.duty_cycle.push(sample.duty_cycle);
    }

    /// Number of recorded samples
    pub fn len(&self) -> usize {
        self.time_s.len()
    }

    /// Check if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.time_s.is_empty()
    }

    /// Drop all recorded samples
    pub fn clear(&mut self) {
        self.time_s.clear();
        self.temperature_c.clear();
        self.error_c.clear();
        self.duty_cycle.clear();
    }

    /// Sample at index `i`, if recorded
    pub fn get(&self, i: usize) -> Option<Sample> {
        if i >= self.len() {
            return None;
        }

        Some(Sample {
            time_s: self.time_s[i],
            temperature_c: self.temperature_c[i],
            error_c: self.error_c[i],
            duty_cycle: self.duty_cycle[i],
        })
    }

    /// Most recent sample
    pub fn last(&self) -> Option<Sample> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }

    /// Elapsed-time channel (s)
    pub fn time_s(&self) -> &[f64] {
        &self.time_s
    }

    /// Temperature channel (degC)
    pub fn temperature_c(&self) -> &[f64] {
        &self.temperature_c
    }

    /// Tracking-error channel (degC)
    pub fn error_c(&self) -> &[f64] {
        &self.error_c
    }

    /// Duty-cycle channel (unitless, in [0, 1])
    pub fn duty_cycle(&self) -> &[f64] {
        &self.duty_cycle
    }
}
