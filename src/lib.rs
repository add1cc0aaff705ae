//! HeatLoop - closed-loop liquid heating simulation
//!
//! Discrete-time simulation of a temperature control process: a PID
//! controller regulates a heater's duty cycle to drive a liquid's
//! temperature toward a setpoint, against passive heat loss to the
//! ambient environment.
//!
//! # Architecture
//!
//! Two independent stateful models composed by a fixed-step driver:
//! - [`Liquid`]: lumped thermal plant with heat capacity, ambient
//!   coupling, and current temperature
//! - [`PidController`]: setpoint-tracking control law with independently
//!   capped proportional, integral, and derivative terms
//! - [`Simulation`]: advances time in fixed steps, converts the
//!   controller output into a heater duty cycle, splits each step into a
//!   heating and an idle sub-interval, and records the resulting series
//!   into a [`Trace`]
//!
//! Data flows one direction per step: plant temperature -> controller ->
//! duty cycle -> plant (heat, then idle) -> recorded sample. Feedback
//! exists across steps only.
//!
//! # Example
//!
//! ```rust,ignore
//! use heatloop::prelude::*;
//!
//! let liquid = Liquid::new(0.0001, 20.0, 20.0, Liquid::HEAT_CAPACITY_WATER, 7.57);
//! let pid = PidController::new(53.0, 1.0, 0.00001, 0.0, 35.0);
//! let mut sim = Simulation::new(liquid, pid, 1000.0, 35.0);
//!
//! let trace = sim.run(3600.0);
//! for i in 0..trace.len() {
//!     let s = trace.get(i).unwrap();
//!     println!("t={:.0}s T={:.2}C duty={:.2}", s.time_s, s.temperature_c, s.duty_cycle);
//! }
//! ```

pub mod config;
pub mod models;
pub mod sim;
pub mod trace;

pub use config::{ConfigError, ControllerConfig, LiquidConfig, SimulationConfig};
pub use models::{Liquid, PidController};
pub use sim::Simulation;
pub use trace::{Sample, Trace};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, ControllerConfig, LiquidConfig, SimulationConfig};
    pub use crate::models::{Liquid, PidController};
    pub use crate::sim::Simulation;
    pub use crate::trace::{Sample, Trace};
}
