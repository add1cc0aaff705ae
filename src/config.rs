//! Scenario configuration for the simulation boundary
//!
//! All construction inputs - thermal parameters, controller gains and
//! caps, driver parameters - as TOML-loadable structs. Values are
//! range-checked here, so file-supplied scenarios fail with a typed
//! error instead of tripping the model constructors' preconditions.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Liquid, PidController};
use crate::sim::Simulation;

/// Errors producing a runnable scenario from external input
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
}

/// Thermal plant parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiquidConfig {
    /// Ambient coupling rate constant (1/s)
    pub k: f64,
    pub initial_temperature_c: f64,
    pub ambient_temperature_c: f64,
    /// Specific heat capacity (J/kg/degC)
    pub heat_capacity: f64,
    pub mass_kg: f64,
}

/// Controller gains, setpoint, and optional per-term caps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    pub setpoint_c: f64,
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub i_max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d_max: Option<f64>,
}

/// A complete runnable scenario
///
/// The default scenario is the reference experiment: two gallons of
/// water heated from 20C toward a 53C setpoint by a 1kW heater, with a
/// 35s control interval over a one-hour horizon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub liquid: LiquidConfig,
    pub controller: ControllerConfig,
    /// Heater output while on (W)
    pub heater_watts: f64,
    /// Control interval, shared by controller and driver (s)
    pub dt_s: f64,
    /// Simulated horizon (s)
    pub duration_s: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            liquid: LiquidConfig {
                k: 0.0001,
                initial_temperature_c: 20.0,
                ambient_temperature_c: 20.0,
                heat_capacity: Liquid::HEAT_CAPACITY_WATER,
                // 2 gallons of water at 3.785 kg/gallon
                mass_kg: 7.57,
            },
            controller: ControllerConfig {
                setpoint_c: 53.0,
                kp: 1.0,
                ki: 0.00001,
                kd: 0.0,
                p_max: None,
                i_max: None,
                d_max: None,
            },
            heater_watts: 1000.0,
            dt_s: 35.0,
            duration_s: 3600.0,
        }
    }
}

impl SimulationConfig {
    /// Parse a scenario from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Range-check every field a model constructor would assert on
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::NonPositive { field, value })
            }
        }

        fn not_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Negative { field, value })
            }
        }

        positive("liquid.mass_kg", self.liquid.mass_kg)?;
        positive("liquid.heat_capacity", self.liquid.heat_capacity)?;
        not_negative("liquid.k", self.liquid.k)?;
        not_negative("heater_watts", self.heater_watts)?;
        positive("dt_s", self.dt_s)?;
        positive("duration_s", self.duration_s)?;

        Ok(())
    }

    /// Construct the configured simulation
    ///
    /// Validates first, so a bad scenario surfaces as a [`ConfigError`]
    /// rather than a panic from a model constructor.
    pub fn build(&self) -> Result<Simulation, ConfigError> {
        self.validate()?;

        let liquid = Liquid::new(
            self.liquid.k,
            self.liquid.initial_temperature_c,
            self.liquid.ambient_temperature_c,
            self.liquid.heat_capacity,
            self.liquid.mass_kg,
        );

        let mut controller = PidController::new(
            self.controller.setpoint_c,
            self.controller.kp,
            self.controller.ki,
            self.controller.kd,
            self.dt_s,
        );
        if let Some(p_max) = self.controller.p_max {
            controller = controller.with_p_max(p_max);
        }
        if let Some(i_max) = self.controller.i_max {
            controller = controller.with_i_max(i_max);
        }
        if let Some(d_max) = self.controller.d_max {
            controller = controller.with_d_max(d_max);
        }

        Ok(Simulation::new(liquid, controller, self.heater_watts, self.dt_s))
    }
}
