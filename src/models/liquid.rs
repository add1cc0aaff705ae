//! Lumped thermal model of a heated liquid

/// Lumped mass of liquid with ambient coupling
///
/// The liquid has a single temperature state that evolves through two
/// explicit operations: [`idle`](Liquid::idle) relaxes the temperature
/// toward ambient following Newton's law of cooling, and
/// [`apply_heat`](Liquid::apply_heat) converts injected energy into a
/// temperature rise through the liquid's mass and specific heat capacity.
///
/// # Example
///
/// ```ignore
/// // 2 gallons of water at 20C in a 20C room
/// let mut liquid = Liquid::new(0.0001, 20.0, 20.0, Liquid::HEAT_CAPACITY_WATER, 7.57);
///
/// liquid.apply_heat(1000.0, 30.0);  // 1kW heater on for 30s
/// liquid.idle(5.0);                 // then 5s of passive cooling
/// println!("T = {:.2}C", liquid.temperature_c());
/// ```
#[derive(Debug, Clone)]
pub struct Liquid {
    /// Current temperature (degC), the only mutable state
    temperature_c: f64,
    /// Environment temperature the liquid relaxes toward (degC)
    ambient_temperature_c: f64,
    /// Ambient coupling rate constant (1/s); zero decouples the liquid
    k: f64,
    /// Specific heat capacity (J/kg/degC)
    heat_capacity: f64,
    /// Mass (kg)
    mass_kg: f64,
}

impl Liquid {
    /// Specific heat capacity of water (J/kg/degC)
    pub const HEAT_CAPACITY_WATER: f64 = 4200.0;

    /// Create a liquid with fixed thermal parameters and an initial temperature
    ///
    /// # Arguments
    ///
    /// * `k` - ambient coupling rate constant (must not be negative)
    /// * `initial_temperature_c` - starting temperature in degC
    /// * `ambient_temperature_c` - environment temperature in degC
    /// * `heat_capacity` - specific heat capacity in J/kg/degC (must be positive)
    /// * `mass_kg` - mass in kg (must be positive)
    ///
    /// # Panics
    ///
    /// Panics if `mass_kg <= 0`, `heat_capacity <= 0`, or `k < 0`.
    pub fn new(
        k: f64,
        initial_temperature_c: f64,
        ambient_temperature_c: f64,
        heat_capacity: f64,
        mass_kg: f64,
    ) -> Self {
        assert!(mass_kg > 0.0, "Mass must be positive");
        assert!(heat_capacity > 0.0, "Heat capacity must be positive");
        assert!(k >= 0.0, "Coupling coefficient must not be negative");

        Self {
            temperature_c: initial_temperature_c,
            ambient_temperature_c,
            k,
            heat_capacity,
            mass_kg,
        }
    }

    /// Temperature change from injecting `joules` into `mass_kg` of a
    /// substance with the given specific heat capacity
    ///
    /// Q = m * c * dT, solved for dT.
    pub fn temperature_change_c(joules: f64, mass_kg: f64, heat_capacity: f64) -> f64 {
        joules / (mass_kg * heat_capacity)
    }

    /// Current temperature (degC)
    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    /// Ambient temperature (degC)
    pub fn ambient_temperature_c(&self) -> f64 {
        self.ambient_temperature_c
    }

    /// Relax passively toward ambient for `delta_time_s` seconds
    ///
    /// Applies a single explicit Euler step of Newton's law of cooling:
    /// dT = k * (ambient - T) * dt. This approximates exponential
    /// relaxation and is accurate only for small `k * dt`; no
    /// sub-stepping is performed, so callers choose a step size fine
    /// enough for their accuracy needs.
    ///
    /// Returns the new temperature.
    pub fn idle(&mut self, delta_time_s: f64) -> f64 {
        let delta_temp = self.k * (self.ambient_temperature_c - self.temperature_c) * delta_time_s;
        self.temperature_c += delta_temp;
        self.temperature_c
    }

    /// Absorb `heat_watts` of heater power applied for `time_s` seconds
    ///
    /// The injected energy Q = W * t raises the temperature by
    /// Q / (mass * heat_capacity). No upper clamp is applied; boiling and
    /// phase changes are not modeled.
    ///
    /// Returns the new temperature.
    pub fn apply_heat(&mut self, heat_watts: f64, time_s: f64) -> f64 {
        let joules = heat_watts * time_s;
        self.temperature_c += Self::temperature_change_c(joules, self.mass_kg, self.heat_capacity);
        self.temperature_c
    }
}
