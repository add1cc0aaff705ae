use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use heatloop::SimulationConfig;

/// Closed-loop liquid heating simulation
#[derive(Parser)]
#[command(name = "heatloop", version, about)]
struct Args {
    /// TOML scenario file; defaults to the built-in water-heating scenario
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match SimulationConfig::load(path) {
            Ok(config) => {
                tracing::info!("Loaded scenario from {}", path.display());
                config
            }
            Err(e) => {
                tracing::error!("Failed to load scenario '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => SimulationConfig::default(),
    };

    let mut sim = match config.build() {
        Ok(sim) => sim,
        Err(e) => {
            tracing::error!("Invalid scenario: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("HeatLoop - Closed-Loop Liquid Heating Simulation");
    println!("=================================================");
    println!();
    println!(
        "Liquid: {:.2} kg at {:.1}C, ambient {:.1}C, k = {}",
        config.liquid.mass_kg,
        config.liquid.initial_temperature_c,
        config.liquid.ambient_temperature_c,
        config.liquid.k
    );
    println!(
        "Controller: setpoint {:.1}C, Kp={}, Ki={}, Kd={}",
        config.controller.setpoint_c, config.controller.kp, config.controller.ki, config.controller.kd
    );
    println!(
        "Heater: {:.0} W, dt = {:.0}s, duration = {:.0}s",
        config.heater_watts, config.dt_s, config.duration_s
    );
    println!();

    let trace = sim.run(config.duration_s);

    println!(
        "{:>10} {:>12} {:>12} {:>12}",
        "Time (min)", "Temp (C)", "Error (C)", "Duty"
    );
    println!("{:-<10} {:-<12} {:-<12} {:-<12}", "", "", "", "");

    // Print roughly 25 evenly spaced rows
    let stride = (trace.len() / 25).max(1);
    for i in (0..trace.len()).step_by(stride) {
        let s = trace.get(i).expect("index within trace");
        println!(
            "{:10.1} {:12.3} {:12.3} {:12.3}",
            s.time_s / 60.0,
            s.temperature_c,
            s.error_c,
            s.duty_cycle
        );
    }

    if let Some(last) = trace.last() {
        println!();
        println!("Run complete: {} steps", trace.len());
        println!(
            "  Final temperature: {:.2}C (setpoint {:.1}C)",
            last.temperature_c, config.controller.setpoint_c
        );
        println!("  Final error:       {:.3}C", last.error_c);
    }

    ExitCode::SUCCESS
}
