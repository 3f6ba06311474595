#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod flight;
mod logger;
mod scenario;

use crate::scenario::{Config, Scenario};

fn main() {
    info!("Booting up spacecraft simulation...");
    let config = Config::from_env();
    let mut scenario = Scenario::new(config);

    info!("Loading scenario files...");
    if let Err(e) = scenario.load_files() {
        fatal!("Could not load scenario files: {e}");
    }

    info!("Compiling scenario...");
    if let Err(e) = scenario.compile() {
        fatal!("Could not compile scenario: {e}");
    }

    info!("Running simulation...");
    match scenario.run() {
        Ok(report) => {
            let outcome = if report.arrived { "arrived at target" } else { "tick budget exhausted" };
            info!(
                "Simulation completed after {} ticks: {outcome}, final distance {:.3}",
                report.ticks, report.final_distance
            );
            if report.dropped_samples > 0 {
                warn!("{} telemetry samples were dropped", report.dropped_samples);
            }
        }
        Err(e) => fatal!("Simulation aborted: {e}"),
    }
}
