use std::env;
use std::path::PathBuf;

/// Default number of logical ticks before a run is cut off.
const DEFAULT_TICK_BUDGET: u32 = 100;
/// Default seed for the scenario's random source.
const DEFAULT_RNG_SEED: u64 = 42;

/// Runtime configuration, resolved from the environment with defaults
/// matching the bundled scenario.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing `Systems.csv`, `Planets.csv` and `Spacecraft.csv`.
    pub data_dir: PathBuf,
    /// Directory receiving the trajectory log and the planet snapshot.
    pub output_dir: PathBuf,
    /// Seed for surface-position sampling; fixed seeds give reproducible runs.
    pub rng_seed: u64,
    /// Maximum number of ticks per run; exhausting it is normal termination.
    pub tick_budget: u32,
    pub home_system: String,
    pub home_planet: String,
    pub target_planet: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            data_dir: env_path("SIM_DATA_DIR", "data"),
            output_dir: env_path("SIM_OUTPUT_DIR", "out"),
            rng_seed: env_parsed("SIM_RNG_SEED", DEFAULT_RNG_SEED),
            tick_budget: env_parsed("SIM_TICK_BUDGET", DEFAULT_TICK_BUDGET),
            home_system: env_string("SIM_HOME_SYSTEM", "Pok'Tul Zar"),
            home_planet: env_string("SIM_HOME_PLANET", "Smeg"),
            target_planet: env_string("SIM_TARGET_PLANET", "Tha Nal"),
        }
    }
}

impl Default for Config {
    fn default() -> Self { Self::from_env() }
}

fn env_path(key: &str, default: &str) -> PathBuf {
    env::var(key).as_ref().map_or_else(|_| PathBuf::from(default), PathBuf::from)
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}
