mod config;
mod ingest;
mod telemetry;

pub use config::Config;
pub use ingest::{IngestError, PlanetRecord, SpacecraftRecord, SystemRecord};
pub use telemetry::TelemetryLog;

use crate::flight::{Planet, Spacecraft, System, World, common::vec3d::Vec3D};
use crate::{error, info, warn};
use rand::{SeedableRng, rngs::StdRng};
use std::collections::BTreeMap;
use thiserror::Error;


/// Per-component tolerance of the run loop's arrival check. Distinct from
/// the guidance state machine's exact-equality landing condition.
pub const ARRIVAL_EPSILON: f64 = 0.001;
/// Fixed logical step length of the reference scenario.
pub const TICK_DT: f64 = 1.0;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error("system {system:?} does not exist, could not add planet {planet:?}")]
    UnknownSystem { system: String, planet: String },
    #[error("scenario requires exactly one spacecraft, found {0}")]
    SpacecraftCount(usize),
    #[error("home planet {planet:?} not found in system {system:?}")]
    UnknownHomePlanet { system: String, planet: String },
    #[error("target planet {0:?} not found in any system")]
    UnknownTargetPlanet(String),
    #[error("could not create telemetry log: {0}")]
    Telemetry(#[from] std::io::Error),
}

/// Outcome summary of one bounded simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Ticks actually executed.
    pub ticks: u32,
    /// Whether the craft reached the target within [`ARRIVAL_EPSILON`].
    pub arrived: bool,
    /// Distance to the target position after the final tick.
    pub final_distance: f64,
    /// Trajectory samples that failed to write during the run (non-fatal).
    pub dropped_samples: u32,
}

/// A complete simulation scenario: ingested records, the compiled world
/// and its spacecraft, and the bounded run loop that drives them.
pub struct Scenario {
    config: Config,
    world: World,
    spacecraft: BTreeMap<String, Spacecraft>,
    system_records: Vec<SystemRecord>,
    planet_records: Vec<PlanetRecord>,
    spacecraft_records: Vec<SpacecraftRecord>,
}

impl Scenario {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            world: World::new(),
            spacecraft: BTreeMap::new(),
            system_records: Vec::new(),
            planet_records: Vec::new(),
            spacecraft_records: Vec::new(),
        }
    }

    /// Reads the three tabular initialization files into records.
    /// Any validation failure here is fatal to scenario setup.
    pub fn load_files(&mut self) -> Result<(), ScenarioError> {
        self.system_records = ingest::load_systems(&self.config.data_dir)?;
        self.planet_records = ingest::load_planets(&self.config.data_dir)?;
        self.spacecraft_records = ingest::load_spacecraft(&self.config.data_dir)?;
        Ok(())
    }

    /// Compiles the ingested records into the world and its spacecraft.
    ///
    /// Planets referencing an unknown system abort compilation. The random
    /// source for surface sampling is seeded from the configuration so
    /// compilation is reproducible.
    pub fn compile(&mut self) -> Result<(), ScenarioError> {
        let mut rng = StdRng::seed_from_u64(self.config.rng_seed);

        for record in &self.system_records {
            self.world.add_system(System::new(record.name.clone()));
        }

        for record in &self.planet_records {
            let Some(system) = self.world.system_mut(&record.system_name) else {
                return Err(ScenarioError::UnknownSystem {
                    system: record.system_name.clone(),
                    planet: record.name.clone(),
                });
            };

            let mut planet = Planet::new(
                record.system_name.clone(),
                record.name.clone(),
                record.radius,
                record.mass,
                Vec3D::new(record.position_x, record.position_y, record.position_z),
                &mut rng,
            );
            planet.set_gravitational_parameter(record.gravity_parameter);
            planet.set_atmosphere_radius(record.atmosphere_radius);
            system.add_planet(planet);
        }

        for record in &self.spacecraft_records {
            let mut craft = Spacecraft::new(record.name.clone());
            craft.set_area(record.area);
            craft.set_mass(record.mass);
            craft.set_angular_velocity(record.angular_velocity);
            craft.set_max_velocity(record.max_velocity);
            craft.control_mut().set_target_velocity(Vec3D::new(
                record.target_velocity_x,
                record.target_velocity_y,
                record.target_velocity_z,
            ));
            craft.control_mut().set_target_acceleration(Vec3D::new(
                record.target_acceleration_x,
                record.target_acceleration_y,
                record.target_acceleration_z,
            ));
            self.spacecraft.insert(craft.name().to_string(), craft);
        }

        Ok(())
    }

    /// Runs the bounded simulation loop for the scenario's single craft.
    ///
    /// Terminates on arrival within [`ARRIVAL_EPSILON`] per component or
    /// once the tick budget is exhausted, whichever comes first; budget
    /// exhaustion is a normal outcome. In-loop failures (bad tick,
    /// telemetry write) are logged and counted, never aborting the run.
    pub fn run(&mut self) -> Result<RunReport, ScenarioError> {
        let mut telemetry = TelemetryLog::create(&self.config.output_dir)?;
        let mut dropped: u32 = 0;

        // The snapshot is written once and is not a trajectory sample, so a
        // failure here is reported on its own instead of being counted.
        if let Err(e) = telemetry.record_planets(self.world.planets()) {
            warn!("could not write the planet snapshot: {e}");
        }

        if self.spacecraft.len() != 1 {
            return Err(ScenarioError::SpacecraftCount(self.spacecraft.len()));
        }
        let Some(craft) = self.spacecraft.values_mut().next() else {
            return Err(ScenarioError::SpacecraftCount(0));
        };

        let home = self
            .world
            .system(&self.config.home_system)
            .and_then(|system| system.planet(&self.config.home_planet))
            .ok_or_else(|| ScenarioError::UnknownHomePlanet {
                system: self.config.home_system.clone(),
                planet: self.config.home_planet.clone(),
            })?;
        craft.set_home_planet(home);

        let target = self
            .world
            .find_planet(&self.config.target_planet)
            .ok_or_else(|| ScenarioError::UnknownTargetPlanet(self.config.target_planet.clone()))?;
        craft.set_target_planet(target);
        let target_position = craft.target_planet().target_position();

        info!(
            "{} departing {} for {}",
            craft.name(),
            self.config.home_planet,
            self.config.target_planet
        );

        let mut ticks: u32 = 0;
        let mut arrived = within_tolerance(craft.position(), target_position);
        while !arrived && ticks < self.config.tick_budget {
            if let Err(e) = craft.tick(TICK_DT, &self.world) {
                error!("tick {ticks} rejected: {e}");
            }
            if telemetry
                .record_sample(ticks, craft.position(), craft.velocity(), craft.acceleration())
                .is_err()
            {
                dropped += 1;
            }
            ticks += 1;
            arrived = within_tolerance(craft.position(), target_position);
        }

        if dropped > 0 {
            warn!("{dropped} trajectory samples were dropped during the run");
        }
        if let Err(e) = telemetry.finish() {
            warn!("could not flush telemetry log: {e}");
        }

        Ok(RunReport {
            ticks,
            arrived,
            final_distance: craft.position().euclid_distance(&target_position),
            dropped_samples: dropped,
        })
    }

    pub fn config(&self) -> &Config { &self.config }
    pub fn world(&self) -> &World { &self.world }
    pub fn spacecraft(&self) -> &BTreeMap<String, Spacecraft> { &self.spacecraft }
}

/// Component-wise arrival comparison with the scenario tolerance.
fn within_tolerance(a: Vec3D<f64>, b: Vec3D<f64>) -> bool {
    (a.x() - b.x()).abs() < ARRIVAL_EPSILON
        && (a.y() - b.y()).abs() < ARRIVAL_EPSILON
        && (a.z() - b.z()).abs() < ARRIVAL_EPSILON
}
