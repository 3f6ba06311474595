use crate::flight::{Planet, common::vec3d::Vec3D};
use itertools::Itertools;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name of the per-tick trajectory log.
pub const TRAJECTORY_FILE: &str = "trajectory.csv";
/// File name of the one-shot planet snapshot.
pub const PLANETS_FILE: &str = "planets.json";

const TRAJECTORY_HEADERS: &[&str] = &[
    "tick",
    "position_x",
    "position_y",
    "position_z",
    "velocity_x",
    "velocity_y",
    "velocity_z",
    "acceleration_x",
    "acceleration_y",
    "acceleration_z",
];

/// Durable snapshot of a planetary body as compiled into the scenario.
#[derive(Debug, Serialize)]
pub struct PlanetSnapshot {
    system_name: String,
    planet_name: String,
    center_position_x: f64,
    center_position_y: f64,
    center_position_z: f64,
    radius: f64,
    mass: f64,
    gravitational_parameter: f64,
    air_temperature: f64,
    drag_coefficient: f64,
}

impl From<&Planet> for PlanetSnapshot {
    fn from(planet: &Planet) -> Self {
        Self {
            system_name: planet.system_name().to_string(),
            planet_name: planet.name().to_string(),
            center_position_x: planet.center_position().x(),
            center_position_y: planet.center_position().y(),
            center_position_z: planet.center_position().z(),
            radius: planet.radius(),
            mass: planet.mass(),
            gravitational_parameter: planet.gravitational_parameter(),
            air_temperature: planet.air_temperature(),
            drag_coefficient: planet.drag_coefficient_parameter(),
        }
    }
}

/// Persistence sink for simulation samples.
///
/// Writes one trajectory row per tick and the planet snapshot once at run
/// start. Individual write failures are reported back to the loop driver;
/// they are never fatal to a tick.
pub struct TelemetryLog {
    trajectory: BufWriter<File>,
    snapshot_path: PathBuf,
}

impl TelemetryLog {
    /// Creates the output directory and the trajectory log inside it.
    pub fn create(output_dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(output_dir)?;
        let mut trajectory = BufWriter::new(File::create(output_dir.join(TRAJECTORY_FILE))?);
        writeln!(trajectory, "{}", TRAJECTORY_HEADERS.iter().join(","))?;
        Ok(Self {
            trajectory,
            snapshot_path: output_dir.join(PLANETS_FILE),
        })
    }

    /// Appends one time-stamped state sample to the trajectory log.
    pub fn record_sample(
        &mut self,
        tick: u32,
        position: Vec3D<f64>,
        velocity: Vec3D<f64>,
        acceleration: Vec3D<f64>,
    ) -> io::Result<()> {
        let row = [
            position.x(),
            position.y(),
            position.z(),
            velocity.x(),
            velocity.y(),
            velocity.z(),
            acceleration.x(),
            acceleration.y(),
            acceleration.z(),
        ]
        .iter()
        .join(",");
        writeln!(self.trajectory, "{tick},{row}")
    }

    /// Writes the snapshot of every compiled planet as one JSON document.
    pub fn record_planets<'a>(
        &mut self,
        planets: impl Iterator<Item = &'a Planet>,
    ) -> io::Result<()> {
        let snapshots: Vec<PlanetSnapshot> = planets.map(PlanetSnapshot::from).collect();
        let file = File::create(&self.snapshot_path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), &snapshots).map_err(io::Error::from)
    }

    /// Flushes any buffered samples to disk.
    pub fn finish(mut self) -> io::Result<()> { self.trajectory.flush() }
}
