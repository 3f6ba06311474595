use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// File name (and first-line sentinel) of the system table.
pub const SYSTEMS_FILE: &str = "Systems.csv";
/// File name (and first-line sentinel) of the planet table.
pub const PLANETS_FILE: &str = "Planets.csv";
/// File name (and first-line sentinel) of the spacecraft table.
pub const SPACECRAFT_FILE: &str = "Spacecraft.csv";

const SYSTEM_HEADERS: &[&str] = &["name"];
const PLANET_HEADERS: &[&str] = &[
    "systemName",
    "name",
    "radius",
    "mass",
    "positionX",
    "positionY",
    "positionZ",
    "gravityParameter",
    "atmosphereRadius",
];
// `targetVelocitZ` is misspelled in the on-disk format and is matched as-is.
const SPACECRAFT_HEADERS: &[&str] = &[
    "name",
    "area",
    "mass",
    "angularVelocity",
    "maxVelocity",
    "targetVelocityX",
    "targetVelocityY",
    "targetVelocitZ",
    "targetAccelerationX",
    "targetAccelerationY",
    "targetAccelerationZ",
];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("could not open {path}: {source}")]
    Open { path: String, source: io::Error },
    #[error("read error in {path} at line {line}: {source}")]
    Read {
        path: String,
        line: usize,
        source: io::Error,
    },
    #[error("{path}: expected file sentinel {expected:?} but got {found:?}")]
    SentinelMismatch {
        path: String,
        expected: String,
        found: String,
    },
    #[error("{path}: expected {expected} header columns but got {found}")]
    HeaderCount {
        path: String,
        expected: usize,
        found: usize,
    },
    #[error("{path}: expected header {expected:?} at column {column} but got {found:?}")]
    HeaderMismatch {
        path: String,
        column: usize,
        expected: String,
        found: String,
    },
    #[error("{path} line {line}: expected {expected} fields but got {found}")]
    FieldCount {
        path: String,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{path} line {line}: could not convert {value:?} to a number")]
    NumericField {
        path: String,
        line: usize,
        value: String,
    },
}

/// Initialization record for a system grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemRecord {
    pub name: String,
}

/// Initialization record for one planetary body.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetRecord {
    pub system_name: String,
    pub name: String,
    pub radius: f64,
    pub mass: f64,
    pub position_x: f64,
    pub position_y: f64,
    pub position_z: f64,
    pub gravity_parameter: f64,
    pub atmosphere_radius: f64,
}

/// Initialization record for one spacecraft.
#[derive(Debug, Clone, PartialEq)]
pub struct SpacecraftRecord {
    pub name: String,
    pub area: f64,
    pub mass: f64,
    pub angular_velocity: f64,
    pub max_velocity: f64,
    pub target_velocity_x: f64,
    pub target_velocity_y: f64,
    pub target_velocity_z: f64,
    pub target_acceleration_x: f64,
    pub target_acceleration_y: f64,
    pub target_acceleration_z: f64,
}

/// Line-oriented reader for the scenario's tabular files.
///
/// Layout: line 1 is a sentinel equal to the file name, line 2 carries the
/// column headers (validated by exact name and order), every further line
/// is one comma-separated data row until end of file.
pub struct CsvTable {
    path: String,
    lines: io::Lines<BufReader<File>>,
    line_no: usize,
}

impl CsvTable {
    pub fn open(path: &Path) -> Result<Self, IngestError> {
        let display = path.display().to_string();
        let file = File::open(path).map_err(|source| IngestError::Open {
            path: display.clone(),
            source,
        })?;
        Ok(Self {
            path: display,
            lines: BufReader::new(file).lines(),
            line_no: 0,
        })
    }

    fn next_line(&mut self) -> Result<Option<String>, IngestError> {
        self.line_no += 1;
        match self.lines.next() {
            None => Ok(None),
            Some(Ok(line)) => Ok(Some(line.trim_end_matches('\r').to_string())),
            Some(Err(source)) => Err(IngestError::Read {
                path: self.path.clone(),
                line: self.line_no,
                source,
            }),
        }
    }

    /// Verifies the first-line sentinel against the expected file name.
    pub fn verify_sentinel(&mut self, expected: &str) -> Result<(), IngestError> {
        let found = self.next_line()?.unwrap_or_default();
        if found != expected {
            return Err(IngestError::SentinelMismatch {
                path: self.path.clone(),
                expected: expected.to_string(),
                found,
            });
        }
        Ok(())
    }

    /// Verifies the header line: exact column names, exact order.
    pub fn verify_headers(&mut self, expected: &[&str]) -> Result<(), IngestError> {
        let line = self.next_line()?.unwrap_or_default();
        let found: Vec<&str> = line.split(',').collect();
        if found.len() != expected.len() {
            return Err(IngestError::HeaderCount {
                path: self.path.clone(),
                expected: expected.len(),
                found: found.len(),
            });
        }
        for (column, (want, got)) in expected.iter().zip(&found).enumerate() {
            if want != got {
                return Err(IngestError::HeaderMismatch {
                    path: self.path.clone(),
                    column,
                    expected: (*want).to_string(),
                    found: (*got).to_string(),
                });
            }
        }
        Ok(())
    }

    /// Reads the next data row, or `None` once the data is exhausted.
    /// A trailing blank line counts as end of data.
    pub fn next_row(&mut self, fields: usize) -> Result<Option<Vec<String>>, IngestError> {
        match self.next_line()? {
            None => Ok(None),
            Some(line) if line.is_empty() => Ok(None),
            Some(line) => {
                let row: Vec<String> = line.split(',').map(str::to_string).collect();
                if row.len() != fields {
                    return Err(IngestError::FieldCount {
                        path: self.path.clone(),
                        line: self.line_no,
                        expected: fields,
                        found: row.len(),
                    });
                }
                Ok(Some(row))
            }
        }
    }

    /// Converts one field of the current row to a finite number, failing
    /// loudly on non-numeric or out-of-range text.
    pub fn numeric_field(&self, row: &[String], idx: usize) -> Result<f64, IngestError> {
        let value = &row[idx];
        match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(IngestError::NumericField {
                path: self.path.clone(),
                line: self.line_no,
                value: value.clone(),
            }),
        }
    }
}

pub fn load_systems(dir: &Path) -> Result<Vec<SystemRecord>, IngestError> {
    let mut table = CsvTable::open(&dir.join(SYSTEMS_FILE))?;
    table.verify_sentinel(SYSTEMS_FILE)?;
    table.verify_headers(SYSTEM_HEADERS)?;

    let mut records = Vec::new();
    while let Some(row) = table.next_row(SYSTEM_HEADERS.len())? {
        records.push(SystemRecord { name: row[0].clone() });
    }
    Ok(records)
}

pub fn load_planets(dir: &Path) -> Result<Vec<PlanetRecord>, IngestError> {
    let mut table = CsvTable::open(&dir.join(PLANETS_FILE))?;
    table.verify_sentinel(PLANETS_FILE)?;
    table.verify_headers(PLANET_HEADERS)?;

    let mut records = Vec::new();
    while let Some(row) = table.next_row(PLANET_HEADERS.len())? {
        records.push(PlanetRecord {
            system_name: row[0].clone(),
            name: row[1].clone(),
            radius: table.numeric_field(&row, 2)?,
            mass: table.numeric_field(&row, 3)?,
            position_x: table.numeric_field(&row, 4)?,
            position_y: table.numeric_field(&row, 5)?,
            position_z: table.numeric_field(&row, 6)?,
            gravity_parameter: table.numeric_field(&row, 7)?,
            atmosphere_radius: table.numeric_field(&row, 8)?,
        });
    }
    Ok(records)
}

pub fn load_spacecraft(dir: &Path) -> Result<Vec<SpacecraftRecord>, IngestError> {
    let mut table = CsvTable::open(&dir.join(SPACECRAFT_FILE))?;
    table.verify_sentinel(SPACECRAFT_FILE)?;
    table.verify_headers(SPACECRAFT_HEADERS)?;

    let mut records = Vec::new();
    while let Some(row) = table.next_row(SPACECRAFT_HEADERS.len())? {
        records.push(SpacecraftRecord {
            name: row[0].clone(),
            area: table.numeric_field(&row, 1)?,
            mass: table.numeric_field(&row, 2)?,
            angular_velocity: table.numeric_field(&row, 3)?,
            max_velocity: table.numeric_field(&row, 4)?,
            target_velocity_x: table.numeric_field(&row, 5)?,
            target_velocity_y: table.numeric_field(&row, 6)?,
            target_velocity_z: table.numeric_field(&row, 7)?,
            target_acceleration_x: table.numeric_field(&row, 8)?,
            target_acceleration_y: table.numeric_field(&row, 9)?,
            target_acceleration_z: table.numeric_field(&row, 10)?,
        });
    }
    Ok(records)
}
