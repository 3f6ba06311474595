use strum_macros::Display;

/// Non-owning handle to a planet inside the world, held by a spacecraft for
/// its current association. Resolved against the world each tick; the
/// spacecraft never owns the planet it is associated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanetHandle {
    system: String,
    planet: String,
}

impl PlanetHandle {
    pub fn new(system: impl Into<String>, planet: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            planet: planet.into(),
        }
    }

    pub fn system(&self) -> &str { &self.system }
    pub fn planet(&self) -> &str { &self.planet }
}

impl std::fmt::Display for PlanetHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.system, self.planet)
    }
}

/// Association state of a spacecraft, re-evaluated once per tick.
///
/// `Associated` means the craft is inside the atmospheric regime of the
/// referenced planet; `Landed` is reached only on exact positional
/// coincidence with the target position.
#[derive(Debug, Display, Clone, PartialEq, Eq, Default)]
pub enum GuidanceState {
    #[default]
    Unassociated,
    Associated(PlanetHandle),
    Landed,
}

impl GuidanceState {
    pub fn is_associated(&self) -> bool { matches!(self, GuidanceState::Associated(_)) }
    pub fn is_landed(&self) -> bool { matches!(self, GuidanceState::Landed) }

    /// Returns the handle of the associated planet, if any.
    pub fn associated_planet(&self) -> Option<&PlanetHandle> {
        match self {
            GuidanceState::Associated(handle) => Some(handle),
            _ => None,
        }
    }
}
