use crate::flight::guidance::PlanetHandle;
use crate::flight::planet::Planet;
use std::collections::BTreeMap;

/// A named grouping of planetary bodies, keyed by planet name.
#[derive(Debug, Default)]
pub struct System {
    name: String,
    planets: BTreeMap<String, Planet>,
}

impl System {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            planets: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn planets(&self) -> &BTreeMap<String, Planet> { &self.planets }

    pub fn add_planet(&mut self, planet: Planet) {
        self.planets.insert(planet.name().to_string(), planet);
    }

    pub fn remove_planet(&mut self, name: &str) -> Option<Planet> {
        self.planets.remove(name)
    }

    pub fn planet(&self, name: &str) -> Option<&Planet> { self.planets.get(name) }

    pub fn planet_mut(&mut self, name: &str) -> Option<&mut Planet> {
        self.planets.get_mut(name)
    }
}

/// All systems of a scenario. Owns every planetary body; spacecraft refer
/// into it with [`PlanetHandle`]s only.
#[derive(Debug, Default)]
pub struct World {
    systems: BTreeMap<String, System>,
}

impl World {
    pub fn new() -> Self { Self::default() }

    pub fn systems(&self) -> &BTreeMap<String, System> { &self.systems }

    pub fn add_system(&mut self, system: System) {
        self.systems.insert(system.name().to_string(), system);
    }

    pub fn system(&self, name: &str) -> Option<&System> { self.systems.get(name) }

    pub fn system_mut(&mut self, name: &str) -> Option<&mut System> {
        self.systems.get_mut(name)
    }

    /// Looks a planet up by name across every system, in system name
    /// order. The first match wins, which is deterministic because both
    /// maps are ordered.
    pub fn find_planet(&self, name: &str) -> Option<&Planet> {
        self.systems.values().find_map(|system| system.planet(name))
    }

    /// Resolves an association handle back to the planet it refers to.
    pub fn planet(&self, handle: &PlanetHandle) -> Option<&Planet> {
        self.systems.get(handle.system())?.planet(handle.planet())
    }

    /// Iterates every planet of every system.
    pub fn planets(&self) -> impl Iterator<Item = &Planet> {
        self.systems.values().flat_map(|system| system.planets().values())
    }
}
