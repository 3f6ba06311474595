use crate::flight::common::vec3d::Vec3D;
use crate::flight::control_system::{ControlSystem, TargetPlanet};
use crate::flight::guidance::{GuidanceState, PlanetHandle};
use crate::flight::pid::ControlError;
use crate::flight::planet::Planet;
use crate::flight::system::World;
use crate::{info, log, warn};

/// Mass assigned to a craft before its ingestion record is applied.
const DEFAULT_MASS: f64 = 1000.0;

/// One spacecraft: identity, physical attributes, guidance state and the
/// owned control system. Mutated exclusively by the simulation loop; the
/// world is only ever borrowed into the tick.
#[derive(Debug)]
pub struct Spacecraft {
    name: String,
    mass: f64,
    area: f64,
    angular_velocity: f64,
    max_velocity: f64,
    state: GuidanceState,
    ctl: ControlSystem,
}

impl Spacecraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mass: DEFAULT_MASS,
            area: 0.0,
            angular_velocity: 0.0,
            max_velocity: 0.0,
            state: GuidanceState::Unassociated,
            ctl: ControlSystem::new(),
        }
    }

    /// Advances the craft by one discrete step.
    ///
    /// Re-evaluates the association state machine first, then runs the
    /// committed controller cascade and integrates the result. A bad `dt`
    /// is rejected before any state is touched.
    pub fn tick(&mut self, dt: f64, world: &World) -> Result<(), ControlError> {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(ControlError::InvalidTimeStep(dt));
        }
        self.update_guidance(dt, world)?;
        self.ctl.integrate(dt, self.max_velocity)
    }

    /// One pass of the guidance/association state machine.
    ///
    /// Transition order is fixed: atmosphere-exit check, arrival check
    /// (exact positional coincidence lands the craft; entering the arrival
    /// radius re-associates it to the target planet), orientation update,
    /// and finally the acceleration-stage error hook.
    fn update_guidance(&mut self, dt: f64, world: &World) -> Result<(), ControlError> {
        if let Some(handle) = self.state.associated_planet() {
            match world.planet(handle) {
                Some(planet) => {
                    let home_error = self.ctl.position() - planet.center_position();
                    if home_error.magnitude() > planet.atmosphere_radius() {
                        log!("{} left the atmosphere of {handle}", self.name);
                        self.state = GuidanceState::Unassociated;
                    }
                }
                None => {
                    warn!(
                        "associated planet {handle} no longer exists, disassociating {}",
                        self.name
                    );
                    self.state = GuidanceState::Unassociated;
                }
            }
        }

        let target = self.ctl.target_planet().clone();
        let to_target = self.ctl.position().to(&target.target_position());
        let target_error = to_target.magnitude();

        // Landing requires exact coincidence. The run loop terminates on a
        // separate tolerance, so this stays a bitwise-equality transition.
        if target_error == 0.0 {
            info!("target error is zero, {} has landed", self.name);
            self.state = GuidanceState::Landed;
            self.ctl.set_velocity(Vec3D::zero());
            self.ctl.set_acceleration(Vec3D::zero());
        } else if target_error < target.arrival_radius() {
            self.state = GuidanceState::Unassociated;
            match world.find_planet(target.name()) {
                Some(planet) => {
                    let handle = PlanetHandle::new(planet.system_name(), planet.name());
                    log!("{} entered the arrival radius of {handle}", self.name);
                    self.state = GuidanceState::Associated(handle);
                }
                None => {
                    warn!(
                        "could not find target planet {:?} in any system, {} stays unassociated",
                        target.name(),
                        self.name
                    );
                }
            }
        }

        self.ctl.set_orientation(to_target.normalize());
        self.ctl.feed_target_error(dt, target_error)
    }

    /// Associates the craft with its home planet and places it at the
    /// planet's center position.
    pub fn set_home_planet(&mut self, planet: &Planet) {
        self.state =
            GuidanceState::Associated(PlanetHandle::new(planet.system_name(), planet.name()));
        self.ctl.set_position(planet.center_position());
    }

    pub fn set_target_planet(&mut self, planet: &Planet) { self.ctl.set_target_planet(planet); }

    pub fn name(&self) -> &str { &self.name }
    pub fn mass(&self) -> f64 { self.mass }
    pub fn area(&self) -> f64 { self.area }
    pub fn angular_velocity(&self) -> f64 { self.angular_velocity }
    pub fn max_velocity(&self) -> f64 { self.max_velocity }
    pub fn state(&self) -> &GuidanceState { &self.state }

    pub fn set_mass(&mut self, mass: f64) { self.mass = mass; }
    pub fn set_area(&mut self, area: f64) { self.area = area; }
    pub fn set_angular_velocity(&mut self, av: f64) { self.angular_velocity = av; }
    pub fn set_max_velocity(&mut self, max_v: f64) { self.max_velocity = max_v; }
    pub fn set_state(&mut self, state: GuidanceState) { self.state = state; }

    pub fn position(&self) -> Vec3D<f64> { self.ctl.position() }
    pub fn velocity(&self) -> Vec3D<f64> { self.ctl.velocity() }
    pub fn acceleration(&self) -> Vec3D<f64> { self.ctl.acceleration() }
    pub fn orientation(&self) -> Vec3D<f64> { self.ctl.orientation() }
    pub fn target_planet(&self) -> &TargetPlanet { self.ctl.target_planet() }

    pub fn control(&self) -> &ControlSystem { &self.ctl }
    pub fn control_mut(&mut self) -> &mut ControlSystem { &mut self.ctl }
}
