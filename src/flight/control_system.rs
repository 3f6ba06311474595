use crate::flight::common::vec3d::Vec3D;
use crate::flight::pid::{ControlError, PidController};
use crate::flight::planet::Planet;

/// Arrival radius frozen into a target snapshot when steering at a planet.
/// Any approach below this distance begins the landing sequence.
pub const TARGET_ARRIVAL_RADIUS: f64 = 100_000.0;

/// Frozen snapshot of where the craft is currently steering.
///
/// Recomputed only when the guidance state machine selects a new target;
/// between recomputations it is immutable so the controller cascade sees a
/// stable setpoint for the tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetPlanet {
    name: String,
    target_position: Vec3D<f64>,
    arrival_radius: f64,
}

impl TargetPlanet {
    pub fn new(name: impl Into<String>, target_position: Vec3D<f64>, arrival_radius: f64) -> Self {
        Self {
            name: name.into(),
            target_position,
            arrival_radius,
        }
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn target_position(&self) -> Vec3D<f64> { self.target_position }
    pub fn arrival_radius(&self) -> f64 { self.arrival_radius }
}

/// The cascaded guidance control system of one spacecraft.
///
/// Owns the craft's kinematic state together with three independent PID
/// stages. Position and velocity stages form the committed cascade; the
/// acceleration stage is kept as the third stage of the chain and is fed
/// by the guidance error hook, but its output only shapes the (likewise
/// uncommitted) thrust vector and never reaches the committed velocity or
/// position update.
#[derive(Debug, Default)]
pub struct ControlSystem {
    position: Vec3D<f64>,
    velocity: Vec3D<f64>,
    acceleration: Vec3D<f64>,
    orientation: Vec3D<f64>,
    thrust: Vec3D<f64>,

    target_planet: TargetPlanet,
    target_velocity: Vec3D<f64>,
    target_acceleration: Vec3D<f64>,

    position_ctl: PidController,
    velocity_ctl: PidController,
    acceleration_ctl: PidController,
}

impl ControlSystem {
    pub fn new() -> Self { Self::default() }

    /// Runs the committed part of the cascade for one tick and integrates
    /// the result into the kinematic state.
    ///
    /// The position stage turns the positional error into a desired
    /// velocity; the velocity stage turns that into a commanded
    /// acceleration. The commanded acceleration is converted to a velocity
    /// over `dt`, clamped per axis to `max_velocity`, and committed as the
    /// new velocity (replacement, not accumulation), after which the
    /// position is integrated.
    pub fn integrate(&mut self, dt: f64, max_velocity: f64) -> Result<(), ControlError> {
        self.position_ctl.update(dt, self.target_planet.target_position(), self.position)?;
        self.velocity_ctl.update(dt, self.position_ctl.output(), self.velocity)?;

        let commanded_accel = self.velocity_ctl.output();
        let proposed_velocity = commanded_accel * dt;

        self.velocity = proposed_velocity.clamp_per_axis(max_velocity);
        self.position += self.velocity * dt;
        Ok(())
    }

    /// Error-accumulation hook of the acceleration stage.
    ///
    /// The scalar target error magnitude is accumulated on the x axis of
    /// the acceleration controller and its output lands in the thrust
    /// vector. Nothing committed by [`ControlSystem::integrate`] depends on
    /// either; the stage stays dormant.
    pub fn feed_target_error(&mut self, dt: f64, error: f64) -> Result<(), ControlError> {
        self.acceleration_ctl.update(dt, Vec3D::new(error, 0.0, 0.0), Vec3D::zero())?;
        self.thrust = Vec3D::new(self.acceleration_ctl.output().x(), 0.0, 0.0);
        Ok(())
    }

    /// Freezes a planet into the current target snapshot.
    pub fn set_target_planet(&mut self, planet: &Planet) {
        self.target_planet = TargetPlanet::new(
            planet.name(),
            planet.center_position(),
            TARGET_ARRIVAL_RADIUS,
        );
    }

    /// Acceleration produced by a thrust vector against the craft's mass,
    /// applied only while under a planet's atmospheric regime.
    pub fn apply_thrust(&mut self, thrust: Vec3D<f64>, mass: f64, associated: bool) {
        self.acceleration = if associated { thrust / mass } else { Vec3D::zero() };
    }

    pub fn position(&self) -> Vec3D<f64> { self.position }
    pub fn velocity(&self) -> Vec3D<f64> { self.velocity }
    pub fn acceleration(&self) -> Vec3D<f64> { self.acceleration }
    pub fn orientation(&self) -> Vec3D<f64> { self.orientation }
    pub fn thrust(&self) -> Vec3D<f64> { self.thrust }
    pub fn target_planet(&self) -> &TargetPlanet { &self.target_planet }
    pub fn target_velocity(&self) -> Vec3D<f64> { self.target_velocity }
    pub fn target_acceleration(&self) -> Vec3D<f64> { self.target_acceleration }

    pub fn set_position(&mut self, position: Vec3D<f64>) { self.position = position; }
    pub fn set_velocity(&mut self, velocity: Vec3D<f64>) { self.velocity = velocity; }
    pub fn set_acceleration(&mut self, acceleration: Vec3D<f64>) { self.acceleration = acceleration; }
    pub fn set_orientation(&mut self, orientation: Vec3D<f64>) { self.orientation = orientation; }
    pub fn set_thrust(&mut self, thrust: Vec3D<f64>) { self.thrust = thrust; }
    pub fn set_target(&mut self, target: TargetPlanet) { self.target_planet = target; }
    pub fn set_target_velocity(&mut self, v: Vec3D<f64>) { self.target_velocity = v; }
    pub fn set_target_acceleration(&mut self, a: Vec3D<f64>) { self.target_acceleration = a; }

    pub fn position_controller(&self) -> &PidController { &self.position_ctl }
    pub fn velocity_controller(&self) -> &PidController { &self.velocity_ctl }
    pub fn acceleration_controller(&self) -> &PidController { &self.acceleration_ctl }
}
