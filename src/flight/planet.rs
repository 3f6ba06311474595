use crate::flight::common::vec3d::Vec3D;
use rand::Rng;
use std::f64::consts::PI;

/// Drag coefficient parameter assigned to every body at construction.
const DRAG_COEFFICIENT: f64 = 2.0;
/// Fixed air temperature assigned at construction.
/// TODO: vary the air temperature with altitude once the drag path is live.
const AIR_TEMPERATURE: f64 = 70.0;
/// Scale height of the exponential atmospheric density model.
const DENSITY_SCALE_HEIGHT: f64 = 7e5;

/// A planetary body, immutable after scenario compilation except for the
/// gravitational parameter and atmosphere radius, which are set once from
/// the ingested record.
///
/// The gravity and drag accessors are advisory in the current control
/// loop: the committed integration path does not invoke them, but they
/// are part of the body model and are exercised by tests.
#[derive(Debug, Clone)]
pub struct Planet {
    system_name: String,
    name: String,
    radius: f64,
    mass: f64,
    center_position: Vec3D<f64>,
    surface_position: Vec3D<f64>,
    gravitational_parameter: f64,
    atmosphere_radius: f64,
    drag_coefficient: f64,
    air_temperature: f64,
}

impl Planet {
    /// Creates a body with a randomly sampled surface position. The random
    /// source is passed in explicitly so scenarios stay reproducible under
    /// a fixed seed.
    pub fn new(
        system_name: impl Into<String>,
        name: impl Into<String>,
        radius: f64,
        mass: f64,
        center_position: Vec3D<f64>,
        rng: &mut impl Rng,
    ) -> Self {
        Self {
            system_name: system_name.into(),
            name: name.into(),
            radius,
            mass,
            center_position,
            surface_position: Self::sample_surface_position(radius, rng),
            gravitational_parameter: 0.0,
            atmosphere_radius: 0.0,
            drag_coefficient: DRAG_COEFFICIENT,
            air_temperature: AIR_TEMPERATURE,
        }
    }

    /// Samples a uniformly random point on the sphere of the given radius,
    /// as an offset from the planet center.
    fn sample_surface_position(radius: f64, rng: &mut impl Rng) -> Vec3D<f64> {
        let theta = rng.random_range(0.0..2.0 * PI);
        let phi = rng.random_range(0.0..PI);

        Vec3D::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        )
    }

    pub fn system_name(&self) -> &str { &self.system_name }
    pub fn name(&self) -> &str { &self.name }
    pub fn radius(&self) -> f64 { self.radius }
    pub fn mass(&self) -> f64 { self.mass }
    pub fn center_position(&self) -> Vec3D<f64> { self.center_position }
    pub fn surface_position(&self) -> Vec3D<f64> { self.surface_position }
    pub fn gravitational_parameter(&self) -> f64 { self.gravitational_parameter }
    pub fn atmosphere_radius(&self) -> f64 { self.atmosphere_radius }
    pub fn drag_coefficient_parameter(&self) -> f64 { self.drag_coefficient }
    pub fn air_temperature(&self) -> f64 { self.air_temperature }

    pub fn set_gravitational_parameter(&mut self, gp: f64) { self.gravitational_parameter = gp; }
    pub fn set_atmosphere_radius(&mut self, ar: f64) { self.atmosphere_radius = ar; }

    pub fn is_landed(&self, altitude: f64) -> bool { altitude < self.radius }

    /// Gravity at the given altitude above the surface.
    pub fn gravity(&self, altitude: f64) -> f64 {
        (self.mass * self.gravitational_parameter) / (altitude + self.radius).powi(2)
    }

    /// Exponential atmospheric density falloff with altitude.
    pub fn atmospheric_density(&self, altitude: f64) -> f64 {
        (-altitude / DENSITY_SCALE_HEIGHT).exp()
    }

    /// Gravitational acceleration toward the body for a craft at `position`.
    /// A zero distance yields the zero vector.
    pub fn gravitational_acceleration(&self, position: Vec3D<f64>) -> Vec3D<f64> {
        let distance = position.magnitude();
        if distance == 0.0 {
            return Vec3D::zero();
        }
        position.normalize() * (-self.gravitational_parameter / (distance * distance))
    }

    /// Drag deceleration opposing the given velocity.
    pub fn drag_acceleration(&self, velocity: Vec3D<f64>) -> Vec3D<f64> {
        velocity * (-self.drag_coefficient * velocity.magnitude())
    }

    /// Air density from the International Standard Atmosphere model.
    /// Altitudes outside the model's validity collapse to zero instead of
    /// producing `NaN`.
    pub fn air_density(&self, altitude: f64) -> f64 {
        let t0 = 288.15;
        let p0 = 101_325.0;
        let lapse = -0.0065;
        let g = 9.806_65;
        let r = 287.05;

        let t = t0 + lapse * altitude;
        let p = p0 * (t / t0).powf(-g / (r * lapse));

        let result = p / (r * t);
        if result.is_nan() { 0.0 } else { result }
    }

    /// Velocity-dependent drag coefficient.
    pub fn drag_coefficient(&self, velocity: f64) -> f64 { 0.5 * velocity.powi(2) }

    /// Cross-sectional area presented by a craft of the given frontal area.
    pub fn cross_sectional_area(&self, area: f64) -> f64 { PI * area.powi(2) }

    /// Upper bound on the drag force for a craft at its velocity limit.
    pub fn max_drag_force(&self, craft_area: f64, craft_max_velocity: f64, altitude: f64) -> f64 {
        let cross = self.cross_sectional_area(craft_area);
        0.5 * self.air_density(altitude) * self.drag_coefficient * cross * craft_max_velocity.powi(2)
    }

    /// Air resistance force opposing the craft's motion,
    /// `F = 0.5 * rho * v^2 * Cd * A` along the negated velocity direction.
    pub fn air_resistance(&self, velocity: Vec3D<f64>, altitude: f64, area: f64) -> Vec3D<f64> {
        let rho = self.air_density(altitude);
        let v = velocity.magnitude();
        let cd = self.drag_coefficient(v);
        let a = self.cross_sectional_area(area);

        let air_resistance = 0.5 * rho * v * v * cd * a;
        velocity.normalize() * (-air_resistance)
    }

    /// Air resistance capped at `max_air_resistance` in magnitude.
    pub fn limited_air_resistance(
        &self,
        velocity: Vec3D<f64>,
        altitude: f64,
        area: f64,
        max_air_resistance: f64,
    ) -> Vec3D<f64> {
        let air_res = self.air_resistance(velocity, altitude, area);
        if air_res.magnitude() > max_air_resistance {
            return air_res.normalize() * max_air_resistance;
        }
        air_res
    }
}
