use super::common::vec3d::Vec3D;
use super::{
    ControlError, ControlSystem, GuidanceState, PidController, Planet, PlanetHandle, Spacecraft,
    System, TargetPlanet, World,
};
use rand::{SeedableRng, rngs::StdRng};

fn make_planet(system: &str, name: &str, center: Vec3D<f64>, atmosphere_radius: f64) -> Planet {
    let mut rng = StdRng::seed_from_u64(1);
    let mut planet = Planet::new(system, name, 6000e3, 5.0e24, center, &mut rng);
    planet.set_gravitational_parameter(9.0);
    planet.set_atmosphere_radius(atmosphere_radius);
    planet
}

fn world_with(planets: Vec<Planet>) -> World {
    let mut world = World::new();
    for planet in planets {
        let system_name = planet.system_name().to_string();
        if world.system(&system_name).is_none() {
            world.add_system(System::new(system_name.clone()));
        }
        if let Some(system) = world.system_mut(&system_name) {
            system.add_planet(planet);
        }
    }
    world
}

#[test]
fn default_control_state_is_zeroed() {
    let ctl = ControlSystem::new();
    assert_eq!(ctl.position(), Vec3D::zero());
    assert_eq!(ctl.velocity(), Vec3D::zero());
    assert_eq!(ctl.thrust(), Vec3D::zero());
    assert_eq!(ctl.target_planet().target_position(), Vec3D::zero());
    assert_eq!(ctl.target_planet().arrival_radius(), 0.0);

    let target = TargetPlanet::default();
    assert_eq!(target.name(), "");
    assert_eq!(target.target_position(), Vec3D::zero());
}

#[test]
fn pid_rejects_non_positive_dt() {
    let mut ctl = PidController::default();
    let target = Vec3D::new(1.0, 2.0, 3.0);

    assert!(matches!(
        ctl.update(0.0, target, Vec3D::zero()),
        Err(ControlError::InvalidTimeStep(_))
    ));
    assert!(ctl.update(-1.0, target, Vec3D::zero()).is_err());
    assert!(ctl.update(f64::NAN, target, Vec3D::zero()).is_err());
    assert!(ctl.update(f64::INFINITY, target, Vec3D::zero()).is_err());

    // A rejected call must not disturb internal state.
    assert_eq!(ctl.integral(), Vec3D::zero());
    assert_eq!(ctl.output(), Vec3D::zero());
}

#[test]
fn pid_single_step_terms() {
    let mut ctl = PidController::new(0.1, 0.01, 0.001);
    ctl.update(1.0, Vec3D::new(10.0, 0.0, 0.0), Vec3D::zero()).unwrap();

    // p = 1.0, i = 0.1, d = 0.01 on the x axis; y and z stay untouched.
    assert!((ctl.output().x() - 1.11).abs() < 1e-12);
    assert_eq!(ctl.output().y(), 0.0);
    assert_eq!(ctl.output().z(), 0.0);
    assert_eq!(ctl.previous_error(), Vec3D::new(10.0, 0.0, 0.0));
}

#[test]
fn pid_is_deterministic() {
    let steps = [
        (1.0, Vec3D::new(3.0, -2.0, 7.0), Vec3D::new(1.0, 1.0, 1.0)),
        (0.5, Vec3D::new(2.5, -1.0, 6.0), Vec3D::new(1.2, 0.8, 1.5)),
        (0.5, Vec3D::new(2.0, 0.0, 5.0), Vec3D::new(1.4, 0.6, 2.0)),
    ];

    let mut a = PidController::default();
    let mut b = PidController::default();
    for (dt, target, current) in steps {
        a.update(dt, target, current).unwrap();
        b.update(dt, target, current).unwrap();
        assert_eq!(a.output(), b.output());
    }
    assert_eq!(a.integral(), b.integral());
    assert_eq!(a.previous_error(), b.previous_error());
}

#[test]
fn pid_integral_follows_error_sign() {
    let mut ctl = PidController::default();
    let mut last = 0.0;
    for _ in 0..5 {
        ctl.update(1.0, Vec3D::new(5.0, 0.0, 0.0), Vec3D::zero()).unwrap();
        assert!(ctl.integral().x() > last);
        last = ctl.integral().x();
    }

    let mut ctl = PidController::default();
    let mut last = 0.0;
    for _ in 0..5 {
        ctl.update(1.0, Vec3D::new(-5.0, 0.0, 0.0), Vec3D::zero()).unwrap();
        assert!(ctl.integral().x() < last);
        last = ctl.integral().x();
    }
}

#[test]
fn pid_zero_error_leaves_only_the_integral_term() {
    let mut ctl = PidController::default();
    ctl.update(1.0, Vec3D::new(10.0, 0.0, 0.0), Vec3D::zero()).unwrap();

    // With target == current the proportional term vanishes immediately and
    // the derivative term vanishes from the second equal call onward.
    ctl.update(1.0, Vec3D::zero(), Vec3D::zero()).unwrap();
    ctl.update(1.0, Vec3D::zero(), Vec3D::zero()).unwrap();
    let settled = ctl.output();
    ctl.update(1.0, Vec3D::zero(), Vec3D::zero()).unwrap();

    assert_eq!(ctl.output(), settled);
    assert!((settled.x() - ctl.integral().x() * 0.01).abs() < 1e-12);
}

#[test]
fn atmosphere_exit_disassociates() {
    let earth = make_planet("Sol", "Earth", Vec3D::zero(), 1000.0);
    let world = world_with(vec![earth]);

    let mut craft = Spacecraft::new("Pathfinder");
    craft.set_max_velocity(1.0e6);
    craft.set_state(GuidanceState::Associated(PlanetHandle::new("Sol", "Earth")));
    craft.control_mut().set_position(Vec3D::new(0.0, 0.0, 2000.0));
    craft.control_mut().set_target(TargetPlanet::new("Nowhere", Vec3D::new(1.0e9, 0.0, 0.0), 0.0));

    craft.tick(1.0, &world).unwrap();
    assert_eq!(*craft.state(), GuidanceState::Unassociated);
}

#[test]
fn exact_arrival_lands_and_zeroes_motion() {
    let world = World::new();
    let mut craft = Spacecraft::new("Pathfinder");
    craft.set_max_velocity(1.0e6);
    craft.control_mut().set_velocity(Vec3D::new(5.0, 5.0, 5.0));
    craft.control_mut().set_acceleration(Vec3D::new(1.0, 1.0, 1.0));
    craft.control_mut().set_target(TargetPlanet::new("Origin", Vec3D::zero(), 0.0));

    craft.tick(1.0, &world).unwrap();

    assert!(craft.state().is_landed());
    assert_eq!(craft.velocity(), Vec3D::zero());
    assert_eq!(craft.acceleration(), Vec3D::zero());
    assert_eq!(craft.position(), Vec3D::zero());
}

#[test]
fn entering_arrival_radius_reassociates_to_target() {
    let mars = make_planet("Sol", "Mars", Vec3D::new(50_000.0, 0.0, 0.0), 1.0e6);
    let world = world_with(vec![mars]);

    let mut craft = Spacecraft::new("Pathfinder");
    craft.set_max_velocity(1.0e6);
    if let Some(planet) = world.find_planet("Mars") {
        craft.set_target_planet(planet);
    }

    craft.tick(1.0, &world).unwrap();
    assert_eq!(
        *craft.state(),
        GuidanceState::Associated(PlanetHandle::new("Sol", "Mars"))
    );
}

#[test]
fn missing_target_planet_stays_unassociated() {
    let world = World::new();
    let mut craft = Spacecraft::new("Pathfinder");
    craft.set_max_velocity(1.0e6);
    craft.control_mut().set_target(TargetPlanet::new("Phantom", Vec3D::new(50.0, 0.0, 0.0), 1000.0));

    // The lookup miss is non-fatal: the tick succeeds and the craft simply
    // keeps flying without an association.
    craft.tick(1.0, &world).unwrap();
    assert_eq!(*craft.state(), GuidanceState::Unassociated);
}

#[test]
fn committed_velocity_is_clamped_exactly() {
    let world = World::new();
    let mut craft = Spacecraft::new("Pathfinder");
    craft.set_max_velocity(0.5);
    craft.control_mut().set_target(TargetPlanet::new("Beacon", Vec3D::new(1000.0, 0.0, 0.0), 0.0));

    craft.tick(1.0, &world).unwrap();
    assert_eq!(craft.velocity().x(), 0.5);

    let mut craft = Spacecraft::new("Pathfinder");
    craft.set_max_velocity(0.5);
    craft
        .control_mut()
        .set_target(TargetPlanet::new("Beacon", Vec3D::new(-1000.0, 0.0, 0.0), 0.0));

    craft.tick(1.0, &world).unwrap();
    assert_eq!(craft.velocity().x(), -0.5);
}

#[test]
fn committed_velocity_replaces_the_previous_one() {
    let world = World::new();
    let mut craft = Spacecraft::new("Pathfinder");
    craft.set_max_velocity(1.0e9);
    craft.control_mut().set_velocity(Vec3D::new(999.0, 0.0, 0.0));
    craft.control_mut().set_target(TargetPlanet::new("Beacon", Vec3D::new(1000.0, 0.0, 0.0), 0.0));

    craft.tick(1.0, &world).unwrap();

    // Position stage emits 111; the velocity stage sees an error of -888
    // and the commit overwrites the old velocity instead of adding to it.
    assert!((craft.velocity().x() + 98.568).abs() < 1e-9);
}

#[test]
fn acceleration_stage_is_fed_but_never_committed() {
    let world = World::new();
    let mut craft = Spacecraft::new("Pathfinder");
    craft.set_max_velocity(1.0e6);
    craft.control_mut().set_target(TargetPlanet::new("Beacon", Vec3D::new(1000.0, 0.0, 0.0), 0.0));

    craft.tick(1.0, &world).unwrap();
    craft.tick(1.0, &world).unwrap();

    let ctl = craft.control();
    assert!(ctl.acceleration_controller().integral().x() > 0.0);
    assert!(ctl.thrust().x() != 0.0);
    // Neither reaches the committed state.
    assert_eq!(craft.acceleration(), Vec3D::zero());
}

#[test]
fn tick_rejects_invalid_dt() {
    let world = World::new();
    let mut craft = Spacecraft::new("Pathfinder");
    assert!(craft.tick(0.0, &world).is_err());
    assert!(craft.tick(f64::NAN, &world).is_err());
}

#[test]
fn cascade_steers_toward_a_distant_target() {
    let world = World::new();
    let target_position = Vec3D::new(1000.0, 0.0, 0.0);
    let max_velocity = 50.0;

    let mut craft = Spacecraft::new("Pathfinder");
    craft.set_max_velocity(max_velocity);
    craft.control_mut().set_target(TargetPlanet::new("Beacon", target_position, 0.0));

    let initial_distance = craft.position().euclid_distance(&target_position);
    let mut previous_distance = initial_distance;
    for _ in 0..30 {
        craft.tick(1.0, &world).unwrap();

        let velocity = craft.velocity();
        assert!(velocity.x().abs() <= max_velocity);
        assert!(velocity.y().abs() <= max_velocity);
        assert!(velocity.z().abs() <= max_velocity);

        // Monotone approach holds while the distance is still large
        // relative to the speed cap; close to the target the cascade may
        // overshoot.
        let distance = craft.position().euclid_distance(&target_position);
        if previous_distance > 2.0 * max_velocity {
            assert!(distance < previous_distance);
        }
        previous_distance = distance;
    }

    let final_distance = craft.position().euclid_distance(&target_position);
    assert!(final_distance < initial_distance);
    assert!(final_distance < 200.0);
}

#[test]
fn surface_position_is_reproducible_under_a_seed() {
    let center = Vec3D::new(1.0e11, 0.0, 0.0);
    let mut rng_a = StdRng::seed_from_u64(7);
    let mut rng_b = StdRng::seed_from_u64(7);
    let a = Planet::new("Sol", "Earth", 6000e3, 5.0e24, center, &mut rng_a);
    let b = Planet::new("Sol", "Earth", 6000e3, 5.0e24, center, &mut rng_b);

    assert_eq!(a.surface_position(), b.surface_position());
    assert!((a.surface_position().magnitude() - 6000e3).abs() < 1.0);
}

#[test]
fn gravitational_acceleration_at_the_center_is_zero() {
    let planet = make_planet("Sol", "Earth", Vec3D::zero(), 1000.0);
    assert_eq!(planet.gravitational_acceleration(Vec3D::zero()), Vec3D::zero());
}

#[test]
fn air_density_collapses_to_zero_outside_the_model() {
    let planet = make_planet("Sol", "Earth", Vec3D::zero(), 1000.0);

    let sea_level = planet.air_density(0.0);
    assert!(sea_level > 1.0 && sea_level < 1.5);

    // Above the model's validity the temperature term goes negative and
    // the density collapses to zero instead of NaN.
    assert_eq!(planet.air_density(50_000.0), 0.0);
}

#[test]
fn guidance_state_displays_its_variant() {
    assert_eq!(GuidanceState::Unassociated.to_string(), "Unassociated");
    assert_eq!(GuidanceState::Landed.to_string(), "Landed");
}
