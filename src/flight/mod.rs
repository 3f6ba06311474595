pub(crate) mod common;
mod control_system;
mod guidance;
mod pid;
mod planet;
mod spacecraft;
mod system;

pub use control_system::{ControlSystem, TARGET_ARRIVAL_RADIUS, TargetPlanet};
pub use guidance::{GuidanceState, PlanetHandle};
pub use pid::{ControlError, PidController};
pub use planet::Planet;
pub use spacecraft::Spacecraft;
pub use system::{System, World};

#[cfg(test)]
mod tests;
