use crate::flight::common::vec3d::Vec3D;
use std::error::Error;
use strum_macros::Display;

/// Default proportional gain for every cascade stage, tuned for the bundled scenario.
pub const DEFAULT_KP: f64 = 0.1;
/// Default integral gain for every cascade stage.
pub const DEFAULT_KI: f64 = 0.01;
/// Default derivative gain for every cascade stage.
pub const DEFAULT_KD: f64 = 0.001;

#[derive(Debug, Display, Clone, Copy, PartialEq)]
pub enum ControlError {
    /// A zero, negative or non-finite time step was passed to a controller.
    /// Derivative terms are undefined for `dt <= 0`, so the call is rejected
    /// instead of propagating `Inf`/`NaN` into the cascade.
    #[strum(to_string = "invalid controller time step: {0}")]
    InvalidTimeStep(f64),
}

impl Error for ControlError {}

/// A single PID stage of the guidance cascade.
///
/// Each axis is fully decoupled: the controller is a plain per-component
/// PID over `Vec3D<f64>` with a running integral accumulator that is never
/// reset during a run. Output clamping and anti-windup are deliberately the
/// caller's responsibility.
#[derive(Debug, Clone)]
pub struct PidController {
    kp: f64,
    ki: f64,
    kd: f64,
    integral: Vec3D<f64>,
    previous_error: Vec3D<f64>,
    output: Vec3D<f64>,
}

impl Default for PidController {
    fn default() -> Self { Self::new(DEFAULT_KP, DEFAULT_KI, DEFAULT_KD) }
}

impl PidController {
    /// Creates a controller with explicit gains.
    ///
    /// # Arguments
    /// * `kp` - Proportional gain.
    /// * `ki` - Integral gain.
    /// * `kd` - Derivative gain.
    pub fn new(kp: f64, ki: f64, kd: f64) -> Self {
        Self {
            kp,
            ki,
            kd,
            integral: Vec3D::zero(),
            previous_error: Vec3D::zero(),
            output: Vec3D::zero(),
        }
    }

    /// Advances the controller by one step of `dt` toward `target`.
    ///
    /// Per axis: proportional term from the current error, integral term
    /// from the accumulated error, derivative term from the error delta
    /// against the previous call. The error is stored afterwards for the
    /// next derivative computation.
    ///
    /// # Errors
    /// [`ControlError::InvalidTimeStep`] if `dt` is not strictly positive
    /// and finite.
    pub fn update(
        &mut self,
        dt: f64,
        target: Vec3D<f64>,
        current: Vec3D<f64>,
    ) -> Result<(), ControlError> {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(ControlError::InvalidTimeStep(dt));
        }

        let error = target - current;
        let proportional = error * self.kp;

        self.integral += error * dt;
        let integral = self.integral * self.ki;

        let derivative = (error - self.previous_error) / dt * self.kd;

        self.output = proportional + integral + derivative;
        self.previous_error = error;
        Ok(())
    }

    pub fn output(&self) -> Vec3D<f64> { self.output }
    pub fn integral(&self) -> Vec3D<f64> { self.integral }
    pub fn previous_error(&self) -> Vec3D<f64> { self.previous_error }
    pub fn gains(&self) -> (f64, f64, f64) { (self.kp, self.ki, self.kd) }
}
