use crate::error::SimulationError;
use crate::forces::DEFAULT_REST_TOLERANCE;
use crate::particles::DEFAULT_DRIVE_IMPULSE;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Tunable constants of the vehicle model
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct VehicleConfig {
    /// Magnitude of the downward gravitational acceleration
    pub gravity_magnitude: f32,

    /// Stiffness of every suspension spring
    pub spring_constant: f32,

    /// Extra fraction of the approach velocity removed by a ground contact
    pub restitution_loss: f32,

    /// Friction coefficient between wheels and ground
    pub friction_damping: f32,

    /// Vertical speed below which a wheel in contact is considered at rest
    pub contact_rest_tolerance: f32,

    /// Horizontal velocity added per drive command
    pub drive_impulse: f32,

    /// Force at the rim used to derive the steering torque
    pub turn_force: f32,

    /// Lever arm of the steering torque
    pub turn_radius: f32,

    /// Nominal time step used for every turn command, independent of the frame step
    pub turn_time_step: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            gravity_magnitude: 10.0,
            spring_constant: 100.0,
            restitution_loss: 0.2,
            friction_damping: 1.0,
            contact_rest_tolerance: DEFAULT_REST_TOLERANCE,
            drive_impulse: DEFAULT_DRIVE_IMPULSE,
            turn_force: 1000.0,
            turn_radius: 10.0,
            turn_time_step: 0.02,
        }
    }
}

impl VehicleConfig {
    /// Checks that every constant is usable by the force model
    pub fn validate(&self) -> Result<()> {
        require_positive("gravity_magnitude", self.gravity_magnitude)?;
        // divides the per-wheel body weight when deriving rest lengths
        require_positive("spring_constant", self.spring_constant)?;
        require_positive("turn_time_step", self.turn_time_step)?;
        require_non_negative("restitution_loss", self.restitution_loss)?;
        require_non_negative("friction_damping", self.friction_damping)?;
        require_non_negative("contact_rest_tolerance", self.contact_rest_tolerance)?;
        require_finite("drive_impulse", self.drive_impulse)?;
        require_finite("turn_force", self.turn_force)?;
        require_finite("turn_radius", self.turn_radius)?;
        Ok(())
    }
}

pub(crate) fn require_positive(name: &str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter(format!("{} must be positive and finite, got {}", name, value)))
    }
}

fn require_non_negative(name: &str, value: f32) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter(format!("{} must be non-negative and finite, got {}", name, value)))
    }
}

fn require_finite(name: &str, value: f32) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter(format!("{} must be finite, got {}", name, value)))
    }
}
