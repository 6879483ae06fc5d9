use crate::core::config::require_positive;
use crate::error::SimulationError;
use crate::math::{Quaternion, Vector3, EPSILON};
use crate::vehicle::WHEEL_COUNT;
use crate::Result;

#[cfg(feature = "serialize")]
use serde::{Serialize, Deserialize};

/// Initial geometry and mass distribution of a vehicle.
///
/// `location` is the world anchor; the body and wheel locations are relative
/// to it and stay relative for the lifetime of the simulator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct VehicleDescriptor {
    pub body_mass: f32,
    pub wheel_mass: f32,

    /// World anchor of the vehicle
    pub location: Vector3,

    /// Shared initial orientation of body and wheels
    pub orientation: Quaternion,

    /// Half extents of the body box. Reported back to the host, not simulated.
    pub body_box_extent: Vector3,

    pub wheel_radius: f32,
    pub linear_velocity: Vector3,
    pub angular_velocity: Vector3,
    pub body_relative_location: Vector3,
    pub wheel_relative_locations: [Vector3; WHEEL_COUNT],
}

impl Default for VehicleDescriptor {
    fn default() -> Self {
        Self {
            body_mass: 100.0,
            wheel_mass: 20.0,
            location: Vector3::zero(),
            orientation: Quaternion::identity(),
            body_box_extent: Vector3::new(150.0, 150.0, 50.0),
            wheel_radius: 20.0,
            linear_velocity: Vector3::zero(),
            angular_velocity: Vector3::zero(),
            body_relative_location: Vector3::zero(),
            wheel_relative_locations: [
                Vector3::new(100.0, 100.0, -50.0),
                Vector3::new(100.0, -100.0, -50.0),
                Vector3::new(-100.0, 100.0, -50.0),
                Vector3::new(-100.0, -100.0, -50.0),
            ],
        }
    }
}

impl VehicleDescriptor {
    /// Rejects non-physical masses, radii and orientations
    pub fn validate(&self) -> Result<()> {
        require_positive("body_mass", self.body_mass)?;
        require_positive("wheel_mass", self.wheel_mass)?;
        require_positive("wheel_radius", self.wheel_radius)?;

        if !(self.orientation.length() > EPSILON) {
            return Err(SimulationError::InvalidParameter(format!(
                "orientation {} cannot be normalized",
                self.orientation
            )));
        }

        let vectors = [
            ("location", self.location),
            ("body_box_extent", self.body_box_extent),
            ("linear_velocity", self.linear_velocity),
            ("angular_velocity", self.angular_velocity),
            ("body_relative_location", self.body_relative_location),
        ];
        for (name, value) in vectors {
            if !value.is_finite() {
                return Err(SimulationError::InvalidParameter(format!("{} must be finite, got {}", name, value)));
            }
        }

        for (i, wheel) in self.wheel_relative_locations.iter().enumerate() {
            if !wheel.is_finite() {
                return Err(SimulationError::InvalidParameter(format!(
                    "wheel {} location must be finite, got {}",
                    i, wheel
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_vehicle_is_valid() {
        assert!(VehicleDescriptor::default().validate().is_ok());
    }

    #[test]
    fn non_positive_mass_is_rejected() {
        let descriptor = VehicleDescriptor { wheel_mass: -1.0, ..Default::default() };
        assert!(matches!(descriptor.validate(), Err(SimulationError::InvalidParameter(_))));
    }

    #[test]
    fn zero_quaternion_is_rejected() {
        let descriptor = VehicleDescriptor {
            orientation: Quaternion::new(0.0, 0.0, 0.0, 0.0),
            ..Default::default()
        };
        assert!(descriptor.validate().is_err());
    }

    #[test]
    fn nan_wheel_location_is_rejected() {
        let mut descriptor = VehicleDescriptor::default();
        descriptor.wheel_relative_locations[2].z = f32::NAN;
        assert!(descriptor.validate().is_err());
    }
}
