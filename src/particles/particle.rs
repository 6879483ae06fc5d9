use crate::math::{Axis, Matrix3, Quaternion, Vector3};
use crate::particles::{DriveDirection, TurnDirection};

/// Velocity change applied to each horizontal axis by a single drive command
pub const DEFAULT_DRIVE_IMPULSE: f32 = 20.0;

/// A point mass with an orientation, integrated with explicit Euler
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Mass, fixed at construction
    mass: f32,

    /// Position relative to the vehicle anchor
    position: Vector3,

    /// Unit orientation quaternion
    orientation: Quaternion,

    linear_velocity: Vector3,

    angular_velocity: Vector3,

    /// Forces gathered since the last integration step
    force_accumulator: Vector3,
}

impl Particle {
    /// Creates a particle at rest with identity orientation
    pub fn new(mass: f32, position: Vector3) -> Self {
        Self::with_state(
            mass,
            position,
            Quaternion::identity(),
            Vector3::zero(),
            Vector3::zero(),
        )
    }

    /// Creates a particle with a full initial state
    pub fn with_state(
        mass: f32,
        position: Vector3,
        orientation: Quaternion,
        linear_velocity: Vector3,
        angular_velocity: Vector3,
    ) -> Self {
        debug_assert!(mass > 0.0 && mass.is_finite(), "particle mass must be positive");

        Self {
            mass,
            position,
            orientation: orientation.normalize(),
            linear_velocity,
            angular_velocity,
            force_accumulator: Vector3::zero(),
        }
    }

    /// Returns the particle's mass
    pub fn get_mass(&self) -> f32 {
        self.mass
    }

    /// Returns the particle's position relative to the vehicle anchor
    pub fn get_position(&self) -> Vector3 {
        self.position
    }

    /// Returns the particle's orientation
    pub fn get_orientation(&self) -> Quaternion {
        self.orientation
    }

    /// Returns the particle's linear velocity
    pub fn get_linear_velocity(&self) -> Vector3 {
        self.linear_velocity
    }

    /// Overwrites one component of the linear velocity.
    ///
    /// Used by friction snapping and the frame constraint, which act on velocity
    /// directly instead of through the accumulator.
    pub fn set_linear_velocity_component(&mut self, axis: Axis, value: f32) {
        self.linear_velocity[axis] = value;
    }

    /// Returns the particle's angular velocity
    pub fn get_angular_velocity(&self) -> Vector3 {
        self.angular_velocity
    }

    /// Returns the force gathered so far this step
    pub fn get_force_accumulator(&self) -> Vector3 {
        self.force_accumulator
    }

    /// Adds a force to the accumulator
    pub fn add_force(&mut self, force: Vector3) {
        self.force_accumulator += force;
    }

    /// Integrates the accumulated force over `dt` and clears the accumulator.
    ///
    /// Velocity is updated first and the new velocity moves the position.
    /// Orientation is left alone; it only changes through [`Particle::turn`].
    pub fn integrate(&mut self, dt: f32) {
        self.linear_velocity += self.force_accumulator * (dt / self.mass);
        self.position += self.linear_velocity * dt;

        self.force_accumulator = Vector3::zero();
    }

    /// Adds the throttle impulse to both horizontal velocity components
    pub fn drive(&mut self, direction: DriveDirection, impulse: f32) {
        let delta = direction.sign() * impulse;
        for axis in Axis::HORIZONTAL {
            self.linear_velocity[axis] += delta;
        }
    }

    /// Applies `torque` for `dt` and rotates the orientation by the resulting
    /// angular velocity.
    ///
    /// The rotation increment is composed in the parent frame (pre-multiplied)
    /// and the result renormalized. A singular `inertia` leaves the angular
    /// velocity untouched.
    pub fn turn(&mut self, direction: TurnDirection, torque: Vector3, dt: f32, inertia: &Matrix3) {
        match inertia.inverse() {
            Some(inv_inertia) => {
                self.angular_velocity += inv_inertia * (torque * (direction.sign() * dt));
            }
            None => {
                tracing::warn!("singular inertia tensor, torque ignored");
            }
        }

        let delta = Quaternion::from_angular_velocity(self.angular_velocity, dt);
        self.orientation = (delta * self.orientation).normalize();
    }
}
