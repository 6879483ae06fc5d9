use crate::core::{ContactSet, ParticleHandle, ParticleStorage};
use crate::forces::ForceGenerator;
use crate::math::Vector3;
use std::any::Any;

/// A force generator that applies uniform gravity to its target
#[derive(Debug, Clone)]
pub struct GravityForce {
    /// The gravity acceleration vector
    gravity: Vector3,
}

impl GravityForce {
    /// Creates a new gravity force generator with the given acceleration
    pub fn new(gravity: Vector3) -> Self {
        Self { gravity }
    }

    /// Creates a gravity generator pulling along -Z with the given magnitude
    pub fn downward(magnitude: f32) -> Self {
        Self::new(Vector3::new(0.0, 0.0, -magnitude))
    }

    /// Gets the gravity acceleration
    pub fn get_gravity(&self) -> Vector3 {
        self.gravity
    }
}

impl ForceGenerator for GravityForce {
    fn generator_type(&self) -> &'static str {
        "Gravity"
    }

    fn apply_force(&self, target: ParticleHandle, particles: &mut ParticleStorage, _contacts: &ContactSet, _dt: f32) {
        let particle = match particles.get_particle_mut(target) {
            Ok(particle) => particle,
            Err(_) => return,
        };

        // F = m * g
        let force = self.gravity * particle.get_mass();
        particle.add_force(force);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
