use crate::core::{ContactSet, ParticleHandle, ParticleStorage};
use crate::math::Vector3;
use std::any::Any;

/// A rule that injects force into one target particle per step.
///
/// Implementations read particle state (their target's and that of the particles
/// they reference) but never the target's force accumulator. Only
/// [`FrameConstraint`](crate::forces::FrameConstraint) writes velocity directly.
pub trait ForceGenerator: Send + Sync + std::fmt::Debug + 'static {
    /// Returns the type name of the force generator
    fn generator_type(&self) -> &'static str;

    /// Adds this generator's contribution for the current step to `target`
    fn apply_force(
        &self,
        target: ParticleHandle,
        particles: &mut ParticleStorage,
        contacts: &ContactSet,
        dt: f32,
    );

    /// Particles other than the target whose state this generator reads
    fn referenced_particles(&self) -> &[ParticleHandle] {
        &[]
    }

    /// Returns a dynamic reference to any for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// A force generator that applies a fixed force to its target
#[derive(Debug, Clone)]
pub struct ConstantForce {
    force: Vector3,
}

impl ConstantForce {
    /// Creates a generator applying `force` every time it runs
    pub fn new(force: Vector3) -> Self {
        Self { force }
    }

    /// Gets the applied force
    pub fn get_force(&self) -> Vector3 {
        self.force
    }
}

impl ForceGenerator for ConstantForce {
    fn generator_type(&self) -> &'static str {
        "ConstantForce"
    }

    fn apply_force(&self, target: ParticleHandle, particles: &mut ParticleStorage, _contacts: &ContactSet, _dt: f32) {
        if let Ok(particle) = particles.get_particle_mut(target) {
            particle.add_force(self.force);
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct ForceRegistration {
    particle: ParticleHandle,
    generator: Box<dyn ForceGenerator>,
}

/// Ordered table of (particle, generator) bindings.
///
/// Bindings run in the order they were added. Generators that overwrite state
/// instead of accumulating it must therefore be registered after every other
/// generator touching the same quantity.
#[derive(Debug, Default)]
pub struct ForceRegistry {
    registrations: Vec<ForceRegistration>,
}

impl ForceRegistry {
    /// Creates a new empty force registry
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Binds a generator to a particle. Duplicate bindings are kept.
    pub fn add(&mut self, particle: ParticleHandle, generator: Box<dyn ForceGenerator>) {
        self.registrations.push(ForceRegistration { particle, generator });
    }

    /// Returns the number of bindings in the registry
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Returns whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Iterates bindings in registration order
    pub fn iter(&self) -> impl Iterator<Item = (ParticleHandle, &dyn ForceGenerator)> + '_ {
        self.registrations
            .iter()
            .map(|r| (r.particle, r.generator.as_ref()))
    }

    /// Runs every binding once, in registration order
    pub fn update_forces(&self, particles: &mut ParticleStorage, contacts: &ContactSet, dt: f32) {
        for registration in &self.registrations {
            registration
                .generator
                .apply_force(registration.particle, particles, contacts, dt);
        }
    }

    /// Removes every binding
    pub fn clear(&mut self) {
        self.registrations.clear();
    }
}
