use crate::core::{ContactSet, ParticleHandle, ParticleStorage};
use crate::forces::ForceGenerator;
use crate::math::Axis;
use std::any::Any;

/// Coulomb-style ground friction for a particle in contact.
///
/// Each horizontal axis is handled on its own. The friction magnitude is
/// `damping * m * g`. When that force would reverse the velocity component
/// within one step, the component is set to zero instead and no force is
/// applied on that axis.
#[derive(Debug, Clone)]
pub struct FrictionForce {
    /// Friction coefficient
    damping: f32,

    /// Gravitational acceleration used for the normal load
    gravity_magnitude: f32,
}

impl FrictionForce {
    /// Creates a friction generator with coefficient `damping` under gravity `gravity_magnitude`
    pub fn new(damping: f32, gravity_magnitude: f32) -> Self {
        Self {
            damping,
            gravity_magnitude,
        }
    }

    /// Gets the friction coefficient
    pub fn get_damping(&self) -> f32 {
        self.damping
    }
}

impl ForceGenerator for FrictionForce {
    fn generator_type(&self) -> &'static str {
        "Friction"
    }

    fn apply_force(&self, target: ParticleHandle, particles: &mut ParticleStorage, contacts: &ContactSet, dt: f32) {
        if !contacts.is_in_contact(target) {
            return;
        }

        let particle = match particles.get_particle_mut(target) {
            Ok(particle) => particle,
            Err(_) => return,
        };

        let mass = particle.get_mass();
        let magnitude = self.damping * mass * self.gravity_magnitude;
        let stopping_speed = magnitude / mass * dt;

        for axis in Axis::HORIZONTAL {
            let speed = particle.get_linear_velocity()[axis];

            if speed.abs() < stopping_speed {
                particle.set_linear_velocity_component(axis, 0.0);
            } else {
                let opposing = if speed > 0.0 { -magnitude } else { magnitude };
                particle.add_force(axis.unit() * opposing);
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Quaternion, Vector3};
    use crate::particles::Particle;

    fn moving(velocity: Vector3) -> (ParticleStorage, ParticleHandle) {
        let mut particles = ParticleStorage::new();
        let handle = particles.add(Particle::with_state(
            20.0,
            Vector3::zero(),
            Quaternion::identity(),
            velocity,
            Vector3::zero(),
        ));
        (particles, handle)
    }

    fn grounded(handle: ParticleHandle) -> ContactSet {
        let mut contacts = ContactSet::new();
        contacts.set(handle, Some(Vector3::zero()));
        contacts
    }

    #[test]
    fn airborne_particle_feels_no_friction() {
        let (mut particles, handle) = moving(Vector3::new(0.01, 5.0, 0.0));
        FrictionForce::new(1.0, 10.0).apply_force(handle, &mut particles, &ContactSet::new(), 0.1);

        let particle = particles.get(handle).expect("particle exists");
        assert_eq!(particle.get_linear_velocity(), Vector3::new(0.01, 5.0, 0.0));
        assert_eq!(particle.get_force_accumulator(), Vector3::zero());
    }

    #[test]
    fn each_axis_opposes_its_own_velocity() {
        // stopping speed = 1 * 10 * 0.1 = 1
        let (mut particles, handle) = moving(Vector3::new(5.0, 5.0, -3.0));
        let contacts = grounded(handle);
        FrictionForce::new(1.0, 10.0).apply_force(handle, &mut particles, &contacts, 0.1);

        let force = particles.get(handle).map(|p| p.get_force_accumulator());
        assert_eq!(force, Some(Vector3::new(-200.0, -200.0, 0.0)));
    }

    #[test]
    fn mixed_signs_are_opposed_independently() {
        let (mut particles, handle) = moving(Vector3::new(-4.0, 6.0, 0.0));
        let contacts = grounded(handle);
        FrictionForce::new(0.5, 10.0).apply_force(handle, &mut particles, &contacts, 0.1);

        let force = particles.get(handle).map(|p| p.get_force_accumulator());
        assert_eq!(force, Some(Vector3::new(100.0, -100.0, 0.0)));
    }

    #[test]
    fn slow_component_snaps_to_zero() {
        let (mut particles, handle) = moving(Vector3::new(0.3, -0.99, 7.0));
        let contacts = grounded(handle);
        FrictionForce::new(1.0, 10.0).apply_force(handle, &mut particles, &contacts, 0.1);
        particles.integrate_all(0.1);

        let velocity = particles.get(handle).map(|p| p.get_linear_velocity());
        assert_eq!(velocity, Some(Vector3::new(0.0, 0.0, 7.0)));
    }
}
