use crate::core::{ContactSet, ParticleHandle, ParticleStorage};
use crate::forces::ForceGenerator;
use crate::math::Axis;
use std::any::Any;

/// Kinematic leveling rule: the target's horizontal velocity becomes the mean
/// horizontal velocity of the referenced particles.
///
/// This overwrites velocity rather than adding force, so it has to be the last
/// binding touching the target's horizontal velocity in a registry.
#[derive(Debug, Clone)]
pub struct FrameConstraint {
    others: Vec<ParticleHandle>,
}

impl FrameConstraint {
    /// Creates a constraint averaging over `others`
    pub fn new(others: impl IntoIterator<Item = ParticleHandle>) -> Self {
        Self {
            others: others.into_iter().collect(),
        }
    }
}

impl ForceGenerator for FrameConstraint {
    fn generator_type(&self) -> &'static str {
        "FrameConstraint"
    }

    fn apply_force(&self, target: ParticleHandle, particles: &mut ParticleStorage, _contacts: &ContactSet, _dt: f32) {
        let mut sum = [0.0f32; 2];
        let mut resolved = 0usize;
        for other in self.others.iter().filter_map(|&other| particles.get(other)) {
            let velocity = other.get_linear_velocity();
            for (slot, axis) in sum.iter_mut().zip(Axis::HORIZONTAL) {
                *slot += velocity[axis];
            }
            resolved += 1;
        }

        // mean over the references that resolve
        if resolved == 0 {
            return;
        }
        let mean = sum.map(|total| total / resolved as f32);

        if let Ok(particle) = particles.get_particle_mut(target) {
            for (value, axis) in mean.into_iter().zip(Axis::HORIZONTAL) {
                particle.set_linear_velocity_component(axis, value);
            }
        }
    }

    fn referenced_particles(&self) -> &[ParticleHandle] {
        &self.others
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

    #[test]
    fn body_takes_mean_wheel_velocity() {
        let mut particles = ParticleStorage::new();
        let body = particles.add(Particle::with_state(
            100.0,
            Vector3::zero(),
            Quaternion::identity(),
            Vector3::new(-50.0, 9.0, 3.0),
            Vector3::zero(),
        ));
        let wheels: Vec<ParticleHandle> = [1.0, 2.0, 3.0, 4.0]
            .into_iter()
            .map(|vx| {
                particles.add(Particle::with_state(
                    20.0,
                    Vector3::zero(),
                    Quaternion::identity(),
                    Vector3::new(vx, -vx, 0.0),
                    Vector3::zero(),
                ))
            })
            .collect();

        FrameConstraint::new(wheels).apply_force(body, &mut particles, &ContactSet::new(), 0.02);

        let body = particles.get(body).expect("body exists");
        assert_eq!(body.get_linear_velocity(), Vector3::new(2.5, -2.5, 3.0));
        assert_eq!(body.get_force_accumulator(), Vector3::zero());
    }

    #[test]
    fn unresolved_references_do_not_dilute_the_mean() {
        let mut particles = ParticleStorage::new();
        let body = particles.add(Particle::new(100.0, Vector3::zero()));
        let wheel = particles.add(Particle::with_state(
            20.0,
            Vector3::zero(),
            Quaternion::identity(),
            Vector3::new(4.0, -2.0, 0.0),
            Vector3::zero(),
        ));

        FrameConstraint::new([wheel, ParticleHandle(9)]).apply_force(body, &mut particles, &ContactSet::new(), 0.02);
        assert_eq!(particles.get(body).map(|p| p.get_linear_velocity()), Some(Vector3::new(4.0, -2.0, 0.0)));

        // nothing resolves: the target keeps its velocity
        FrameConstraint::new([ParticleHandle(7)]).apply_force(wheel, &mut particles, &ContactSet::new(), 0.02);
        assert_eq!(particles.get(wheel).map(|p| p.get_linear_velocity()), Some(Vector3::new(4.0, -2.0, 0.0)));
    }

    #[test]
    fn empty_reference_set_is_a_no_op() {
        let mut particles = ParticleStorage::new();
        let body = particles.add(Particle::with_state(
            1.0,
            Vector3::zero(),
            Quaternion::identity(),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::zero(),
        ));

        FrameConstraint::new(Vec::new()).apply_force(body, &mut particles, &ContactSet::new(), 0.02);
        assert_eq!(particles.get(body).map(|p| p.get_linear_velocity()), Some(Vector3::new(1.0, 1.0, 0.0)));
    }
}
