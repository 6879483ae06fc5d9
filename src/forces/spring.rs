use crate::core::{ContactSet, ParticleHandle, ParticleStorage};
use crate::forces::ForceGenerator;
use crate::math::Vector3;
use std::any::Any;

/// A vertical (Z only) spring between the target and one or more other particles.
///
/// For each connection the displacement is `target.z - other.z - rest_length`
/// and the restoring force is `-k * displacement`. The contributions of all
/// connections are summed and added to the target once. Horizontal offsets
/// between the particles do not load the spring.
#[derive(Debug, Clone)]
pub struct SpringForce {
    /// The particles the target is connected to
    others: Vec<ParticleHandle>,

    /// Signed rest offset for each connection, parallel to `others`
    rest_lengths: Vec<f32>,

    /// The spring stiffness coefficient
    spring_constant: f32,
}

impl SpringForce {
    /// Creates a spring from `(other particle, rest length)` connections
    pub fn new(connections: impl IntoIterator<Item = (ParticleHandle, f32)>, spring_constant: f32) -> Self {
        let (others, rest_lengths) = connections.into_iter().unzip();

        Self {
            others,
            rest_lengths,
            spring_constant,
        }
    }

    /// Gets the spring stiffness coefficient
    pub fn get_spring_constant(&self) -> f32 {
        self.spring_constant
    }

    /// Gets the rest lengths, in connection order
    pub fn get_rest_lengths(&self) -> &[f32] {
        &self.rest_lengths
    }

    /// Vertical force the spring exerts on a target at height `target_z`
    fn vertical_force(&self, target_z: f32, particles: &ParticleStorage) -> f32 {
        self.others
            .iter()
            .zip(&self.rest_lengths)
            .filter_map(|(&other, &rest_length)| {
                let other = particles.get(other)?;
                let displacement = target_z - other.get_position().z - rest_length;
                Some(-self.spring_constant * displacement)
            })
            .sum()
    }
}

impl ForceGenerator for SpringForce {
    fn generator_type(&self) -> &'static str {
        "Spring"
    }

    fn apply_force(&self, target: ParticleHandle, particles: &mut ParticleStorage, _contacts: &ContactSet, _dt: f32) {
        let target_z = match particles.get(target) {
            Some(particle) => particle.get_position().z,
            None => return,
        };

        let force = self.vertical_force(target_z, particles);

        if let Ok(particle) = particles.get_particle_mut(target) {
            particle.add_force(Vector3::new(0.0, 0.0, force));
        }
    }

    fn referenced_particles(&self) -> &[ParticleHandle] {
        &self.others
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
