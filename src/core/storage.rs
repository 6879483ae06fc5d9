use crate::core::ParticleHandle;
use crate::error::SimulationError;
use crate::particles::Particle;
use crate::Result;
use std::ops::{Index, IndexMut};

/// Arena that owns every particle of a simulation.
///
/// Handles are indices into the arena; particles are never removed, so a handle
/// stays valid for the lifetime of the storage that issued it.
#[derive(Debug, Clone, Default)]
pub struct ParticleStorage {
    items: Vec<Particle>,
}

impl ParticleStorage {
    /// Creates a new empty storage
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Adds a particle and returns its handle
    pub fn add(&mut self, particle: Particle) -> ParticleHandle {
        let handle = ParticleHandle(self.items.len() as u32);
        self.items.push(particle);
        handle
    }

    /// Gets a particle by its handle
    pub fn get(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.items.get(handle.index())
    }

    /// Gets a mutable reference to a particle by its handle
    pub fn get_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        self.items.get_mut(handle.index())
    }

    /// Gets a particle by its handle, returning an error if not found
    pub fn get_particle(&self, handle: ParticleHandle) -> Result<&Particle> {
        self.get(handle)
            .ok_or_else(|| SimulationError::ResourceNotFound(format!("Particle with handle {:?} not found", handle)))
    }

    /// Gets a mutable reference to a particle by its handle, returning an error if not found
    pub fn get_particle_mut(&mut self, handle: ParticleHandle) -> Result<&mut Particle> {
        self.get_mut(handle)
            .ok_or_else(|| SimulationError::ResourceNotFound(format!("Particle with handle {:?} not found", handle)))
    }

    /// Returns the number of particles
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the storage holds no particles
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates particles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (ParticleHandle, &Particle)> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(i, particle)| (ParticleHandle(i as u32), particle))
    }

    /// Iterates particles mutably in insertion order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (ParticleHandle, &mut Particle)> + '_ {
        self.items
            .iter_mut()
            .enumerate()
            .map(|(i, particle)| (ParticleHandle(i as u32), particle))
    }

    /// Integrates every particle over `dt`
    pub fn integrate_all(&mut self, dt: f32) {
        for particle in &mut self.items {
            particle.integrate(dt);
        }
    }
}

/// Panics if `handle` was not issued by this storage
impl Index<ParticleHandle> for ParticleStorage {
    type Output = Particle;

    fn index(&self, handle: ParticleHandle) -> &Particle {
        &self.items[handle.index()]
    }
}

impl IndexMut<ParticleHandle> for ParticleStorage {
    fn index_mut(&mut self, handle: ParticleHandle) -> &mut Particle {
        &mut self.items[handle.index()]
    }
}
