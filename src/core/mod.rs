pub mod config;
pub mod contacts;
pub mod storage;

pub use self::config::VehicleConfig;
pub use self::contacts::ContactSet;
pub use self::storage::ParticleStorage;

/// A unique identifier for a particle in a [`ParticleStorage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleHandle(pub(crate) u32);

impl ParticleHandle {
    /// Position of the particle in its storage
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
