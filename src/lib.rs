pub mod math;
pub mod core;
pub mod particles;
pub mod forces;
pub mod vehicle;

/// Re-export common types for easier usage
pub use crate::core::{ContactSet, ParticleHandle, ParticleStorage, VehicleConfig};
pub use crate::forces::{ForceGenerator, ForceRegistry};
pub use crate::math::{Quaternion, Vector3};
pub use crate::particles::Particle;
pub use crate::vehicle::{VehicleDescriptor, VehiclePart, VehicleSimulator, WHEEL_COUNT};

/// Error types for the simulator
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum SimulationError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),
    }
}

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, error::SimulationError>;

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
