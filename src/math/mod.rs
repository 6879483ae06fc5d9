mod vector;
mod matrix;
mod rotation;

pub use vector::{Axis, Vector3};
pub use matrix::Matrix3;
pub use rotation::Quaternion;

/// Constant for a very small number, used for comparisons
pub const EPSILON: f32 = 1.0e-6;

/// Largest component magnitude a vector may have and still count as zero
pub const ZERO_TOLERANCE: f32 = 1.0e-5;

