mod force_generator;
mod gravity;
mod spring;
mod friction;
mod contact;
mod frame_constraint;

pub use self::force_generator::{ForceGenerator, ForceRegistry, ConstantForce};
pub use self::gravity::GravityForce;
pub use self::spring::SpringForce;
pub use self::friction::FrictionForce;
pub use self::contact::{ContactForce, DEFAULT_REST_TOLERANCE};
pub use self::frame_constraint::FrameConstraint;
