mod particle;

pub use self::particle::{Particle, DEFAULT_DRIVE_IMPULSE};

/// Throttle direction for a drive command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveDirection {
    Forward,
    Backward,
}

impl DriveDirection {
    /// +1 forward, -1 backward
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            DriveDirection::Forward => 1.0,
            DriveDirection::Backward => -1.0,
        }
    }
}

impl From<bool> for DriveDirection {
    fn from(forward: bool) -> Self {
        if forward { DriveDirection::Forward } else { DriveDirection::Backward }
    }
}

/// Steering direction; left is a positive rotation about the vertical axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Left,
    Right,
}

impl TurnDirection {
    /// +1 left, -1 right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            TurnDirection::Left => 1.0,
            TurnDirection::Right => -1.0,
        }
    }
}

impl From<bool> for TurnDirection {
    fn from(left: bool) -> Self {
        if left { TurnDirection::Left } else { TurnDirection::Right }
    }
}
