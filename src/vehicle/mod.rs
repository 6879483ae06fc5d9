mod descriptor;
mod simulator;

pub use self::descriptor::VehicleDescriptor;
pub use self::simulator::VehicleSimulator;

/// Number of wheels on every simulated vehicle
pub const WHEEL_COUNT: usize = 4;

/// Addresses one particle of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehiclePart {
    Body,

    /// Wheel by descriptor index, `0..WHEEL_COUNT`
    Wheel(usize),
}
