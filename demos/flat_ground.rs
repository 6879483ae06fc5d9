use vehicle_sim::{math::Vector3, VehicleDescriptor, VehicleSimulator, WHEEL_COUNT};

const FRAME_TIME: f32 = 1.0 / 60.0;
const SIMULATION_DURATION: f32 = 4.0; // seconds
const GROUND_HEIGHT: f32 = 0.0;

/// Ground contact for every wheel whose lowest point reached the plane
fn detect_contacts(sim: &VehicleSimulator) -> [Option<Vector3>; WHEEL_COUNT] {
    let mut contacts = [None; WHEEL_COUNT];
    for (i, contact) in contacts.iter_mut().enumerate() {
        if let Ok(wheel) = sim.get_wheel_location(i) {
            if wheel.z - sim.get_wheel_radius() <= GROUND_HEIGHT {
                *contact = Some(Vector3::new(wheel.x, wheel.y, GROUND_HEIGHT));
            }
        }
    }
    contacts
}

fn main() -> vehicle_sim::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Wheels start 30 units above the ground
    let descriptor = VehicleDescriptor {
        location: Vector3::new(0.0, 0.0, 100.0),
        ..VehicleDescriptor::default()
    };
    let mut sim = VehicleSimulator::new(descriptor)?;

    let frames = (SIMULATION_DURATION / FRAME_TIME) as usize;
    for frame in 0..frames {
        let time = frame as f32 * FRAME_TIME;

        // Throttle once on landing, then steer left for half a second
        if frame == 90 {
            sim.drive(true);
        }
        if (120..150).contains(&frame) {
            sim.turn(true);
        }

        let contacts = detect_contacts(&sim);
        sim.step(contacts, FRAME_TIME);

        if frame % 15 == 0 {
            let grounded = contacts.iter().filter(|c| c.is_some()).count();
            println!(
                "t={:5.2}s body={} v={} grounded={}",
                time,
                sim.get_body_location(),
                sim.get_body_linear_velocity(),
                grounded
            );
            for i in 0..WHEEL_COUNT {
                println!(
                    "    wheel {} at {} orientation {}",
                    i,
                    sim.get_wheel_location(i)?,
                    sim.get_wheel_relative_orientation(i)?
                );
            }
        }
    }

    Ok(())
}
