use crate::core::{ContactSet, ParticleHandle, ParticleStorage, VehicleConfig};
use crate::error::SimulationError;
use crate::forces::{
    ConstantForce, ContactForce, ForceRegistry, FrameConstraint, FrictionForce, GravityForce, SpringForce,
};
use crate::math::{Matrix3, Quaternion, Vector3};
use crate::particles::{DriveDirection, Particle, TurnDirection};
use crate::vehicle::{VehicleDescriptor, VehiclePart, WHEEL_COUNT};
use crate::Result;

/// A body on four suspended wheels, advanced one frame at a time.
///
/// Every particle position is relative to the world anchor `location`, which
/// never moves. The host reads poses back through the accessors and applies
/// them to its own scene objects.
#[derive(Debug)]
pub struct VehicleSimulator {
    /// World anchor
    location: Vector3,

    body_box_extent: Vector3,

    wheel_radius: f32,

    config: VehicleConfig,

    particles: ParticleStorage,

    body: ParticleHandle,

    wheels: [ParticleHandle; WHEEL_COUNT],

    /// Bindings wired at construction and run every step
    permanent_registry: ForceRegistry,

    /// Bindings run on the next step only
    transient_registry: ForceRegistry,

    /// Contacts reported for the most recent step
    contacts: ContactSet,
}

impl VehicleSimulator {
    /// Builds a vehicle with the default model constants
    pub fn new(descriptor: VehicleDescriptor) -> Result<Self> {
        Self::with_config(descriptor, VehicleConfig::default())
    }

    /// Builds a vehicle with custom model constants
    pub fn with_config(descriptor: VehicleDescriptor, config: VehicleConfig) -> Result<Self> {
        config.validate()?;
        descriptor.validate()?;

        let mut particles = ParticleStorage::new();
        let orientation = descriptor.orientation.normalize();
        let mut spawn = |mass: f32, location: Vector3| {
            particles.add(Particle::with_state(
                mass,
                location,
                orientation,
                descriptor.linear_velocity,
                descriptor.angular_velocity,
            ))
        };

        let body = spawn(descriptor.body_mass, descriptor.body_relative_location);
        let wheels = descriptor
            .wheel_relative_locations
            .map(|location| spawn(descriptor.wheel_mass, location));

        let permanent_registry = Self::wire_permanent_registry(&descriptor, &config, body, &wheels);

        tracing::debug!(
            bindings = permanent_registry.len(),
            body_mass = descriptor.body_mass,
            wheel_mass = descriptor.wheel_mass,
            "vehicle simulator constructed"
        );

        Ok(Self {
            location: descriptor.location,
            body_box_extent: descriptor.body_box_extent,
            wheel_radius: descriptor.wheel_radius,
            config,
            particles,
            body,
            wheels,
            permanent_registry,
            transient_registry: ForceRegistry::new(),
            contacts: ContactSet::new(),
        })
    }

    /// Registers every generator of the vehicle model.
    ///
    /// The frame constraint is registered last: it overwrites the body's
    /// horizontal velocity and must see the wheel velocities after friction has
    /// snapped them.
    fn wire_permanent_registry(
        descriptor: &VehicleDescriptor,
        config: &VehicleConfig,
        body: ParticleHandle,
        wheels: &[ParticleHandle; WHEEL_COUNT],
    ) -> ForceRegistry {
        let g = config.gravity_magnitude;
        let k = config.spring_constant;
        let mut registry = ForceRegistry::new();

        registry.add(body, Box::new(GravityForce::downward(g)));
        for &wheel in wheels {
            registry.add(wheel, Box::new(GravityForce::downward(g)));
        }

        // Each spring is pre-compressed so that it carries a quarter of the body weight.
        let preload = descriptor.body_mass / WHEEL_COUNT as f32 * g / k;
        let body_rest_lengths = descriptor.wheel_relative_locations.map(|wheel| {
            descriptor.body_relative_location.z - wheel.z + preload
        });
        tracing::debug!(?body_rest_lengths, preload, "suspension rest lengths");

        registry.add(
            body,
            Box::new(SpringForce::new(wheels.iter().copied().zip(body_rest_lengths), k)),
        );
        for (&wheel, rest_length) in wheels.iter().zip(body_rest_lengths) {
            registry.add(wheel, Box::new(SpringForce::new([(body, -rest_length)], k)));
        }

        let balance = (descriptor.body_mass + WHEEL_COUNT as f32 * descriptor.wheel_mass) * g / WHEEL_COUNT as f32;
        for &wheel in wheels {
            let contact = ContactForce::new(balance, config.restitution_loss)
                .with_rest_tolerance(config.contact_rest_tolerance);
            registry.add(wheel, Box::new(contact));
        }

        for &wheel in wheels {
            registry.add(wheel, Box::new(FrictionForce::new(config.friction_damping, g)));
        }

        registry.add(body, Box::new(FrameConstraint::new(wheels.iter().copied())));

        registry
    }

    /// Advances the vehicle by `dt`.
    ///
    /// `contact_points` holds one world-space ground contact per wheel, or
    /// `None` for a wheel in the air. Forces are gathered from the state at the
    /// start of the step, then every particle is integrated. A negative or NaN
    /// `dt` leaves the vehicle untouched.
    pub fn step(&mut self, contact_points: [Option<Vector3>; WHEEL_COUNT], dt: f32) {
        if !(dt >= 0.0) {
            tracing::warn!(dt, "ignoring step with invalid time delta");
            return;
        }

        self.contacts.clear();
        for (&wheel, point) in self.wheels.iter().zip(contact_points) {
            self.contacts.set(wheel, point.map(|p| p - self.location));
        }

        let _span = tracing::trace_span!("vehicle_step", dt, contacts = self.contacts.count()).entered();

        self.permanent_registry.update_forces(&mut self.particles, &self.contacts, dt);
        self.transient_registry.update_forces(&mut self.particles, &self.contacts, dt);
        self.transient_registry.clear();

        self.particles.integrate_all(dt);
    }

    /// Throttle: nudges the horizontal velocity of the body and every wheel
    pub fn drive(&mut self, forward: bool) {
        let direction = DriveDirection::from(forward);
        for (_, particle) in self.particles.iter_mut() {
            particle.drive(direction, self.config.drive_impulse);
        }
    }

    /// Steering: spins every wheel about the vertical axis.
    ///
    /// Uses the configured nominal time step, not the frame's `dt`.
    pub fn turn(&mut self, left: bool) {
        let direction = TurnDirection::from(left);
        let torque = Vector3::new(0.0, 0.0, self.config.turn_force * self.config.turn_radius);

        for &wheel in &self.wheels {
            let particle = &mut self.particles[wheel];
            let inertia = Matrix3::solid_sphere_inertia(particle.get_mass(), self.wheel_radius);
            particle.turn(direction, torque, self.config.turn_time_step, &inertia);
        }
    }

    /// Queues a force on one part of the vehicle for the next step only
    pub fn push(&mut self, part: VehiclePart, force: Vector3) -> Result<()> {
        let handle = self.handle_of(part)?;
        self.transient_registry.add(handle, Box::new(ConstantForce::new(force)));
        Ok(())
    }

    fn handle_of(&self, part: VehiclePart) -> Result<ParticleHandle> {
        match part {
            VehiclePart::Body => Ok(self.body),
            VehiclePart::Wheel(index) => self.wheel_handle(index),
        }
    }

    fn wheel_handle(&self, index: usize) -> Result<ParticleHandle> {
        self.wheels
            .get(index)
            .copied()
            .ok_or_else(|| SimulationError::ResourceNotFound(format!("Wheel {} does not exist", index)))
    }

    fn wheel(&self, index: usize) -> Result<&Particle> {
        let handle = self.wheel_handle(index)?;
        self.particles.get_particle(handle)
    }

    fn body(&self) -> &Particle {
        &self.particles[self.body]
    }

    /// World anchor of the vehicle
    pub fn get_location(&self) -> Vector3 {
        self.location
    }

    /// Returns the half extents of the body box
    pub fn get_body_box_extent(&self) -> Vector3 {
        self.body_box_extent
    }

    /// Returns the radius shared by all wheels
    pub fn get_wheel_radius(&self) -> f32 {
        self.wheel_radius
    }

    /// Returns the model constants in use
    pub fn get_config(&self) -> &VehicleConfig {
        &self.config
    }

    /// Returns the body's position relative to the anchor
    pub fn get_body_relative_location(&self) -> Vector3 {
        self.body().get_position()
    }

    /// Returns the body's world position
    pub fn get_body_location(&self) -> Vector3 {
        self.location + self.body().get_position()
    }

    /// Returns the body's orientation
    pub fn get_body_relative_orientation(&self) -> Quaternion {
        self.body().get_orientation()
    }

    /// Returns the body's linear velocity
    pub fn get_body_linear_velocity(&self) -> Vector3 {
        self.body().get_linear_velocity()
    }

    /// Returns a wheel's position relative to the anchor
    pub fn get_wheel_relative_location(&self, index: usize) -> Result<Vector3> {
        Ok(self.wheel(index)?.get_position())
    }

    /// Returns a wheel's world position
    pub fn get_wheel_location(&self, index: usize) -> Result<Vector3> {
        Ok(self.location + self.wheel(index)?.get_position())
    }

    /// Returns a wheel's orientation
    pub fn get_wheel_relative_orientation(&self, index: usize) -> Result<Quaternion> {
        Ok(self.wheel(index)?.get_orientation())
    }

    /// Returns a wheel's linear velocity
    pub fn get_wheel_linear_velocity(&self, index: usize) -> Result<Vector3> {
        Ok(self.wheel(index)?.get_linear_velocity())
    }

    /// Returns a wheel's angular velocity
    pub fn get_wheel_angular_velocity(&self, index: usize) -> Result<Vector3> {
        Ok(self.wheel(index)?.get_angular_velocity())
    }

    /// Anchor-relative contact point reported for the wheel on the last step
    pub fn get_wheel_contact(&self, index: usize) -> Result<Option<Vector3>> {
        let handle = self.wheel_handle(index)?;
        Ok(self.contacts.get(handle))
    }

    /// Handle of the body particle
    pub fn body_handle(&self) -> ParticleHandle {
        self.body
    }

    /// Handles of the wheel particles, in descriptor order
    pub fn wheel_handles(&self) -> &[ParticleHandle; WHEEL_COUNT] {
        &self.wheels
    }

    /// Returns the particle storage
    pub fn particles(&self) -> &ParticleStorage {
        &self.particles
    }

    /// The bindings run on every step, in order
    pub fn permanent_registry(&self) -> &ForceRegistry {
        &self.permanent_registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forces::ForceGenerator;
    use approx::assert_relative_eq;

    fn stock() -> VehicleSimulator {
        VehicleSimulator::new(VehicleDescriptor::default()).expect("stock vehicle is valid")
    }

    #[test]
    fn registry_is_wired_in_model_order() {
        let sim = stock();
        let types: Vec<&str> = sim
            .permanent_registry()
            .iter()
            .map(|(_, generator)| generator.generator_type())
            .collect();

        let mut expected = vec!["Gravity"; 5];
        expected.extend(["Spring"; 5]);
        expected.extend(["Contact"; 4]);
        expected.extend(["Friction"; 4]);
        expected.push("FrameConstraint");
        assert_eq!(types, expected);

        let (last_target, last) = sim.permanent_registry().iter().last().expect("registry not empty");
        assert_eq!(last_target, sim.body_handle());
        assert_eq!(last.referenced_particles(), sim.wheel_handles());
    }

    #[test]
    fn wheel_springs_mirror_body_spring() {
        let sim = stock();
        let springs: Vec<&SpringForce> = sim
            .permanent_registry()
            .iter()
            .filter_map(|(_, generator)| generator.as_any().downcast_ref::<SpringForce>())
            .collect();

        // 50 height difference plus 100 / 4 * 10 / 100 of preload
        let body_spring = springs[0];
        for &rest in body_spring.get_rest_lengths() {
            assert_relative_eq!(rest, 52.5);
        }
        for wheel_spring in &springs[1..] {
            assert_eq!(wheel_spring.get_rest_lengths(), &[-52.5f32][..]);
        }
    }

    #[test]
    fn contact_balance_supports_a_quarter_of_total_weight() {
        let sim = stock();
        let balance = sim
            .permanent_registry()
            .iter()
            .find_map(|(_, generator)| generator.as_any().downcast_ref::<ContactForce>())
            .map(|contact| contact.get_balance());

        // (100 + 4 * 20) * 10 / 4
        assert_eq!(balance, Some(450.0));
    }

    #[test]
    fn push_lasts_one_step() {
        let mut sim = stock();
        sim.push(VehiclePart::Wheel(1), Vector3::new(200.0, 0.0, 0.0)).expect("wheel 1 exists");
        sim.step([None; WHEEL_COUNT], 0.1);

        // 200 / 20 * 0.1
        let vx = sim.get_wheel_linear_velocity(1).map(|v| v.x).unwrap_or_default();
        assert_relative_eq!(vx, 1.0, epsilon = 1e-6);

        sim.step([None; WHEEL_COUNT], 0.1);
        let vx = sim.get_wheel_linear_velocity(1).map(|v| v.x).unwrap_or_default();
        assert_relative_eq!(vx, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn pushing_a_missing_wheel_fails() {
        let mut sim = stock();
        let result = sim.push(VehiclePart::Wheel(WHEEL_COUNT), Vector3::unit_x());
        assert!(matches!(result, Err(SimulationError::ResourceNotFound(_))));
    }

    #[test]
    fn negative_dt_is_ignored() {
        let mut sim = stock();
        let before = sim.get_body_relative_location();
        sim.step([None; WHEEL_COUNT], -0.1);
        assert_eq!(sim.get_body_relative_location(), before);
    }
}
