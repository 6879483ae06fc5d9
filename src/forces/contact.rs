use crate::core::{ContactSet, ParticleHandle, ParticleStorage};
use crate::forces::ForceGenerator;
use crate::math::Vector3;
use std::any::Any;

/// Default vertical speed under which a grounded particle counts as resting
pub const DEFAULT_REST_TOLERANCE: f32 = 1.0e-5;

/// Vertical ground reaction for a particle in contact.
///
/// A resting particle receives the constant `balance` force. A particle that
/// still moves vertically additionally receives the force that cancels its
/// vertical velocity within one step, scaled by `1 + restitution_loss`.
#[derive(Debug, Clone)]
pub struct ContactForce {
    /// Steady-state support force
    balance: f32,

    /// Fraction of the approach velocity removed on top of cancelling it
    restitution_loss: f32,

    /// Vertical speed treated as zero
    rest_tolerance: f32,
}

impl ContactForce {
    /// Creates a contact generator with the given support force and restitution loss
    pub fn new(balance: f32, restitution_loss: f32) -> Self {
        Self {
            balance,
            restitution_loss,
            rest_tolerance: DEFAULT_REST_TOLERANCE,
        }
    }

    /// Overrides the vertical speed treated as resting
    pub fn with_rest_tolerance(mut self, rest_tolerance: f32) -> Self {
        self.rest_tolerance = rest_tolerance;
        self
    }

    /// Gets the support force applied to a resting particle
    pub fn get_balance(&self) -> f32 {
        self.balance
    }

    /// Gets the restitution loss
    pub fn get_restitution_loss(&self) -> f32 {
        self.restitution_loss
    }

    /// Vertical reaction for a particle of `mass` moving at `vertical_speed`.
    ///
    /// The impulse term needs a positive `dt`; otherwise only the balance force
    /// remains.
    pub fn reaction(&self, mass: f32, vertical_speed: f32, dt: f32) -> f32 {
        if vertical_speed.abs() < self.rest_tolerance || dt <= 0.0 {
            return self.balance;
        }

        (1.0 + self.restitution_loss) * -vertical_speed * mass / dt + self.balance
    }
}

impl ForceGenerator for ContactForce {
    fn generator_type(&self) -> &'static str {
        "Contact"
    }

    fn apply_force(&self, target: ParticleHandle, particles: &mut ParticleStorage, contacts: &ContactSet, dt: f32) {
        if !contacts.is_in_contact(target) {
            return;
        }

        let particle = match particles.get_particle_mut(target) {
            Ok(particle) => particle,
            Err(_) => return,
        };

        let force = self.reaction(particle.get_mass(), particle.get_linear_velocity().z, dt);
        particle.add_force(Vector3::new(0.0, 0.0, force));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quaternion;
    use crate::particles::Particle;
    use approx::assert_relative_eq;

    fn falling(vz: f32) -> (ParticleStorage, ParticleHandle, ContactSet) {
        let mut particles = ParticleStorage::new();
        let handle = particles.add(Particle::with_state(
            20.0,
            Vector3::zero(),
            Quaternion::identity(),
            Vector3::new(0.0, 0.0, vz),
            Vector3::zero(),
        ));
        let mut contacts = ContactSet::new();
        contacts.set(handle, Some(Vector3::new(0.0, 0.0, -20.0)));
        (particles, handle, contacts)
    }

    #[test]
    fn resting_wheel_gets_balance_force() {
        let (mut particles, handle, contacts) = falling(5.0e-6);
        ContactForce::new(450.0, 0.2).apply_force(handle, &mut particles, &contacts, 0.02);

        let force = particles.get(handle).map(|p| p.get_force_accumulator());
        assert_eq!(force, Some(Vector3::new(0.0, 0.0, 450.0)));
    }

    #[test]
    fn approaching_wheel_is_stopped_and_bounced() {
        let (mut particles, handle, contacts) = falling(-2.0);
        let dt = 0.1;
        ContactForce::new(0.0, 0.2).apply_force(handle, &mut particles, &contacts, dt);
        particles.integrate_all(dt);

        // velocity is reversed to 0.2 of its approach speed
        let vz = particles.get(handle).map(|p| p.get_linear_velocity().z);
        assert_relative_eq!(vz.unwrap_or_default(), 0.4, epsilon = 1e-5);
    }

    #[test]
    fn no_contact_means_no_reaction() {
        let (mut particles, handle, _) = falling(-2.0);
        ContactForce::new(450.0, 0.2).apply_force(handle, &mut particles, &ContactSet::new(), 0.02);

        assert_eq!(particles.get(handle).map(|p| p.get_force_accumulator()), Some(Vector3::zero()));
    }

    #[test]
    fn zero_dt_drops_impulse_term() {
        let contact = ContactForce::new(450.0, 0.2);
        assert_eq!(contact.reaction(20.0, -3.0, 0.0), 450.0);
        assert!(contact.reaction(20.0, -3.0, 0.02) > 450.0);
    }
}
