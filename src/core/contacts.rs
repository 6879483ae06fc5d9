use crate::core::ParticleHandle;
use crate::math::Vector3;

/// Ground contacts reported for one simulation step.
///
/// Holds at most one anchor-relative contact point per particle. A particle with
/// no entry is airborne for the step. The set is built fresh before each force
/// pass and passed by reference to every generator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactSet {
    points: Vec<Option<Vector3>>,
}

impl ContactSet {
    /// Creates an empty contact set (no particle in contact)
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Records the contact state of `handle` for this step
    pub fn set(&mut self, handle: ParticleHandle, point: Option<Vector3>) {
        let index = handle.index();
        if index >= self.points.len() {
            if point.is_none() {
                return;
            }
            self.points.resize(index + 1, None);
        }
        self.points[index] = point;
    }

    /// Returns the contact point of `handle`, if it touches the ground this step
    pub fn get(&self, handle: ParticleHandle) -> Option<Vector3> {
        self.points.get(handle.index()).copied().flatten()
    }

    /// Returns whether `handle` touches the ground this step
    pub fn is_in_contact(&self, handle: ParticleHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Number of particles in contact
    pub fn count(&self) -> usize {
        self.points.iter().filter(|p| p.is_some()).count()
    }

    /// Drops every contact
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_entries_read_as_no_contact() {
        let mut contacts = ContactSet::new();
        contacts.set(ParticleHandle(2), Some(Vector3::new(1.0, 0.0, 0.0)));

        assert!(!contacts.is_in_contact(ParticleHandle(0)));
        assert!(!contacts.is_in_contact(ParticleHandle(7)));
        assert_eq!(contacts.get(ParticleHandle(2)), Some(Vector3::new(1.0, 0.0, 0.0)));
        assert_eq!(contacts.count(), 1);
    }

    #[test]
    fn clearing_a_contact_overwrites_previous_point() {
        let mut contacts = ContactSet::new();
        contacts.set(ParticleHandle(0), Some(Vector3::zero()));
        contacts.set(ParticleHandle(0), None);

        assert_eq!(contacts.get(ParticleHandle(0)), None);
        assert_eq!(contacts.count(), 0);
    }
}
