use crate::bodies::RigidBody;
use crate::core::{BodyId, BodyStorage};

/// Something that pushes on bodies during integration
pub trait ForceGenerator: std::fmt::Debug {
    /// Accumulates this generator's velocity changes into the bodies'
    /// end-of-step state
    fn apply_forces(&self, bodies: &mut BodyStorage<RigidBody>, dt: f32);

    /// Returns the bodies affected by this force generator
    fn get_affected_bodies(&self) -> [BodyId; 2];

    /// Returns true if the force generator affects the given body
    fn affects_body(&self, body: BodyId) -> bool {
        self.get_affected_bodies().contains(&body)
    }
}
