use crate::bodies::RigidBody;
use crate::core::{BodyId, BodyStorage};

/// Base trait for physics constraints
pub trait Constraint: std::fmt::Debug {
    /// Returns the type name of the constraint
    fn constraint_type(&self) -> &'static str;

    /// Returns the bodies involved in the constraint
    fn get_bodies(&self) -> [BodyId; 2];

    /// Checks if the constraint involves a specific body
    fn involves_body(&self, body: BodyId) -> bool {
        self.get_bodies().contains(&body)
    }

    /// Solves the velocity constraint against the bodies' end-of-step state
    fn solve_velocity(&mut self, dt: f32, bodies: &mut BodyStorage<RigidBody>);
}
