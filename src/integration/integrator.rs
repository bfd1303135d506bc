use crate::bodies::RigidBody;
use crate::math::Vector3;

/// Trait for numerical integration algorithms
pub trait Integrator {
    /// Advances a body's end-of-step state over a time step
    fn integrate(&mut self, body: &mut RigidBody, gravity: Vector3, dt: f32);

    /// Returns the name of the integrator
    fn name(&self) -> &str;
}
