use crate::bodies::RigidBody;
use crate::integration::Integrator;
use crate::math::Vector3;

/// Symplectic Euler integrator (semi-implicit Euler)
/// More stable than explicit Euler for physics simulations
#[derive(Debug, Default)]
pub struct SymplecticEulerIntegrator;

impl SymplecticEulerIntegrator {
    /// Creates a new Symplectic Euler integrator
    pub fn new() -> Self {
        Self
    }

    /// Folds gravity, queued impulses and damping into the velocities
    fn integrate_forces(body: &mut RigidBody, gravity: Vector3, dt: f32) {
        let oo_mass = body.effective_inverse_mass();
        let impulse = body.take_pending_impulse();
        let twist = body.take_pending_twist();
        let use_gravity = body.uses_gravity() && oo_mass > 0.0;
        let can_spin = body.can_spin();
        let itd = body.get_inertia_itd();
        let linear_factor = (1.0 - body.get_linear_damping() * dt).clamp(0.0, 1.0);
        let angular_factor = (1.0 - body.get_angular_damping() * dt).clamp(0.0, 1.0);

        let state = body.state_t1_mut();

        if use_gravity {
            state.velocity.scaled_add(dt, gravity);
        }
        state.velocity.scaled_add(oo_mass, impulse);
        state.velocity *= linear_factor;

        if can_spin {
            state.angular_momentum += twist;
            state.angular_momentum *= angular_factor;
        }
        state.angular_velocity = state.angular_momentum.component_mul(&itd);
    }
}

impl Integrator for SymplecticEulerIntegrator {
    fn integrate(&mut self, body: &mut RigidBody, gravity: Vector3, dt: f32) {
        if !body.is_active() {
            return;
        }

        // First integrate the forces to update velocities
        Self::integrate_forces(body, gravity, dt);

        // Update position using the *new* velocity
        if body.is_translatable() {
            let state = body.state_t1_mut();
            let velocity = state.velocity;
            state.position.scaled_add(dt, velocity);
            body.sync_geometry();
        }

        // Update rotation using the *new* angular velocity
        if body.is_spinnable() {
            let angular_velocity = body.state_t1().angular_velocity;
            let orientation = body.orientation_mut();
            *orientation = orientation.integrate(angular_velocity, dt);
        }
    }

    fn name(&self) -> &str {
        "SymplecticEuler"
    }
}
