use crate::bodies::RigidBody;
use crate::constraints::Constraint;
use crate::core::{BodyId, BodyStorage, Storage};
use crate::math::EPSILON;

/// Default fraction of the distance error corrected per step
pub const DEFAULT_BIAS_FACTOR: f32 = 0.2;

/// Keeps two body centers within `tolerance` of a target distance
#[derive(Debug, Clone)]
pub struct DistanceConstraint {
    /// The first body in the constraint
    body_a: BodyId,

    /// The second body in the constraint
    body_b: BodyId,

    /// The desired distance between the bodies
    distance: f32,

    /// Half-width of the band around `distance` in which no force is applied
    tolerance: f32,

    /// Fraction of the error outside the band corrected per step
    bias_factor: f32,

    /// Whether the constraint is enabled
    active: bool,
}

impl DistanceConstraint {
    /// Creates a new distance constraint
    pub fn new(body_a: BodyId, body_b: BodyId, distance: f32, tolerance: f32) -> Self {
        Self {
            body_a,
            body_b,
            distance: distance.max(0.0),
            tolerance: tolerance.max(0.0),
            bias_factor: DEFAULT_BIAS_FACTOR,
            active: true,
        }
    }

    pub fn with_bias_factor(mut self, bias_factor: f32) -> Self {
        self.bias_factor = bias_factor.clamp(0.0, 1.0);
        self
    }

    /// Returns the desired distance
    pub fn get_distance(&self) -> f32 {
        self.distance
    }

    /// Sets the desired distance
    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.max(0.0);
    }

    pub fn get_tolerance(&self) -> f32 {
        self.tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: f32) {
        self.tolerance = tolerance.max(0.0);
    }

    /// Returns whether the constraint is enabled
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Sets whether the constraint is enabled
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

impl Constraint for DistanceConstraint {
    fn constraint_type(&self) -> &'static str {
        "Distance"
    }

    fn get_bodies(&self) -> [BodyId; 2] {
        [self.body_a, self.body_b]
    }

    fn solve_velocity(&mut self, dt: f32, bodies: &mut BodyStorage<RigidBody>) {
        if !self.active || dt <= 0.0 {
            return;
        }

        // Get all the data we need with immutable borrows first
        let (n, length, rel_vel_along_n, inv_mass_a, inv_mass_b) = {
            let (Some(body_a), Some(body_b)) = (bodies.get(self.body_a), bodies.get(self.body_b)) else {
                return;
            };

            let ab = body_b.state_t1().position - body_a.state_t1().position;
            let length = ab.length();
            if length < EPSILON {
                return;
            }

            let n = ab / length;
            let rel_vel = body_b.state_t1().velocity - body_a.state_t1().velocity;
            (
                n,
                length,
                rel_vel.dot(&n),
                body_a.effective_inverse_mass(),
                body_b.effective_inverse_mass(),
            )
        };

        // Inside the tolerance band the constraint is slack
        let error = length - self.distance;
        let excess = if error > self.tolerance {
            error - self.tolerance
        } else if error < -self.tolerance {
            error + self.tolerance
        } else {
            return;
        };

        let k = inv_mass_a + inv_mass_b;
        if k <= EPSILON {
            return;
        }

        // Velocity along n that closes `bias_factor` of the excess this step
        let lambda = (excess * self.bias_factor / dt + rel_vel_along_n) / k;

        if let Some(body_a) = bodies.get_mut(self.body_a) {
            body_a.state_t1_mut().velocity.scaled_add(lambda * inv_mass_a, n);
        }

        if let Some(body_b) = bodies.get_mut(self.body_b) {
            body_b.state_t1_mut().velocity.scaled_add(-lambda * inv_mass_b, n);
        }
    }
}
