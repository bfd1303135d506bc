use crate::bodies::RigidBody;
use crate::core::{BodyId, BodyStorage, Storage};
use crate::forces::ForceGenerator;
use crate::math::{Vector3, EPSILON};

/// Default spring stiffness coefficient
pub const DEFAULT_STIFFNESS: f32 = 10.0;

/// Default spring damping coefficient
pub const DEFAULT_DAMPING: f32 = 0.5;

/// A damped spring between attachment points on two bodies
#[derive(Debug, Clone)]
pub struct Spring {
    /// The first body connected by the spring
    body_a: BodyId,

    /// The second body connected by the spring
    body_b: BodyId,

    /// The attachment point on the first body (in local space)
    attach_a: Vector3,

    /// The attachment point on the second body (in local space)
    attach_b: Vector3,

    /// The spring rest length
    rest_length: f32,

    /// The spring stiffness coefficient (higher values mean stiffer springs)
    stiffness: f32,

    /// The spring damping coefficient (higher values mean more damping)
    damping: f32,

    /// If false the spring only pulls when stretched and never pushes
    resist_compression: bool,
}

impl Spring {
    /// Creates a spring between the centers of two bodies
    pub fn new(body_a: BodyId, body_b: BodyId, rest_length: f32) -> Self {
        Self {
            body_a,
            body_b,
            attach_a: Vector3::zero(),
            attach_b: Vector3::zero(),
            rest_length: rest_length.max(0.0),
            stiffness: DEFAULT_STIFFNESS,
            damping: DEFAULT_DAMPING,
            resist_compression: true,
        }
    }

    pub fn get_body_a(&self) -> BodyId {
        self.body_a
    }

    pub fn set_body_a(&mut self, body: BodyId) {
        self.body_a = body;
    }

    pub fn get_body_b(&self) -> BodyId {
        self.body_b
    }

    pub fn set_body_b(&mut self, body: BodyId) {
        self.body_b = body;
    }

    pub fn get_attach_a(&self) -> Vector3 {
        self.attach_a
    }

    pub fn set_attach_a(&mut self, point: Vector3) {
        self.attach_a = point;
    }

    pub fn get_attach_b(&self) -> Vector3 {
        self.attach_b
    }

    pub fn set_attach_b(&mut self, point: Vector3) {
        self.attach_b = point;
    }

    /// Gets the spring rest length
    pub fn get_rest_length(&self) -> f32 {
        self.rest_length
    }

    /// Sets the spring rest length
    pub fn set_rest_length(&mut self, rest_length: f32) {
        self.rest_length = rest_length.max(0.0);
    }

    /// Gets the spring stiffness coefficient
    pub fn get_stiffness(&self) -> f32 {
        self.stiffness
    }

    /// Sets the spring stiffness coefficient
    pub fn set_stiffness(&mut self, stiffness: f32) {
        self.stiffness = stiffness.max(0.0);
    }

    /// Gets the spring damping coefficient
    pub fn get_damping(&self) -> f32 {
        self.damping
    }

    /// Sets the spring damping coefficient
    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping.max(0.0);
    }

    pub fn resists_compression(&self) -> bool {
        self.resist_compression
    }

    pub fn set_resist_compression(&mut self, resist: bool) {
        self.resist_compression = resist;
    }

    /// World-space attachment point on `body` for local point `attach`
    fn world_point(body: &RigidBody, attach: Vector3) -> Vector3 {
        body.state_t1().position + body.get_orientation().rotate_vector(attach)
    }
}

impl ForceGenerator for Spring {
    fn apply_forces(&self, bodies: &mut BodyStorage<RigidBody>, dt: f32) {
        // Get all the data we need with immutable borrows first
        let (direction, stretch, relative_speed) = {
            let (Some(body_a), Some(body_b)) = (bodies.get(self.body_a), bodies.get(self.body_b)) else {
                return;
            };

            let spring_vector =
                Self::world_point(body_b, self.attach_b) - Self::world_point(body_a, self.attach_a);
            let current_length = spring_vector.length();
            if current_length < EPSILON {
                return;
            }

            let direction = spring_vector / current_length;
            let relative_velocity = body_a.state_t1().velocity - body_b.state_t1().velocity;
            (direction, current_length - self.rest_length, relative_velocity.dot(&direction))
        };

        if !self.resist_compression && stretch < 0.0 {
            return;
        }

        // Hooke's law plus damping against the closing speed
        let mut magnitude = self.stiffness * stretch - self.damping * relative_speed;
        if !self.resist_compression {
            magnitude = magnitude.max(0.0);
        }
        let impulse = direction * (magnitude * dt);

        if let Some(body_a) = bodies.get_mut(self.body_a) {
            let oo_mass = body_a.effective_inverse_mass();
            body_a.state_t1_mut().velocity.scaled_add(oo_mass, impulse);
        }

        if let Some(body_b) = bodies.get_mut(self.body_b) {
            let oo_mass = body_b.effective_inverse_mass();
            body_b.state_t1_mut().velocity.scaled_add(-oo_mass, impulse);
        }
    }

    fn get_affected_bodies(&self) -> [BodyId; 2] {
        [self.body_a, self.body_b]
    }
}
