use crate::core::BodyId;
use crate::math::Vector3;

/// Receives a notification for every contact resolved during `simulate`.
///
/// The callback is borrowed for the duration of the call and cannot reach
/// back into the engine; query resolved state through the property getters
/// once `simulate` has returned.
pub trait CollisionCallback {
    fn on_collision(&mut self, body_a: BodyId, body_b: BodyId);
}

impl<F> CollisionCallback for F
where
    F: FnMut(BodyId, BodyId),
{
    fn on_collision(&mut self, body_a: BodyId, body_b: BodyId) {
        self(body_a, body_b)
    }
}

/// A resolved collision between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// The first body, in detection order
    pub body_a: BodyId,

    /// The second body, in detection order
    pub body_b: BodyId,

    /// Contact position in world space
    pub position: Vector3,

    /// Contact normal
    pub normal: Vector3,

    /// Normalized time of impact within the sub-step
    pub contact_time: f32,

    /// Penetration depth at the end of the sub-step
    pub penetration: f32,
}

/// Collision events produced by the most recent `simulate` call
#[derive(Debug, Default)]
pub struct EventQueue {
    collision_events: Vec<CollisionEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            collision_events: Vec::new(),
        }
    }

    pub fn add_collision_event(&mut self, event: CollisionEvent) {
        self.collision_events.push(event);
    }

    pub fn collision_events(&self) -> &[CollisionEvent] {
        &self.collision_events
    }

    /// Clears all events; keeps the allocation for the next step
    pub fn clear(&mut self) {
        self.collision_events.clear();
    }
}
