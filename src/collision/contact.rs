use crate::core::BodyId;
use crate::math::Vector3;

/// Index of a contact record inside the contact pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactId(pub(crate) usize);

impl ContactId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A pooled record of one collision found during a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// The position of the contact point in world space
    pub position: Vector3,

    /// The normal of the contact surface
    pub normal: Vector3,

    /// The fraction of the step at which the collision occurred (0-1)
    pub contact_time: f32,

    /// The penetration depth of the contact
    pub penetration: f32,

    pub body_a: BodyId,
    pub body_b: BodyId,
}

impl Contact {
    /// An unused pool record
    pub(crate) fn empty() -> Self {
        Self {
            position: Vector3::zero(),
            normal: Vector3::zero(),
            contact_time: 0.0,
            penetration: 0.0,
            body_a: BodyId(0),
            body_b: BodyId(0),
        }
    }

    /// Clears the record for a new test between `body_a` and `body_b`
    pub(crate) fn reset(&mut self, body_a: BodyId, body_b: BodyId) {
        *self = Self {
            body_a,
            body_b,
            ..Self::empty()
        };
    }

    /// The same contact seen from the other body
    pub fn swapped(&self) -> Self {
        Self {
            normal: -self.normal,
            body_a: self.body_b,
            body_b: self.body_a,
            ..*self
        }
    }

    pub fn involves(&self, body: BodyId) -> bool {
        self.body_a == body || self.body_b == body
    }
}
