//! Typed property protocol.
//!
//! Every getter returns `None` and every setter returns `false` when the id
//! is unknown or the property does not apply to that object.

use crate::bodies::body_flags::BodyFlags;
use crate::constraints::DistanceConstraint;
use crate::core::storage::Storage;
use crate::core::{BodyId, ConstraintId, PhysicsEngine, SpringId};
use crate::forces::Spring;
use crate::math::{Quaternion, Vector3};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Boolean rigid body properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum RigidBodyBool {
    Active,
    UseGravity,
    Collidable,
    Spinnable,
    Translatable,
    /// Read-only: a contact involving the body was resolved during the last `simulate`
    Collided,
}

impl RigidBodyBool {
    fn flag(self) -> Option<BodyFlags> {
        match self {
            RigidBodyBool::Active => Some(BodyFlags::ACTIVE),
            RigidBodyBool::UseGravity => Some(BodyFlags::USE_GRAVITY),
            RigidBodyBool::Collidable => Some(BodyFlags::COLLIDABLE),
            RigidBodyBool::Spinnable => Some(BodyFlags::SPINNABLE),
            RigidBodyBool::Translatable => Some(BodyFlags::TRANSLATABLE),
            RigidBodyBool::Collided => None,
        }
    }
}

/// Scalar rigid body properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum RigidBodyScalar {
    AngularVelocityDamp,
    LinearVelocityDamp,
    Mass,
}

/// Vector rigid body properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum RigidBodyVector {
    Extent,
    Position,
    Velocity,
    AngularVelocity,
    AngularMomentum,
}

/// Quaternion rigid body properties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum RigidBodyQuat {
    Orientation,
}

/// Vector-array rigid body properties, spring meshes only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum RigidBodyVectorArray {
    Positions,
}

/// Integer-array rigid body properties, spring meshes only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum RigidBodyIntArray {
    Indices,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum SpringBool {
    /// Push back when compressed as well as pull when stretched
    ResistCompression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum SpringScalar {
    Stiffness,
    Damping,
    RestLength,
}

/// Attachment points, in the local space of the attached body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum SpringVector {
    AttachPointA,
    AttachPointB,
}

/// Raw ids of the connected bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum SpringU32 {
    BodyA,
    BodyB,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ConstraintBool {
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum ConstraintScalar {
    Distance,
    Tolerance,
}

fn non_negative(value: f32) -> bool {
    value >= 0.0 && value.is_finite()
}

impl PhysicsEngine {
    // === Rigid bodies ===

    pub fn rigid_body_bool(&self, id: BodyId, prop: RigidBodyBool) -> Option<bool> {
        let body = self.bodies.get(id)?;
        Some(match prop.flag() {
            Some(flag) => body.get_flags().contains(flag),
            None => body.has_collided(),
        })
    }

    /// `Collided` is read-only and always fails
    pub fn set_rigid_body_bool(&mut self, id: BodyId, prop: RigidBodyBool, value: bool) -> bool {
        match (self.bodies.get_mut(id), prop.flag()) {
            (Some(body), Some(flag)) => {
                body.set_flag(flag, value);
                true
            }
            _ => false,
        }
    }

    /// Mass is `f32::INFINITY` for immovable bodies
    pub fn rigid_body_scalar(&self, id: BodyId, prop: RigidBodyScalar) -> Option<f32> {
        let body = self.bodies.get(id)?;
        Some(match prop {
            RigidBodyScalar::AngularVelocityDamp => body.get_angular_damping(),
            RigidBodyScalar::LinearVelocityDamp => body.get_linear_damping(),
            RigidBodyScalar::Mass => body.get_mass(),
        })
    }

    pub fn set_rigid_body_scalar(&mut self, id: BodyId, prop: RigidBodyScalar, value: f32) -> bool {
        let Some(body) = self.bodies.get_mut(id) else {
            return false;
        };
        match prop {
            RigidBodyScalar::AngularVelocityDamp => body.set_angular_damping(value),
            RigidBodyScalar::LinearVelocityDamp => body.set_linear_damping(value),
            RigidBodyScalar::Mass => body.set_mass(value),
        }
    }

    pub fn rigid_body_vector(&self, id: BodyId, prop: RigidBodyVector) -> Option<Vector3> {
        let body = self.bodies.get(id)?;
        Some(match prop {
            RigidBodyVector::Extent => body.get_extent(),
            RigidBodyVector::Position => body.get_position(),
            RigidBodyVector::Velocity => body.get_velocity(),
            RigidBodyVector::AngularVelocity => body.get_angular_velocity(),
            RigidBodyVector::AngularMomentum => body.get_angular_momentum(),
        })
    }

    pub fn set_rigid_body_vector(&mut self, id: BodyId, prop: RigidBodyVector, value: Vector3) -> bool {
        let Some(body) = self.bodies.get_mut(id) else {
            return false;
        };
        match prop {
            RigidBodyVector::Extent => return body.set_extent(value),
            RigidBodyVector::Position => body.set_position(value),
            RigidBodyVector::Velocity => body.set_velocity(value),
            RigidBodyVector::AngularVelocity => body.set_angular_velocity(value),
            RigidBodyVector::AngularMomentum => body.set_angular_momentum(value),
        }
        true
    }

    pub fn rigid_body_quat(&self, id: BodyId, prop: RigidBodyQuat) -> Option<Quaternion> {
        let body = self.bodies.get(id)?;
        Some(match prop {
            RigidBodyQuat::Orientation => body.get_orientation(),
        })
    }

    pub fn set_rigid_body_quat(&mut self, id: BodyId, prop: RigidBodyQuat, value: Quaternion) -> bool {
        let Some(body) = self.bodies.get_mut(id) else {
            return false;
        };
        match prop {
            RigidBodyQuat::Orientation => body.set_orientation(value),
        }
        true
    }

    pub fn rigid_body_vector_array(&self, id: BodyId, prop: RigidBodyVectorArray) -> Option<&[Vector3]> {
        let mesh = self.bodies.get(id)?.get_mesh()?;
        Some(match prop {
            RigidBodyVectorArray::Positions => mesh.get_positions(),
        })
    }

    /// Reads `count` vectors from `data`, the first components of consecutive
    /// vectors `stride` floats apart
    pub fn set_rigid_body_vector_array(
        &mut self,
        id: BodyId,
        prop: RigidBodyVectorArray,
        data: &[f32],
        stride: usize,
        count: usize,
    ) -> bool {
        let Some(body) = self.bodies.get_mut(id) else {
            return false;
        };
        match prop {
            RigidBodyVectorArray::Positions => body.set_mesh_positions(data, stride, count),
        }
    }

    pub fn rigid_body_int_array(&self, id: BodyId, prop: RigidBodyIntArray) -> Option<&[u32]> {
        let mesh = self.bodies.get(id)?.get_mesh()?;
        Some(match prop {
            RigidBodyIntArray::Indices => mesh.get_indices(),
        })
    }

    pub fn set_rigid_body_int_array(&mut self, id: BodyId, prop: RigidBodyIntArray, data: &[u32]) -> bool {
        let Some(body) = self.bodies.get_mut(id) else {
            return false;
        };
        match prop {
            RigidBodyIntArray::Indices => body.set_mesh_indices(data),
        }
    }

    // === Springs ===

    fn spring_mut(&mut self, id: SpringId) -> Option<&mut Spring> {
        self.springs.get_mut(id)
    }

    pub fn spring_bool(&self, id: SpringId, prop: SpringBool) -> Option<bool> {
        let spring = self.springs.get(id)?;
        Some(match prop {
            SpringBool::ResistCompression => spring.resists_compression(),
        })
    }

    pub fn set_spring_bool(&mut self, id: SpringId, prop: SpringBool, value: bool) -> bool {
        let Some(spring) = self.spring_mut(id) else {
            return false;
        };
        match prop {
            SpringBool::ResistCompression => spring.set_resist_compression(value),
        }
        true
    }

    pub fn spring_scalar(&self, id: SpringId, prop: SpringScalar) -> Option<f32> {
        let spring = self.springs.get(id)?;
        Some(match prop {
            SpringScalar::Stiffness => spring.get_stiffness(),
            SpringScalar::Damping => spring.get_damping(),
            SpringScalar::RestLength => spring.get_rest_length(),
        })
    }

    /// Negative values are rejected
    pub fn set_spring_scalar(&mut self, id: SpringId, prop: SpringScalar, value: f32) -> bool {
        if !non_negative(value) {
            return false;
        }
        let Some(spring) = self.spring_mut(id) else {
            return false;
        };
        match prop {
            SpringScalar::Stiffness => spring.set_stiffness(value),
            SpringScalar::Damping => spring.set_damping(value),
            SpringScalar::RestLength => spring.set_rest_length(value),
        }
        true
    }

    pub fn spring_vector(&self, id: SpringId, prop: SpringVector) -> Option<Vector3> {
        let spring = self.springs.get(id)?;
        Some(match prop {
            SpringVector::AttachPointA => spring.get_attach_a(),
            SpringVector::AttachPointB => spring.get_attach_b(),
        })
    }

    pub fn set_spring_vector(&mut self, id: SpringId, prop: SpringVector, value: Vector3) -> bool {
        let Some(spring) = self.spring_mut(id) else {
            return false;
        };
        match prop {
            SpringVector::AttachPointA => spring.set_attach_a(value),
            SpringVector::AttachPointB => spring.set_attach_b(value),
        }
        true
    }

    pub fn spring_u32(&self, id: SpringId, prop: SpringU32) -> Option<u32> {
        let spring = self.springs.get(id)?;
        Some(match prop {
            SpringU32::BodyA => spring.get_body_a().raw(),
            SpringU32::BodyB => spring.get_body_b().raw(),
        })
    }

    /// Reattaches one end of a spring. Fails if `body` is unknown or is the
    /// body at the other end.
    pub fn set_spring_u32(&mut self, id: SpringId, prop: SpringU32, body: u32) -> bool {
        let body = BodyId(body);
        if !self.bodies.contains(body) {
            return false;
        }
        let Some(spring) = self.spring_mut(id) else {
            return false;
        };
        match prop {
            SpringU32::BodyA if spring.get_body_b() != body => spring.set_body_a(body),
            SpringU32::BodyB if spring.get_body_a() != body => spring.set_body_b(body),
            _ => return false,
        }
        true
    }

    // === Constraints ===

    fn constraint_mut(&mut self, id: ConstraintId) -> Option<&mut DistanceConstraint> {
        self.constraints.get_mut(id)
    }

    pub fn constraint_bool(&self, id: ConstraintId, prop: ConstraintBool) -> Option<bool> {
        let constraint = self.constraints.get(id)?;
        Some(match prop {
            ConstraintBool::Active => constraint.is_active(),
        })
    }

    pub fn set_constraint_bool(&mut self, id: ConstraintId, prop: ConstraintBool, value: bool) -> bool {
        let Some(constraint) = self.constraint_mut(id) else {
            return false;
        };
        match prop {
            ConstraintBool::Active => constraint.set_active(value),
        }
        true
    }

    pub fn constraint_scalar(&self, id: ConstraintId, prop: ConstraintScalar) -> Option<f32> {
        let constraint = self.constraints.get(id)?;
        Some(match prop {
            ConstraintScalar::Distance => constraint.get_distance(),
            ConstraintScalar::Tolerance => constraint.get_tolerance(),
        })
    }

    /// Negative values are rejected
    pub fn set_constraint_scalar(&mut self, id: ConstraintId, prop: ConstraintScalar, value: f32) -> bool {
        if !non_negative(value) {
            return false;
        }
        let Some(constraint) = self.constraint_mut(id) else {
            return false;
        };
        match prop {
            ConstraintScalar::Distance => constraint.set_distance(value),
            ConstraintScalar::Tolerance => constraint.set_tolerance(value),
        }
        true
    }
}
