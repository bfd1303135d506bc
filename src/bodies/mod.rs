mod rigid_body;

pub use self::rigid_body::{BodyState, RigidBody};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// What a body is, which decides how it collides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum BodyKind {
    /// A static, world-fixed infinite plane
    InfinitePlane,

    /// A sphere
    Sphere,

    /// A particle/spring mesh; carries no collision geometry
    SpringMesh,
}

/// How a body's inverse inertia diagonal is derived from its mass and extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum InertialKind {
    /// Uniform inertia of a solid sphere whose radius is the largest
    /// component of `extent`
    Sphere,

    /// Per-axis inertia of a solid box with half-size `extent`
    Box,
}

/// Flags for controlling body behavior
pub mod body_flags {
    use bitflags::bitflags;

    bitflags! {
        /// Flags for controlling the behavior of rigid bodies
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct BodyFlags: u32 {
            /// Body takes part in the simulation
            const ACTIVE = 0x01;

            /// Body is accelerated by the engine's gravity
            const USE_GRAVITY = 0x02;

            /// Body is considered by collision detection
            const COLLIDABLE = 0x04;

            /// Body may rotate
            const SPINNABLE = 0x08;

            /// Body may move
            const TRANSLATABLE = 0x10;
        }
    }
}
