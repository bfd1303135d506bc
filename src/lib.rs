pub mod math;
pub mod core;
pub mod bodies;
pub mod shapes;
pub mod collision;
pub mod constraints;
pub mod forces;
pub mod integration;

/// Re-export common types for easier usage
pub use crate::core::{
    BodyId, CollisionCallback, CollisionEvent, ConstraintId, PhysicsEngine, SimulationConfig,
    SpringId,
};
pub use crate::core::properties::{
    ConstraintBool, ConstraintScalar, RigidBodyBool, RigidBodyIntArray, RigidBodyQuat,
    RigidBodyScalar, RigidBodyVector, RigidBodyVectorArray, SpringBool, SpringScalar, SpringU32,
    SpringVector,
};
pub use crate::bodies::{body_flags::BodyFlags, BodyKind, BodyState, InertialKind, RigidBody};
pub use crate::collision::{CollisionEngine, CollisionParams, Contact, ContactId, PoolStats};
pub use crate::constraints::DistanceConstraint;
pub use crate::forces::Spring;
pub use crate::math::{Plane, Quaternion, Vector3};
pub use crate::shapes::{GeometryDescriptor, GeometryKind, MeshData};

/// Error types for the physics engine
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum PhysicsError {
        #[error("Invalid parameter: {0}")]
        InvalidParameter(String),

        #[error("Resource not found: {0}")]
        ResourceNotFound(String),

        #[error("Contact pool exhausted ({capacity} contacts in use)")]
        ContactPoolExhausted { capacity: usize },

        #[error("Simulation stability error: {0}")]
        SimulationError(String),
    }
}

/// Result type for physics engine operations
pub type Result<T> = std::result::Result<T, error::PhysicsError>;

/// Engine version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
