pub mod world;
pub mod config;
pub mod storage;
pub mod events;
pub mod properties;

pub use self::world::PhysicsEngine;
pub use self::config::SimulationConfig;
pub use self::storage::{BodyStorage, ConstraintStorage, Handle, HandleStorage, SpringStorage, Storage};
pub use self::events::{CollisionCallback, CollisionEvent, EventQueue};

use std::fmt;

/// A unique identifier for a body in the physics engine.
/// Ids start at 1 and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) u32);

/// A unique identifier for a spring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpringId(pub(crate) u32);

/// A unique identifier for a distance constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(pub(crate) u32);

macro_rules! impl_handle {
    ($name:ident, $label:literal) => {
        impl Handle for $name {
            fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            fn raw(self) -> u32 {
                self.0
            }
        }

        impl $name {
            /// Returns the raw integer value of the id
            pub fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

impl_handle!(BodyId, "body");
impl_handle!(SpringId, "spring");
impl_handle!(ConstraintId, "constraint");
