mod plane;
mod sphere;
mod mesh;
mod descriptor;

pub use self::plane::InfinitePlane;
pub use self::sphere::Sphere;
pub use self::mesh::MeshData;
pub use self::descriptor::GeometryDescriptor;

use crate::bodies::InertialKind;
use crate::math::Vector3;
use std::fmt::Debug;

/// The collision geometry kinds understood by the narrow phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    InfinitePlane,
    Sphere,
}

impl GeometryKind {
    /// Number of geometry kinds, the side length of the dispatch tables
    pub const COUNT: usize = 2;

    /// Row / column of this kind in the dispatch tables
    #[inline]
    pub fn index(self) -> usize {
        match self {
            GeometryKind::InfinitePlane => 0,
            GeometryKind::Sphere => 1,
        }
    }
}

/// Base trait for collision shapes
pub trait Shape: Debug {
    /// Returns the geometry kind of the shape
    fn kind(&self) -> GeometryKind;

    /// Returns the bounding half-size of the shape
    fn extent(&self) -> Vector3;

    /// Returns the inertia model the shape uses by default
    fn inertial_kind(&self) -> InertialKind;
}

/// Per-body collision geometry, one wrapper per collidable body
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionGeometry {
    InfinitePlane(InfinitePlane),
    Sphere(Sphere),
}

impl CollisionGeometry {
    /// Returns the wrapped shape
    pub fn shape(&self) -> &dyn Shape {
        match self {
            CollisionGeometry::InfinitePlane(plane) => plane,
            CollisionGeometry::Sphere(sphere) => sphere,
        }
    }

    #[inline]
    pub fn kind(&self) -> GeometryKind {
        self.shape().kind()
    }

    pub fn as_plane(&self) -> Option<&InfinitePlane> {
        match self {
            CollisionGeometry::InfinitePlane(plane) => Some(plane),
            _ => None,
        }
    }

    pub fn as_sphere(&self) -> Option<&Sphere> {
        match self {
            CollisionGeometry::Sphere(sphere) => Some(sphere),
            _ => None,
        }
    }
}
