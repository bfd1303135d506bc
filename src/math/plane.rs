use crate::math::Vector3;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// An infinite plane defined by a unit normal and its offset from the origin
/// along that normal. Points with `normal · p > distance` lie in front.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Plane {
    /// The normal vector of the plane (always normalized)
    normal: Vector3,

    /// The distance from the origin to the plane along the normal
    distance: f32,
}

impl Plane {
    /// Creates a new plane with the given normal and distance
    pub fn new(normal: Vector3, distance: f32) -> Self {
        Self {
            normal: normal.normalize(),
            distance,
        }
    }

    /// Creates a new plane from a normal and a point on the plane
    pub fn from_point_normal(point: Vector3, normal: Vector3) -> Self {
        let normal = normal.normalize();
        let distance = normal.dot(&point);
        Self { normal, distance }
    }

    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Returns the signed distance from a point to the plane
    #[inline]
    pub fn signed_distance_to(&self, point: Vector3) -> f32 {
        self.normal.dot(&point) - self.distance
    }

    /// Returns the closest point on the plane to the given point
    pub fn closest_point_to(&self, point: Vector3) -> Vector3 {
        point - self.normal * self.signed_distance_to(point)
    }
}

impl Default for Plane {
    /// The ground plane `y = 0`, facing up
    fn default() -> Self {
        Self::new(Vector3::unit_y(), 0.0)
    }
}
