use crate::bodies::InertialKind;
use crate::math::{Plane, Vector3};
use crate::shapes::{GeometryKind, Shape};

/// Half-size reported for an infinite plane along its in-plane axes
pub const PLANE_HALF_SIZE: f32 = 1.0e6;

/// An infinite plane collision shape.
///
/// The plane keeps its normal; translating the owning body slides the plane
/// along with it.
#[derive(Debug, Clone, PartialEq)]
pub struct InfinitePlane {
    plane: Plane,
}

impl InfinitePlane {
    pub fn new(plane: Plane) -> Self {
        Self { plane }
    }

    pub fn get_plane(&self) -> &Plane {
        &self.plane
    }

    pub fn get_normal(&self) -> Vector3 {
        self.plane.normal()
    }

    /// Returns the signed distance from `point` to the plane
    #[inline]
    pub fn signed_distance(&self, point: Vector3) -> f32 {
        self.plane.signed_distance_to(point)
    }
}

impl Shape for InfinitePlane {
    fn kind(&self) -> GeometryKind {
        GeometryKind::InfinitePlane
    }

    // Huge along the plane, flat along the normal's dominant axis, so two
    // parallel planes report the same extent.
    fn extent(&self) -> Vector3 {
        let n = self.plane.normal();
        let (ax, ay, az) = (n.x.abs(), n.y.abs(), n.z.abs());
        let mut extent = Vector3::splat(PLANE_HALF_SIZE);
        if ax >= ay && ax >= az {
            extent.x = 0.0;
        } else if ay >= az {
            extent.y = 0.0;
        } else {
            extent.z = 0.0;
        }
        extent
    }

    fn inertial_kind(&self) -> InertialKind {
        InertialKind::Box
    }
}
