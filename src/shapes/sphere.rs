use crate::bodies::InertialKind;
use crate::math::Vector3;
use crate::shapes::{GeometryKind, Shape};

/// A spherical collision shape
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    /// The radius of the sphere
    radius: f32,
}

impl Sphere {
    /// Creates a new sphere with the given radius
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(0.0),
        }
    }

    /// Returns the radius of the sphere
    pub fn get_radius(&self) -> f32 {
        self.radius
    }

    /// Sets the radius of the sphere
    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius.max(0.0);
    }
}

impl Shape for Sphere {
    fn kind(&self) -> GeometryKind {
        GeometryKind::Sphere
    }

    fn extent(&self) -> Vector3 {
        Vector3::splat(self.radius)
    }

    fn inertial_kind(&self) -> InertialKind {
        InertialKind::Sphere
    }
}
