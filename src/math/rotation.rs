use crate::math::{Matrix3, Vector3};
use std::fmt;
use std::ops::{Mul, MulAssign};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Quaternion for representing rotations in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Quaternion {
    /// Real component
    pub w: f32,

    /// First imaginary component
    pub x: f32,

    /// Second imaginary component
    pub y: f32,

    /// Third imaginary component
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quaternion {
    /// Creates a new quaternion
    #[inline]
    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Creates an identity quaternion (no rotation)
    #[inline]
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Creates a quaternion from an axis-angle representation
    pub fn from_axis_angle(axis: Vector3, angle: f32) -> Self {
        let half_angle = angle * 0.5;
        let s = half_angle.sin();
        let c = half_angle.cos();

        let axis = axis.normalize();

        Self {
            w: c,
            x: axis.x * s,
            y: axis.y * s,
            z: axis.z * s,
        }
    }

    /// Converts the quaternion to a rotation matrix
    pub fn to_rotation_matrix(&self) -> Matrix3 {
        let w = self.w;
        let x = self.x;
        let y = self.y;
        let z = self.z;

        let xx = x * x;
        let xy = x * y;
        let xz = x * z;
        let xw = x * w;

        let yy = y * y;
        let yz = y * z;
        let yw = y * w;

        let zz = z * z;
        let zw = z * w;

        Matrix3 {
            data: [
                [1.0 - 2.0 * (yy + zz), 2.0 * (xy - zw), 2.0 * (xz + yw)],
                [2.0 * (xy + zw), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - xw)],
                [2.0 * (xz - yw), 2.0 * (yz + xw), 1.0 - 2.0 * (xx + yy)],
            ],
        }
    }

    /// Returns the conjugate of this quaternion
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Normalizes this quaternion, falling back to identity when degenerate
    #[inline]
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > crate::math::EPSILON {
            Self {
                w: self.w / len,
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Quaternion::identity()
        }
    }

    /// Rotates a vector by this quaternion (q * v * q^-1)
    pub fn rotate_vector(&self, v: Vector3) -> Vector3 {
        let vec_quat = Quaternion::new(0.0, v.x, v.y, v.z);
        let result = *self * vec_quat * self.conjugate();

        Vector3::new(result.x, result.y, result.z)
    }

    /// Advances this orientation by `angular_velocity` over `dt` seconds
    pub fn integrate(&self, angular_velocity: Vector3, dt: f32) -> Self {
        if angular_velocity.is_zero() {
            return *self;
        }

        let angle = angular_velocity.length() * dt;
        let delta = Quaternion::from_axis_angle(angular_velocity, angle);
        (delta * *self).normalize()
    }

    /// Convert to nalgebra Quaternion
    #[inline]
    pub fn to_nalgebra(&self) -> nalgebra::Quaternion<f32> {
        nalgebra::Quaternion::new(self.w, self.x, self.y, self.z)
    }

    /// Convert from nalgebra Quaternion
    #[inline]
    pub fn from_nalgebra(q: &nalgebra::Quaternion<f32>) -> Self {
        Self {
            w: q.scalar(),
            x: q.vector()[0],
            y: q.vector()[1],
            z: q.vector()[2],
        }
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.w, self.x, self.y, self.z)
    }
}

// Hamilton product
impl Mul for Quaternion {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }
}

impl MulAssign for Quaternion {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}
