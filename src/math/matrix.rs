use crate::math::{Quaternion, Vector3};
use nalgebra as na;
use std::fmt;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// A 3x3 row-major matrix, used for rotations
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Matrix3 {
    pub data: [[f32; 3]; 3],
}

/// A 4x4 row-major affine matrix
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct Matrix4 {
    pub data: [[f32; 4]; 4],
}

// === Matrix3 Implementation ===

impl Matrix3 {
    #[inline]
    pub fn new(data: [[f32; 3]; 3]) -> Self {
        Self { data }
    }

    #[inline]
    pub fn identity() -> Self {
        Self {
            data: [
                [1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, 0.0, 1.0],
            ],
        }
    }

    /// Multiplies the matrix by a vector
    #[inline]
    pub fn multiply_vector(&self, v: Vector3) -> Vector3 {
        let m = &self.data;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    #[inline]
    pub fn transpose(&self) -> Self {
        let m = &self.data;
        Self {
            data: [
                [m[0][0], m[1][0], m[2][0]],
                [m[0][1], m[1][1], m[2][1]],
                [m[0][2], m[1][2], m[2][2]],
            ],
        }
    }

    /// Convert to nalgebra Matrix3
    #[inline]
    pub fn to_nalgebra(&self) -> na::Matrix3<f32> {
        let m = &self.data;
        na::Matrix3::new(
            m[0][0], m[0][1], m[0][2],
            m[1][0], m[1][1], m[1][2],
            m[2][0], m[2][1], m[2][2],
        )
    }
}

impl fmt::Display for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "[ {}, {}, {} ]", self.data[0][0], self.data[0][1], self.data[0][2])?;
        writeln!(f, "[ {}, {}, {} ]", self.data[1][0], self.data[1][1], self.data[1][2])?;
        write!(f, "[ {}, {}, {} ]", self.data[2][0], self.data[2][1], self.data[2][2])
    }
}

// === Matrix4 Implementation ===

impl Matrix4 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            data: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Creates a 4x4 matrix from a 3x3 rotation matrix and a translation
    #[inline]
    pub fn from_rotation_translation(rotation: Matrix3, translation: Vector3) -> Self {
        Self {
            data: [
                [rotation.data[0][0], rotation.data[0][1], rotation.data[0][2], translation.x],
                [rotation.data[1][0], rotation.data[1][1], rotation.data[1][2], translation.y],
                [rotation.data[2][0], rotation.data[2][1], rotation.data[2][2], translation.z],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Builds the local-to-world matrix of a body at `position` with `orientation`
    #[inline]
    pub fn from_position_orientation(position: Vector3, orientation: Quaternion) -> Self {
        Self::from_rotation_translation(orientation.normalize().to_rotation_matrix(), position)
    }

    /// Transforms a point (w = 1)
    #[inline]
    pub fn multiply_point(&self, v: Vector3) -> Vector3 {
        let m = &self.data;
        Vector3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z + m[0][3],
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z + m[1][3],
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z + m[2][3],
        )
    }

    /// Extract the translation part of the matrix
    #[inline]
    pub fn get_translation(&self) -> Vector3 {
        Vector3::new(self.data[0][3], self.data[1][3], self.data[2][3])
    }

    /// Flattens the matrix column by column, the layout OpenGL-style
    /// renderers load directly.
    pub fn to_column_major(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = self.data[row][col];
            }
        }
        out
    }

    /// Convert to nalgebra Matrix4
    #[inline]
    pub fn to_nalgebra(&self) -> na::Matrix4<f32> {
        let m = &self.data;

        na::Matrix4::new(
            m[0][0], m[0][1], m[0][2], m[0][3],
            m[1][0], m[1][1], m[1][2], m[1][3],
            m[2][0], m[2][1], m[2][2], m[2][3],
            m[3][0], m[3][1], m[3][2], m[3][3],
        )
    }
}

impl fmt::Display for Matrix4 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "[ {}, {}, {}, {} ]", self.data[0][0], self.data[0][1], self.data[0][2], self.data[0][3])?;
        writeln!(f, "[ {}, {}, {}, {} ]", self.data[1][0], self.data[1][1], self.data[1][2], self.data[1][3])?;
        writeln!(f, "[ {}, {}, {}, {} ]", self.data[2][0], self.data[2][1], self.data[2][2], self.data[2][3])?;
        write!(f, "[ {}, {}, {}, {} ]", self.data[3][0], self.data[3][1], self.data[3][2], self.data[3][3])
    }
}
