mod vector;
mod matrix;
mod rotation;
mod plane;
mod quadratic;

pub use vector::Vector3;
pub use matrix::{Matrix3, Matrix4};
pub use rotation::Quaternion;
pub use plane::Plane;
pub use quadratic::solve_quadratic;

/// Constant for a very small number, used for comparisons
pub const EPSILON: f32 = 1.0e-6;

/// Returns true if the value is approximately zero
#[inline]
pub fn approx_zero(a: f32) -> bool {
    a.abs() < EPSILON
}
