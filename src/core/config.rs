use crate::math::Vector3;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Configuration parameters for the physics simulation
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    /// The largest sub-step `simulate` will take; longer frames are split
    pub min_time_step: f32,

    /// Upper bound on sub-steps per `simulate` call
    pub max_substeps: u32,

    /// Acceleration applied to every body with the use-gravity flag
    pub gravity: Vector3,

    /// Number of contacts pre-allocated in the contact pool
    pub contact_capacity: usize,

    /// Whether an exhausted contact pool grows instead of failing the step
    pub grow_contact_pool: bool,

    /// Coefficient of restitution for plane/sphere contacts
    pub plane_sphere_restitution: f32,

    /// Coefficient of restitution for sphere/sphere contacts
    pub sphere_sphere_restitution: f32,

    /// Tolerance used when comparing the extents of two immovable planes
    pub extent_epsilon: f32,

    /// Default linear velocity damping for new bodies (per second)
    pub linear_damping: f32,

    /// Default angular velocity damping for new bodies (per second)
    pub angular_damping: f32,

    /// Fraction of a distance constraint's error corrected per sub-step
    pub constraint_bias_factor: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_time_step: 1.0 / 120.0,
            max_substeps: 16,
            gravity: Vector3::new(0.0, -9.81, 0.0),
            contact_capacity: 1024,
            grow_contact_pool: true,
            plane_sphere_restitution: 0.60,
            sphere_sphere_restitution: 0.95,
            extent_epsilon: 1.0e-4,
            linear_damping: 0.0,
            angular_damping: 0.0,
            constraint_bias_factor: 0.2,
        }
    }
}
