use crate::bodies::RigidBody;
use crate::collision::{CollisionParams, Contact};
use crate::math::{solve_quadratic, Vector3, EPSILON};
use crate::shapes::{GeometryKind, InfinitePlane, Sphere};
use approx::abs_diff_eq;
use tracing::{debug, warn};

/// Swept test between two bodies over the current step.
///
/// On a hit the function fills in the contact's geometry and returns true.
/// The body ids are set by the caller.
pub type DetectFn = fn(&RigidBody, &RigidBody, &mut Contact, &CollisionParams) -> bool;

/// Detection functions indexed by `[kind_a][kind_b]`
pub(crate) fn detect_table() -> [[DetectFn; GeometryKind::COUNT]; GeometryKind::COUNT] {
    [
        // infinite plane                      sphere
        [detect_plane_plane as DetectFn, detect_plane_sphere], // infinite plane
        [detect_sphere_plane, detect_sphere_sphere],           // sphere
    ]
}

fn plane_of(body: &RigidBody) -> Option<&InfinitePlane> {
    body.get_geometry()?.as_plane()
}

fn sphere_of(body: &RigidBody) -> Option<&Sphere> {
    body.get_geometry()?.as_sphere()
}

/// Two immovable planes collide only when their extents differ; any other
/// pair of planes always collides.
pub fn detect_plane_plane(
    body_a: &RigidBody,
    body_b: &RigidBody,
    _contact: &mut Contact,
    params: &CollisionParams,
) -> bool {
    if body_a.is_immovable() && body_b.is_immovable() {
        !abs_diff_eq!(
            body_a.get_extent(),
            body_b.get_extent(),
            epsilon = params.extent_epsilon
        )
    } else {
        true
    }
}

/// Sweeps the sphere's center against the plane. The normal is the plane's.
pub fn detect_plane_sphere(
    plane_body: &RigidBody,
    sphere_body: &RigidBody,
    contact: &mut Contact,
    _params: &CollisionParams,
) -> bool {
    let (Some(plane), Some(sphere)) = (plane_of(plane_body), sphere_of(sphere_body)) else {
        return false;
    };

    let normal = plane.get_normal();
    let radius = sphere.get_radius();
    let c0 = sphere_body.state_t0().position;
    let c1 = sphere_body.state_t1().position;
    let d0 = plane.signed_distance(c0);
    let d1 = plane.signed_distance(c1);

    if d0.abs() <= radius {
        // Already touching at the start of the step; resting contact is routine
        if d0 < radius - EPSILON {
            warn!(d0, radius, "sphere overlaps plane at start of step");
        } else {
            debug!(d0, radius, "sphere resting on plane");
        }
        contact.contact_time = 0.0;
        contact.normal = normal;
        contact.position = c0 + normal * (radius - d0);
        contact.penetration = radius - d0;
        true
    } else if d0 > radius && d1 < radius {
        let u = (d0 - radius) / (d0 - d1);
        contact.contact_time = u;
        contact.normal = normal;
        contact.position = c0.lerp(&c1, u);
        contact.penetration = radius - d1;
        true
    } else {
        false
    }
}

/// Sphere against plane: the plane/sphere test with the normal flipped so it
/// matches this body order.
pub fn detect_sphere_plane(
    sphere_body: &RigidBody,
    plane_body: &RigidBody,
    contact: &mut Contact,
    params: &CollisionParams,
) -> bool {
    let hit = detect_plane_sphere(plane_body, sphere_body, contact, params);
    if hit {
        contact.normal = -contact.normal;
    }
    hit
}

/// Solves `|s0 + u * v|² = (rA + rB)²` for the first time of contact `u`,
/// where `s0` is the separation at the start of the step and `v` the relative
/// displacement over it.
///
/// The normal points from B toward A.
pub fn detect_sphere_sphere(
    body_a: &RigidBody,
    body_b: &RigidBody,
    contact: &mut Contact,
    _params: &CollisionParams,
) -> bool {
    let (Some(sphere_a), Some(sphere_b)) = (sphere_of(body_a), sphere_of(body_b)) else {
        return false;
    };

    let radius_a = sphere_a.get_radius();
    let radius_ab = radius_a + sphere_b.get_radius();

    let (a0, a1) = (body_a.state_t0().position, body_a.state_t1().position);
    let (b0, b1) = (body_b.state_t0().position, body_b.state_t1().position);

    let s0 = a0 - b0;
    let v = (a1 - a0) - (b1 - b0);

    let c = s0.length_squared() - radius_ab * radius_ab;
    let u = if c <= 0.0 {
        let depth = radius_ab - s0.length();
        if depth > EPSILON {
            warn!(c, depth, "spheres overlap at start of step");
        } else {
            debug!(c, "spheres touching at start of step");
        }
        0.0
    } else {
        // With c > 0 both roots share a sign, so only u0 matters.
        match solve_quadratic(v.length_squared(), 2.0 * v.dot(&s0), c) {
            Some((u0, _)) if u0 > 0.0 && u0 <= 1.0 => u0,
            _ => return false,
        }
    };

    let a_u = a0.lerp(&a1, u);
    let b_u = b0.lerp(&b1, u);
    let contact_separation = a_u - b_u;
    let end_separation = a1 - b1;

    // The end-of-step separation is unusable if the spheres passed through
    // each other during the step.
    let direction = if end_separation.length() > EPSILON
        && end_separation.dot(&contact_separation) > 0.0
    {
        end_separation
    } else if contact_separation.length() > EPSILON {
        contact_separation
    } else {
        Vector3::unit_y()
    };
    let normal = direction.normalize();

    contact.contact_time = u;
    contact.normal = normal;
    contact.position = a_u - normal * radius_a;
    contact.penetration = (radius_ab - end_separation.length()).max(0.0);
    true
}
