use crate::bodies::RigidBody;
use crate::collision::{CollisionParams, Contact};
use crate::math::{Vector3, EPSILON};
use crate::shapes::GeometryKind;

/// Applies the response for one contact to the two bodies, given in the
/// contact's body order
pub type ResolveFn = fn(&Contact, &mut RigidBody, &mut RigidBody, &CollisionParams);

/// Resolution functions indexed by `[kind_a][kind_b]`
pub(crate) fn resolve_table() -> [[ResolveFn; GeometryKind::COUNT]; GeometryKind::COUNT] {
    [
        // infinite plane                        sphere
        [resolve_plane_plane as ResolveFn, resolve_plane_sphere], // infinite plane
        [resolve_sphere_plane, resolve_sphere_sphere],            // sphere
    ]
}

fn radius_of(body: &RigidBody) -> f32 {
    body.get_geometry()
        .and_then(|geometry| geometry.as_sphere())
        .map_or(0.0, |sphere| sphere.get_radius())
}

/// Velocity of the point at offset `r` from the body's center
fn point_velocity(body: &RigidBody, r: Vector3) -> Vector3 {
    let state = body.state_t1();
    if body.is_spinnable() {
        state.velocity + state.angular_velocity.cross(&r)
    } else {
        state.velocity
    }
}

/// The rotational term `n · ((I⁻¹ (r × n)) × r)` of the impulse denominator
fn angular_term(body: &RigidBody, r: Vector3, normal: Vector3) -> f32 {
    if !body.can_spin() {
        return 0.0;
    }
    let spin = r.cross(&normal).component_mul(&body.get_inertia_itd());
    spin.cross(&r).dot(&normal)
}

pub fn resolve_plane_plane(
    _contact: &Contact,
    _body_a: &mut RigidBody,
    _body_b: &mut RigidBody,
    _params: &CollisionParams,
) {
}

/// Moves the sphere back to where it touched the plane, bounces it, then
/// spends the motion it lost along its new direction of travel.
pub fn resolve_plane_sphere(
    contact: &Contact,
    _plane: &mut RigidBody,
    sphere: &mut RigidBody,
    params: &CollisionParams,
) {
    let translatable = sphere.is_translatable();
    let residual = sphere.state_t1().position.distance(&contact.position);
    if translatable {
        sphere.state_t1_mut().position = contact.position;
    }

    let normal = contact.normal;
    let r = normal * -radius_of(sphere);
    let normal_speed = point_velocity(sphere, r).dot(&normal);

    if normal_speed < 0.0 {
        let denominator = sphere.effective_inverse_mass() + angular_term(sphere, r, normal);
        if denominator > EPSILON {
            let j = -(1.0 + params.plane_sphere_restitution) * normal_speed / denominator;
            sphere.apply_contact_impulse(normal * j, r);
        }
    }

    if translatable {
        let state = sphere.state_t1_mut();
        let direction = state.velocity.normalize();
        state.position.scaled_add(residual, direction);
    }
}

pub fn resolve_sphere_plane(
    contact: &Contact,
    sphere: &mut RigidBody,
    plane: &mut RigidBody,
    params: &CollisionParams,
) {
    resolve_plane_sphere(&contact.swapped(), plane, sphere, params);
}

/// Impulse exchange between two spheres along the contact normal, which
/// points from B toward A. After a swept hit both spheres are moved back to
/// where they touched; spheres that already overlapped keep their positions.
pub fn resolve_sphere_sphere(
    contact: &Contact,
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
    params: &CollisionParams,
) {
    let normal = contact.normal;
    let r_a = normal * -radius_of(body_a);
    let r_b = normal * radius_of(body_b);

    let relative_velocity = point_velocity(body_a, r_a) - point_velocity(body_b, r_b);
    let normal_speed = relative_velocity.dot(&normal);

    if normal_speed < 0.0 {
        let denominator = body_a.effective_inverse_mass()
            + body_b.effective_inverse_mass()
            + angular_term(body_a, r_a, normal)
            + angular_term(body_b, r_b, normal);

        if denominator > EPSILON {
            let j = -(1.0 + params.sphere_sphere_restitution) * normal_speed / denominator;
            let impulse = normal * j;
            body_a.apply_contact_impulse(impulse, r_a);
            body_b.apply_contact_impulse(-impulse, r_b);
        }
    }

    let u = contact.contact_time;
    if u <= 0.0 {
        return;
    }
    for body in [body_a, body_b] {
        if body.is_translatable() {
            let start = body.state_t0().position;
            let state = body.state_t1_mut();
            state.position = start.lerp(&state.position, u);
        }
    }
}
