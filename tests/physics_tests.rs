use approx::{assert_abs_diff_eq, assert_relative_eq};
use sweep_phys::error::PhysicsError;
use sweep_phys::{
    BodyId, BodyKind, ConstraintBool, ConstraintScalar, InertialKind, PhysicsEngine, Plane,
    Quaternion, RigidBodyBool, RigidBodyIntArray, RigidBodyQuat, RigidBodyScalar, RigidBodyVector,
    RigidBodyVectorArray, SimulationConfig, SpringBool, SpringScalar, SpringU32, Vector3,
};

/// An engine without gravity that takes one 0.1 s sub-step per 0.1 s frame
fn weightless_engine() -> PhysicsEngine {
    PhysicsEngine::with_config(SimulationConfig {
        min_time_step: 0.1,
        gravity: Vector3::zero(),
        ..SimulationConfig::default()
    })
}

fn add_sphere(engine: &mut PhysicsEngine, position: Vector3, velocity: Vector3) -> BodyId {
    let id = engine.add_rigid_body_sphere(1.0).unwrap();
    engine.set_rigid_body_vector(id, RigidBodyVector::Position, position);
    engine.set_rigid_body_vector(id, RigidBodyVector::Velocity, velocity);
    id
}

fn add_mesh_at(engine: &mut PhysicsEngine, x: f32) -> BodyId {
    let id = engine.add_spring_mesh();
    engine.set_rigid_body_vector(id, RigidBodyVector::Position, Vector3::new(x, 0.0, 0.0));
    id
}

fn velocity_x(engine: &PhysicsEngine, id: BodyId) -> f32 {
    engine.rigid_body_vector(id, RigidBodyVector::Velocity).unwrap().x
}

#[test]
fn test_body_creation() {
    let mut engine = PhysicsEngine::new();
    let plane = engine.add_rigid_body_plane(Plane::default());
    let sphere = engine.add_rigid_body_sphere(0.5).unwrap();
    let mesh = engine.add_spring_mesh();

    assert_eq!(engine.body_count(), 3);
    assert_eq!(engine.body_ids(), vec![plane, sphere, mesh]);
    assert_eq!(engine.get_body(plane).unwrap().kind(), BodyKind::InfinitePlane);
    assert_eq!(engine.get_body(sphere).unwrap().kind(), BodyKind::Sphere);
    assert_eq!(engine.get_body(mesh).unwrap().kind(), BodyKind::SpringMesh);

    assert_eq!(engine.rigid_body_scalar(plane, RigidBodyScalar::Mass), Some(f32::INFINITY));
    assert_eq!(engine.rigid_body_scalar(sphere, RigidBodyScalar::Mass), Some(1.0));
    assert_eq!(engine.rigid_body_vector(sphere, RigidBodyVector::Extent), Some(Vector3::splat(0.5)));
    assert_eq!(engine.rigid_body_bool(plane, RigidBodyBool::Translatable), Some(false));
    assert_eq!(engine.rigid_body_bool(mesh, RigidBodyBool::Collidable), Some(false));

    assert!(matches!(
        engine.add_rigid_body_sphere(0.0),
        Err(PhysicsError::InvalidParameter(_))
    ));
    assert!(engine.add_rigid_body_sphere(f32::NAN).is_err());
}

#[test]
fn test_sphere_falls_under_gravity() {
    let mut engine = PhysicsEngine::new();
    let sphere = add_sphere(&mut engine, Vector3::new(0.0, 10.0, 0.0), Vector3::zero());

    for _ in 0..60 {
        engine.simulate(1.0 / 60.0).unwrap();
    }

    let velocity = engine.rigid_body_vector(sphere, RigidBodyVector::Velocity).unwrap();
    let position = engine.rigid_body_vector(sphere, RigidBodyVector::Position).unwrap();
    assert_relative_eq!(velocity.y, -9.81, epsilon = 1e-3);
    assert_abs_diff_eq!(position.y, 10.0 - 9.81 * 121.0 / 240.0, epsilon = 5e-2);
    assert_eq!(position.x, 0.0);
}

#[test]
fn test_sphere_bounces_on_plane() {
    let mut engine = weightless_engine();
    let plane = engine.add_rigid_body_plane(Plane::default());
    let sphere = add_sphere(&mut engine, Vector3::new(0.0, 1.5, 0.0), Vector3::new(0.0, -10.0, 0.0));

    engine.simulate(0.1).unwrap();

    let velocity = engine.rigid_body_vector(sphere, RigidBodyVector::Velocity).unwrap();
    let position = engine.rigid_body_vector(sphere, RigidBodyVector::Position).unwrap();
    assert_relative_eq!(velocity.y, 6.0, epsilon = 1e-4);
    assert!(position.y >= 1.0);

    let events = engine.collision_events();
    assert_eq!(events.len(), 1);
    assert_eq!((events[0].body_a, events[0].body_b), (plane, sphere));
    assert_relative_eq!(events[0].contact_time, 0.5, epsilon = 1e-5);

    assert_eq!(engine.rigid_body_bool(sphere, RigidBodyBool::Collided), Some(true));
    assert_eq!(engine.rigid_body_bool(plane, RigidBodyBool::Collided), Some(true));

    // Next frame the sphere moves away and nothing collides
    engine.simulate(0.1).unwrap();
    assert!(engine.collision_events().is_empty());
    assert_eq!(engine.rigid_body_bool(sphere, RigidBodyBool::Collided), Some(false));
}

#[test]
fn test_penetrating_sphere_is_pushed_out() {
    let mut engine = weightless_engine();
    engine.add_rigid_body_plane(Plane::default());
    let sphere = add_sphere(&mut engine, Vector3::new(0.0, 0.8, 0.0), Vector3::zero());

    engine.simulate(0.1).unwrap();

    let position = engine.rigid_body_vector(sphere, RigidBodyVector::Position).unwrap();
    assert!(position.y >= 1.0 - 1e-5);
}

#[test]
fn test_moved_plane_carries_its_surface() {
    let mut engine = weightless_engine();
    let plane = engine.add_rigid_body_plane(Plane::default());
    assert!(engine.set_rigid_body_vector(plane, RigidBodyVector::Position, Vector3::new(0.0, 2.0, 0.0)));
    let sphere = add_sphere(&mut engine, Vector3::new(0.0, 3.5, 0.0), Vector3::new(0.0, -10.0, 0.0));

    engine.simulate(0.1).unwrap();

    assert_relative_eq!(engine.collision_events()[0].contact_time, 0.5, epsilon = 1e-5);
    assert_relative_eq!(
        engine.rigid_body_vector(sphere, RigidBodyVector::Velocity).unwrap().y,
        6.0,
        epsilon = 1e-4
    );
}

#[test]
fn test_head_on_spheres() {
    let mut engine = weightless_engine();
    let a = add_sphere(&mut engine, Vector3::new(-1.5, 0.0, 0.0), Vector3::new(10.0, 0.0, 0.0));
    let b = add_sphere(&mut engine, Vector3::new(1.5, 0.0, 0.0), Vector3::new(-10.0, 0.0, 0.0));

    engine.simulate(0.1).unwrap();

    assert_relative_eq!(velocity_x(&engine, a), -9.5, epsilon = 1e-4);
    assert_relative_eq!(velocity_x(&engine, b), 9.5, epsilon = 1e-4);

    let event = engine.collision_events()[0];
    assert_abs_diff_eq!(event.normal, Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-6);
}

#[test]
fn test_slow_spheres_meet_at_frame_rate() {
    let mut engine = PhysicsEngine::with_config(SimulationConfig {
        gravity: Vector3::zero(),
        ..SimulationConfig::default()
    });
    let a = engine.add_rigid_body_sphere(0.5).unwrap();
    let b = engine.add_rigid_body_sphere(0.5).unwrap();
    // Closing at 0.1 m/s; contact falls midway through a frame
    engine.set_rigid_body_vector(a, RigidBodyVector::Position, Vector3::new(-0.6002, 0.0, 0.0));
    engine.set_rigid_body_vector(a, RigidBodyVector::Velocity, Vector3::new(0.05, 0.0, 0.0));
    engine.set_rigid_body_vector(b, RigidBodyVector::Position, Vector3::new(0.6002, 0.0, 0.0));
    engine.set_rigid_body_vector(b, RigidBodyVector::Velocity, Vector3::new(-0.05, 0.0, 0.0));

    let mut first_hit = None;
    for _ in 0..400 {
        engine.simulate(1.0 / 120.0).unwrap();
        if let Some(event) = engine.collision_events().first() {
            first_hit = Some(*event);
            break;
        }
    }

    let event = first_hit.expect("spheres should meet");
    assert!(event.contact_time > 0.0 && event.contact_time <= 1.0);

    let pa = engine.rigid_body_vector(a, RigidBodyVector::Position).unwrap();
    let pb = engine.rigid_body_vector(b, RigidBodyVector::Position).unwrap();
    assert!(pa.distance(&pb) >= 1.0 - 1e-4);
    assert!(velocity_x(&engine, a) < 0.0);
    assert!(velocity_x(&engine, b) > 0.0);
}

#[test]
fn test_callback_sees_every_contact() {
    let mut engine = weightless_engine();
    let plane = engine.add_rigid_body_plane(Plane::default());
    let left = add_sphere(&mut engine, Vector3::new(-5.0, 1.5, 0.0), Vector3::new(0.0, -10.0, 0.0));
    let right = add_sphere(&mut engine, Vector3::new(5.0, 1.5, 0.0), Vector3::new(0.0, -10.0, 0.0));

    let mut hits = Vec::new();
    engine
        .simulate_with_callback(0.1, &mut |a: BodyId, b: BodyId| hits.push((a, b)))
        .unwrap();

    assert_eq!(hits, vec![(plane, left), (plane, right)]);
    assert_eq!(engine.collision_events().len(), 2);
}

#[test]
fn test_simulate_pairs_only_tests_given_pairs() {
    let mut engine = weightless_engine();
    let plane = engine.add_rigid_body_plane(Plane::default());
    let sphere = add_sphere(&mut engine, Vector3::new(0.0, 1.5, 0.0), Vector3::new(0.0, -10.0, 0.0));

    // Self pairs are skipped, so the sphere tunnels into the plane
    let mut count = 0;
    engine
        .simulate_pairs(0.1, &[(sphere, sphere)], &mut |_: BodyId, _: BodyId| count += 1)
        .unwrap();
    assert_eq!(count, 0);
    assert_relative_eq!(
        engine.rigid_body_vector(sphere, RigidBodyVector::Position).unwrap().y,
        0.5,
        epsilon = 1e-5
    );

    engine.set_rigid_body_vector(sphere, RigidBodyVector::Position, Vector3::new(0.0, 1.5, 0.0));
    engine
        .simulate_pairs(0.1, &[(plane, sphere)], &mut |_: BodyId, _: BodyId| count += 1)
        .unwrap();
    assert_eq!(count, 1);
    assert!(engine.rigid_body_vector(sphere, RigidBodyVector::Velocity).unwrap().y > 0.0);
}

#[test]
fn test_plane_pairs() {
    let mut engine = weightless_engine();
    let floor = engine.add_rigid_body_plane(Plane::default());
    engine.add_rigid_body_plane(Plane::new(-Vector3::unit_y(), -10.0));

    engine.simulate(0.1).unwrap();
    assert!(engine.collision_events().is_empty());

    let wall = engine.add_rigid_body_plane(Plane::new(Vector3::unit_x(), 0.0));
    engine.simulate(0.1).unwrap();
    assert!(engine.collision_events().iter().any(|event| event.body_a == floor && event.body_b == wall));
    assert_eq!(engine.rigid_body_bool(wall, RigidBodyBool::Collided), Some(true));
}

#[test]
fn test_time_step_validation() {
    let mut engine = PhysicsEngine::new();
    let sphere = add_sphere(&mut engine, Vector3::new(0.0, 5.0, 0.0), Vector3::zero());

    assert!(matches!(engine.simulate(-1.0), Err(PhysicsError::InvalidParameter(_))));
    assert!(engine.simulate(f32::NAN).is_err());

    engine.simulate(0.0).unwrap();
    assert_eq!(
        engine.rigid_body_vector(sphere, RigidBodyVector::Position),
        Some(Vector3::new(0.0, 5.0, 0.0))
    );

    assert!(engine.set_min_time_step(0.0).is_err());
    assert!(engine.set_min_time_step(-0.5).is_err());
    engine.set_min_time_step(0.01).unwrap();
    assert_eq!(engine.get_min_time_step(), 0.01);

    let bad = SimulationConfig {
        min_time_step: f32::INFINITY,
        ..SimulationConfig::default()
    };
    assert!(engine.set_config(bad).is_err());
    assert_eq!(engine.get_min_time_step(), 0.01);
}

#[test]
fn test_sub_steps_are_clamped() {
    let mut engine = PhysicsEngine::with_config(SimulationConfig {
        min_time_step: 0.01,
        max_substeps: 4,
        ..SimulationConfig::default()
    });
    let sphere = add_sphere(&mut engine, Vector3::new(0.0, 100.0, 0.0), Vector3::zero());

    engine.simulate(1.0).unwrap();

    // The full frame is still simulated, in fewer and longer steps
    let velocity = engine.rigid_body_vector(sphere, RigidBodyVector::Velocity).unwrap();
    assert_relative_eq!(velocity.y, -9.81, epsilon = 1e-3);
}

#[test]
fn test_contact_pool_grows_on_demand() {
    let config = SimulationConfig {
        min_time_step: 0.1,
        gravity: Vector3::zero(),
        contact_capacity: 1,
        ..SimulationConfig::default()
    };

    let mut engine = PhysicsEngine::with_config(config.clone());
    engine.add_rigid_body_plane(Plane::default());
    add_sphere(&mut engine, Vector3::new(-5.0, 1.5, 0.0), Vector3::new(0.0, -10.0, 0.0));
    add_sphere(&mut engine, Vector3::new(5.0, 1.5, 0.0), Vector3::new(0.0, -10.0, 0.0));

    engine.simulate(0.1).unwrap();
    assert_eq!(engine.collision_events().len(), 2);
    let stats = engine.contact_pool_stats();
    assert!(stats.capacity >= 2);
    assert_eq!((stats.active, stats.free), (0, stats.capacity));

    let mut engine = PhysicsEngine::with_config(SimulationConfig {
        grow_contact_pool: false,
        ..config
    });
    engine.add_rigid_body_plane(Plane::default());
    add_sphere(&mut engine, Vector3::new(-5.0, 1.5, 0.0), Vector3::new(0.0, -10.0, 0.0));
    add_sphere(&mut engine, Vector3::new(5.0, 1.5, 0.0), Vector3::new(0.0, -10.0, 0.0));

    assert_eq!(
        engine.simulate(0.1),
        Err(PhysicsError::ContactPoolExhausted { capacity: 1 })
    );
    let stats = engine.contact_pool_stats();
    assert_eq!((stats.active, stats.free, stats.capacity), (0, 1, 1));
}

#[test]
fn test_impulses_apply_on_next_step() {
    let mut engine = weightless_engine();
    let sphere = engine.add_rigid_body_sphere(1.0).unwrap();
    assert!(engine.set_rigid_body_scalar(sphere, RigidBodyScalar::Mass, 2.0));

    assert!(engine.add_impulse(sphere, Vector3::new(4.0, 0.0, 0.0)));
    assert_eq!(velocity_x(&engine, sphere), 0.0);

    engine.simulate(0.1).unwrap();
    assert_relative_eq!(velocity_x(&engine, sphere), 2.0, epsilon = 1e-6);

    // Queued impulses are consumed once
    engine.simulate(0.1).unwrap();
    assert_relative_eq!(velocity_x(&engine, sphere), 2.0, epsilon = 1e-6);

    assert!(engine.stop_moving(sphere));
    assert_eq!(velocity_x(&engine, sphere), 0.0);
}

#[test]
fn test_twist_spins_the_body() {
    let mut engine = weightless_engine();
    let sphere = engine.add_rigid_body_sphere(1.0).unwrap();
    assert_relative_eq!(
        engine.get_body(sphere).unwrap().get_inertia_itd(),
        Vector3::splat(2.5),
        epsilon = 1e-5
    );

    assert!(engine.add_twist(sphere, Vector3::new(0.0, 0.0, 1.0)));
    engine.simulate(0.1).unwrap();

    let omega = engine.rigid_body_vector(sphere, RigidBodyVector::AngularVelocity).unwrap();
    assert_relative_eq!(omega.z, 2.5, epsilon = 1e-5);
    let orientation = engine.rigid_body_quat(sphere, RigidBodyQuat::Orientation).unwrap();
    assert_ne!(orientation, Quaternion::identity());

    assert!(engine.stop_spinning(sphere));
    assert_eq!(
        engine.rigid_body_vector(sphere, RigidBodyVector::AngularMomentum),
        Some(Vector3::zero())
    );

    // Bodies that cannot spin ignore twists
    engine.set_rigid_body_bool(sphere, RigidBodyBool::Spinnable, false);
    engine.add_twist(sphere, Vector3::new(0.0, 0.0, 1.0));
    engine.simulate(0.1).unwrap();
    assert_eq!(
        engine.rigid_body_vector(sphere, RigidBodyVector::AngularVelocity),
        Some(Vector3::zero())
    );
}

#[test]
fn test_off_center_impulse_adds_spin() {
    let mut engine = weightless_engine();
    let sphere = engine.add_rigid_body_sphere(1.0).unwrap();

    engine.add_twist_at(sphere, Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
    engine.simulate(0.1).unwrap();

    assert_relative_eq!(velocity_x(&engine, sphere), 1.0, epsilon = 1e-6);
    let momentum = engine.rigid_body_vector(sphere, RigidBodyVector::AngularMomentum).unwrap();
    assert_abs_diff_eq!(momentum, Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
}

#[test]
fn test_inertial_kind() {
    let mut engine = PhysicsEngine::new();
    let sphere = engine.add_rigid_body_sphere(1.0).unwrap();
    assert_eq!(engine.rigid_body_inertial_kind(sphere), Some(InertialKind::Sphere));

    assert!(engine.set_rigid_body_inertial_kind(sphere, InertialKind::Box));
    assert_relative_eq!(
        engine.get_body(sphere).unwrap().get_inertia_itd(),
        Vector3::splat(1.5),
        epsilon = 1e-5
    );

    // Sphere inertia of an uneven body takes its largest half-size as the radius
    let mesh = engine.add_spring_mesh();
    assert!(engine.set_rigid_body_vector(mesh, RigidBodyVector::Extent, Vector3::new(1.0, 3.0, 2.0)));
    assert!(engine.set_rigid_body_inertial_kind(mesh, InertialKind::Sphere));
    assert_relative_eq!(
        engine.get_body(mesh).unwrap().get_inertia_itd(),
        Vector3::splat(1.0 / (0.4 * 9.0)),
        epsilon = 1e-5
    );
}

#[test]
fn test_inactive_body_does_not_move() {
    let mut engine = PhysicsEngine::new();
    let sphere = add_sphere(&mut engine, Vector3::new(0.0, 5.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
    assert!(engine.set_rigid_body_bool(sphere, RigidBodyBool::Active, false));

    engine.simulate(0.1).unwrap();
    assert_eq!(
        engine.rigid_body_vector(sphere, RigidBodyVector::Position),
        Some(Vector3::new(0.0, 5.0, 0.0))
    );
}

#[test]
fn test_property_sentinels() {
    let mut engine = PhysicsEngine::new();
    let plane = engine.add_rigid_body_plane(Plane::default());
    let sphere = engine.add_rigid_body_sphere(1.0).unwrap();
    assert!(engine.remove_rigid_body(sphere));

    assert_eq!(engine.rigid_body_scalar(sphere, RigidBodyScalar::Mass), None);
    assert_eq!(engine.rigid_body_vector(sphere, RigidBodyVector::Position), None);
    assert_eq!(engine.rigid_body_bool(sphere, RigidBodyBool::Active), None);
    assert_eq!(engine.rigid_body_transform_matrix(sphere), None);
    assert!(!engine.set_rigid_body_vector(sphere, RigidBodyVector::Velocity, Vector3::unit_x()));
    assert!(!engine.add_impulse(sphere, Vector3::unit_x()));

    // Collided is read-only, planes are infinitely heavy and keep their extent
    assert!(!engine.set_rigid_body_bool(plane, RigidBodyBool::Collided, true));
    assert!(!engine.set_rigid_body_scalar(plane, RigidBodyScalar::Mass, 5.0));
    assert!(!engine.set_rigid_body_vector(plane, RigidBodyVector::Extent, Vector3::splat(1.0)));

    let other = engine.add_rigid_body_sphere(1.0).unwrap();
    assert_ne!(other, sphere);
    assert!(!engine.set_rigid_body_scalar(other, RigidBodyScalar::Mass, -1.0));
    assert!(!engine.set_rigid_body_scalar(other, RigidBodyScalar::LinearVelocityDamp, -1.0));
    assert!(engine.set_rigid_body_scalar(other, RigidBodyScalar::Mass, f32::INFINITY));
    assert_eq!(engine.rigid_body_scalar(other, RigidBodyScalar::Mass), Some(f32::INFINITY));
}

#[test]
fn test_sphere_extent_sets_radius() {
    let mut engine = PhysicsEngine::new();
    let sphere = engine.add_rigid_body_sphere(1.0).unwrap();

    assert!(engine.set_rigid_body_vector(sphere, RigidBodyVector::Extent, Vector3::new(0.5, 2.0, 1.0)));
    assert_eq!(engine.rigid_body_vector(sphere, RigidBodyVector::Extent), Some(Vector3::splat(2.0)));
    assert_eq!(engine.geometry_descriptor(sphere).unwrap().radius, Some(2.0));
}

#[test]
fn test_transform_matrix() {
    let mut engine = PhysicsEngine::new();
    let sphere = add_sphere(&mut engine, Vector3::new(1.0, 2.0, 3.0), Vector3::zero());

    let m = engine.rigid_body_transform_matrix(sphere).unwrap();
    assert_eq!(&m[12..16], &[1.0f32, 2.0, 3.0, 1.0]);
    assert_eq!((m[0], m[5], m[10]), (1.0, 1.0, 1.0));

    let quarter_turn = Quaternion::from_axis_angle(Vector3::unit_y(), std::f32::consts::FRAC_PI_2);
    engine.set_rigid_body_quat(sphere, RigidBodyQuat::Orientation, quarter_turn);
    let m = engine.rigid_body_transform_matrix(sphere).unwrap();
    assert_abs_diff_eq!(m[2], -1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(m[8], 1.0, epsilon = 1e-6);
}

#[test]
fn test_removal_cascades() {
    let mut engine = PhysicsEngine::new();
    let a = engine.add_rigid_body_sphere(1.0).unwrap();
    let b = add_sphere(&mut engine, Vector3::new(3.0, 0.0, 0.0), Vector3::zero());
    let c = add_sphere(&mut engine, Vector3::new(6.0, 0.0, 0.0), Vector3::zero());

    let ab = engine.add_spring(a, b).unwrap();
    let bc = engine.add_spring(b, c).unwrap();
    let constraint = engine.add_distance_constraint(a, c, 6.0, 0.1).unwrap();
    assert_relative_eq!(engine.spring_scalar(ab, SpringScalar::RestLength).unwrap(), 3.0);

    assert!(engine.remove_rigid_body(a));
    assert!(!engine.remove_rigid_body(a));

    assert_eq!(engine.spring_u32(ab, SpringU32::BodyA), None);
    assert!(engine.get_spring(ab).is_none());
    assert!(engine.get_constraint(constraint).is_none());
    assert_eq!(engine.spring_u32(bc, SpringU32::BodyA), Some(b.raw()));

    assert!(matches!(engine.add_spring(a, b), Err(PhysicsError::ResourceNotFound(_))));
    assert!(matches!(engine.add_spring(b, b), Err(PhysicsError::InvalidParameter(_))));
    assert!(engine.add_distance_constraint(b, c, -1.0, 0.0).is_err());
}

#[test]
fn test_spring_endpoints() {
    let mut engine = PhysicsEngine::new();
    let a = engine.add_spring_mesh();
    let b = engine.add_spring_mesh();
    let c = engine.add_spring_mesh();
    let spring = engine.add_spring(a, b).unwrap();

    assert!(engine.set_spring_u32(spring, SpringU32::BodyB, c.raw()));
    assert_eq!(engine.spring_u32(spring, SpringU32::BodyB), Some(c.raw()));
    // Both ends on one body, or an unknown body, is refused
    assert!(!engine.set_spring_u32(spring, SpringU32::BodyB, a.raw()));
    assert!(!engine.set_spring_u32(spring, SpringU32::BodyA, 999));

    assert!(!engine.set_spring_scalar(spring, SpringScalar::Stiffness, -1.0));
    assert!(engine.set_spring_scalar(spring, SpringScalar::Stiffness, 25.0));
    assert_eq!(engine.spring_scalar(spring, SpringScalar::Stiffness), Some(25.0));

    assert!(engine.remove_spring(spring));
    assert!(!engine.remove_spring(spring));
}

#[test]
fn test_stretched_spring_pulls_bodies_together() {
    let mut engine = weightless_engine();
    let a = add_mesh_at(&mut engine, 0.0);
    let b = add_mesh_at(&mut engine, 4.0);
    let spring = engine.add_spring(a, b).unwrap();
    engine.set_spring_scalar(spring, SpringScalar::RestLength, 2.0);

    engine.simulate(0.1).unwrap();

    assert!(velocity_x(&engine, a) > 0.0);
    assert!(velocity_x(&engine, b) < 0.0);
    assert_relative_eq!(velocity_x(&engine, a), -velocity_x(&engine, b), epsilon = 1e-6);
}

#[test]
fn test_compressed_spring() {
    let mut engine = weightless_engine();
    let a = add_mesh_at(&mut engine, 0.0);
    let b = add_mesh_at(&mut engine, 1.0);
    let spring = engine.add_spring(a, b).unwrap();
    engine.set_spring_scalar(spring, SpringScalar::RestLength, 3.0);

    // A rope does not push
    assert_eq!(engine.spring_bool(spring, SpringBool::ResistCompression), Some(true));
    engine.set_spring_bool(spring, SpringBool::ResistCompression, false);
    engine.simulate(0.1).unwrap();
    assert_eq!(velocity_x(&engine, a), 0.0);
    assert_eq!(velocity_x(&engine, b), 0.0);

    engine.set_spring_bool(spring, SpringBool::ResistCompression, true);
    engine.simulate(0.1).unwrap();
    assert!(velocity_x(&engine, a) < 0.0);
    assert!(velocity_x(&engine, b) > 0.0);
}

#[test]
fn test_distance_constraint() {
    let mut engine = weightless_engine();
    let a = add_mesh_at(&mut engine, 0.0);
    let b = add_mesh_at(&mut engine, 5.0);
    engine.add_distance_constraint(a, b, 2.0, 0.5).unwrap();

    engine.simulate(0.1).unwrap();
    assert!(velocity_x(&engine, a) > 0.0);
    assert!(velocity_x(&engine, b) < 0.0);

    // Inside the tolerance band nothing happens
    let mut engine = weightless_engine();
    let a = add_mesh_at(&mut engine, 0.0);
    let b = add_mesh_at(&mut engine, 2.3);
    let slack = engine.add_distance_constraint(a, b, 2.0, 0.5).unwrap();
    engine.simulate(0.1).unwrap();
    assert_eq!(velocity_x(&engine, a), 0.0);

    assert_eq!(engine.constraint_scalar(slack, ConstraintScalar::Tolerance), Some(0.5));
    assert!(engine.set_constraint_scalar(slack, ConstraintScalar::Distance, 1.0));
    assert!(engine.set_constraint_bool(slack, ConstraintBool::Active, false));
    engine.simulate(0.1).unwrap();
    assert_eq!(velocity_x(&engine, a), 0.0);

    assert!(engine.remove_constraint(slack));
    assert!(engine.constraint_bool(slack, ConstraintBool::Active).is_none());
}

#[test]
fn test_spring_mesh_arrays() {
    let mut engine = PhysicsEngine::new();
    let mesh = engine.add_spring_mesh();
    let sphere = engine.add_rigid_body_sphere(1.0).unwrap();

    let data = [0.0, 0.0, 0.0, 9.0, 2.0, 4.0, 6.0, 9.0];
    assert!(engine.set_rigid_body_vector_array(mesh, RigidBodyVectorArray::Positions, &data, 4, 2));
    assert_eq!(
        engine.rigid_body_vector_array(mesh, RigidBodyVectorArray::Positions),
        Some(&[Vector3::zero(), Vector3::new(2.0, 4.0, 6.0)][..])
    );
    assert_eq!(engine.rigid_body_vector(mesh, RigidBodyVector::Extent), Some(Vector3::new(1.0, 2.0, 3.0)));

    assert!(engine.set_rigid_body_int_array(mesh, RigidBodyIntArray::Indices, &[0, 1, 0]));
    assert_eq!(engine.rigid_body_int_array(mesh, RigidBodyIntArray::Indices), Some(&[0u32, 1, 0][..]));

    // Bad strides, short buffers and non-mesh bodies are refused
    assert!(!engine.set_rigid_body_vector_array(mesh, RigidBodyVectorArray::Positions, &data, 2, 2));
    assert!(!engine.set_rigid_body_vector_array(mesh, RigidBodyVectorArray::Positions, &data, 4, 3));
    assert!(!engine.set_rigid_body_vector_array(sphere, RigidBodyVectorArray::Positions, &data, 4, 2));
    assert_eq!(engine.rigid_body_vector_array(sphere, RigidBodyVectorArray::Positions), None);
    assert!(!engine.set_rigid_body_int_array(sphere, RigidBodyIntArray::Indices, &[0]));
}

#[test]
fn test_remove_all() {
    let mut engine = PhysicsEngine::new();
    let a = engine.add_rigid_body_sphere(1.0).unwrap();
    let b = engine.add_rigid_body_sphere(1.0).unwrap();
    let spring = engine.add_spring(a, b).unwrap();

    engine.remove_all();

    assert_eq!(engine.body_count(), 0);
    assert!(engine.get_spring(spring).is_none());
    let stats = engine.contact_pool_stats();
    assert_eq!(stats.free, stats.capacity);

    // Ids keep counting up after a reset
    let c = engine.add_rigid_body_sphere(1.0).unwrap();
    assert!(c.raw() > b.raw());
}
