use crate::bodies::{InertialKind, RigidBody};
use crate::collision::{CollisionEngine, CollisionParams, PoolStats};
use crate::constraints::{Constraint, DistanceConstraint};
use crate::core::storage::Storage;
use crate::core::{
    BodyId, BodyStorage, CollisionCallback, CollisionEvent, ConstraintId, ConstraintStorage,
    EventQueue, SimulationConfig, SpringId, SpringStorage,
};
use crate::error::PhysicsError;
use crate::forces::{ForceGenerator, Spring};
use crate::integration::{Integrator, SymplecticEulerIntegrator};
use crate::math::{Plane, Vector3};
use crate::shapes::GeometryDescriptor;
use crate::Result;
use tracing::{debug, warn};

/// The physics engine: owns every body, spring and constraint, and advances
/// them with `simulate`
pub struct PhysicsEngine {
    /// All rigid bodies in the world
    pub(super) bodies: BodyStorage<RigidBody>,

    /// All springs in the world
    pub(super) springs: SpringStorage<Spring>,

    /// All distance constraints in the world
    pub(super) constraints: ConstraintStorage<DistanceConstraint>,

    /// Narrow phase, resolution and the contact pool
    collision: CollisionEngine,

    integrator: SymplecticEulerIntegrator,

    /// Configuration for the simulation
    config: SimulationConfig,

    /// Collisions resolved during the last `simulate`
    events: EventQueue,

    /// Scratch space for the exhaustive pair scan
    candidate_ids: Vec<BodyId>,
    candidate_pairs: Vec<(BodyId, BodyId)>,
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PhysicsEngine {
    /// Creates a new engine with default settings
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Creates a new engine with the given configuration
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            bodies: BodyStorage::new(),
            springs: SpringStorage::new(),
            constraints: ConstraintStorage::new(),
            collision: CollisionEngine::with_params(
                config.contact_capacity,
                CollisionParams::from(&config),
            ),
            integrator: SymplecticEulerIntegrator::new(),
            config,
            events: EventQueue::new(),
            candidate_ids: Vec::new(),
            candidate_pairs: Vec::new(),
        }
    }

    /// Returns a reference to the simulation configuration
    pub fn get_config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replaces the configuration. The contact pool only ever grows, so a
    /// smaller `contact_capacity` leaves the pool as it is.
    pub fn set_config(&mut self, config: SimulationConfig) -> Result<()> {
        validate_time_step(config.min_time_step)?;
        if config.max_substeps == 0 {
            return Err(PhysicsError::InvalidParameter(
                "max_substeps must be at least 1".to_string(),
            ));
        }

        self.collision.set_params(CollisionParams::from(&config));
        self.collision.set_capacity(config.contact_capacity);
        self.config = config;
        self.config.contact_capacity = self.collision.capacity();
        Ok(())
    }

    /// Sets the gravity for the simulation
    pub fn set_gravity(&mut self, gravity: Vector3) {
        self.config.gravity = gravity;
    }

    /// Gets the current gravity
    pub fn get_gravity(&self) -> Vector3 {
        self.config.gravity
    }

    pub fn get_min_time_step(&self) -> f32 {
        self.config.min_time_step
    }

    /// Sets the largest sub-step `simulate` takes
    pub fn set_min_time_step(&mut self, dt: f32) -> Result<()> {
        validate_time_step(dt)?;
        self.config.min_time_step = dt;
        Ok(())
    }

    /// Grows the contact pool to hold at least `capacity` contacts
    pub fn set_contact_capacity(&mut self, capacity: usize) {
        self.collision.set_capacity(capacity);
        self.config.contact_capacity = self.collision.capacity();
    }

    pub fn contact_pool_stats(&self) -> PoolStats {
        self.collision.stats()
    }

    pub fn collision_engine(&self) -> &CollisionEngine {
        &self.collision
    }

    // === Bodies ===

    fn insert_body(&mut self, body: RigidBody) -> BodyId {
        let body = body.with_damping(self.config.linear_damping, self.config.angular_damping);
        let id = self.bodies.add(body);
        debug!(%id, kind = ?self.bodies.get(id).map(RigidBody::kind), "added rigid body");
        id
    }

    /// Adds an immovable infinite plane
    pub fn add_rigid_body_plane(&mut self, plane: Plane) -> BodyId {
        self.insert_body(RigidBody::new_plane(plane))
    }

    /// Adds a unit-mass sphere at the origin
    pub fn add_rigid_body_sphere(&mut self, radius: f32) -> Result<BodyId> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(PhysicsError::InvalidParameter(format!(
                "sphere radius must be positive, got {}",
                radius
            )));
        }
        Ok(self.insert_body(RigidBody::new_sphere(radius)))
    }

    /// Adds an empty spring mesh; fill it with `set_rigid_body_vector_array`
    /// and `set_rigid_body_int_array`
    pub fn add_spring_mesh(&mut self) -> BodyId {
        self.insert_body(RigidBody::new_spring_mesh())
    }

    /// Removes a body together with every spring and constraint attached to
    /// it. Returns false for an unknown id.
    pub fn remove_rigid_body(&mut self, id: BodyId) -> bool {
        if self.bodies.remove(id).is_none() {
            return false;
        }

        let springs = self.springs.remove_where(|spring| spring.affects_body(id));
        let constraints = self
            .constraints
            .remove_where(|constraint| constraint.involves_body(id));
        let contacts = self.collision.discard_contacts_for(id);

        debug!(
            %id,
            springs = springs.len(),
            constraints = constraints.len(),
            contacts,
            "removed rigid body"
        );
        true
    }

    /// Removes every body, spring and constraint
    pub fn remove_all(&mut self) {
        self.bodies.clear();
        self.springs.clear();
        self.constraints.clear();
        self.collision.end();
        self.events.clear();
    }

    pub fn get_body(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.get(id)
    }

    pub fn get_body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.get_mut(id)
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Ids of all bodies, in creation order
    pub fn body_ids(&self) -> Vec<BodyId> {
        self.bodies.handles()
    }

    /// The body's local-to-world matrix, column-major
    pub fn rigid_body_transform_matrix(&self, id: BodyId) -> Option<[f32; 16]> {
        self.bodies.get(id).map(RigidBody::transform_matrix)
    }

    pub fn geometry_descriptor(&self, id: BodyId) -> Option<GeometryDescriptor<'_>> {
        self.bodies.get(id).map(RigidBody::descriptor)
    }

    pub fn rigid_body_inertial_kind(&self, id: BodyId) -> Option<InertialKind> {
        self.bodies.get(id).map(RigidBody::get_inertial_kind)
    }

    pub fn set_rigid_body_inertial_kind(&mut self, id: BodyId, kind: InertialKind) -> bool {
        self.with_body(id, |body| body.set_inertial_kind(kind))
    }

    fn with_body(&mut self, id: BodyId, f: impl FnOnce(&mut RigidBody)) -> bool {
        match self.bodies.get_mut(id) {
            Some(body) => {
                f(body);
                true
            }
            None => false,
        }
    }

    /// Queues a linear impulse, applied on the next `simulate`
    pub fn add_impulse(&mut self, id: BodyId, impulse: Vector3) -> bool {
        self.with_body(id, |body| body.add_impulse(impulse))
    }

    /// Queues an angular impulse, applied on the next `simulate`
    pub fn add_twist(&mut self, id: BodyId, twist: Vector3) -> bool {
        self.with_body(id, |body| body.add_twist(twist))
    }

    /// Queues an impulse at a world-space point, applied on the next `simulate`
    pub fn add_twist_at(&mut self, id: BodyId, impulse: Vector3, point: Vector3) -> bool {
        self.with_body(id, |body| body.add_twist_at(impulse, point))
    }

    pub fn stop_moving(&mut self, id: BodyId) -> bool {
        self.with_body(id, RigidBody::stop_moving)
    }

    pub fn stop_spinning(&mut self, id: BodyId) -> bool {
        self.with_body(id, RigidBody::stop_spinning)
    }

    // === Springs and constraints ===

    fn check_endpoints(&self, a: BodyId, b: BodyId) -> Result<()> {
        self.bodies.get_or_err(a)?;
        self.bodies.get_or_err(b)?;
        if a == b {
            return Err(PhysicsError::InvalidParameter(format!(
                "{} cannot be connected to itself",
                a
            )));
        }
        Ok(())
    }

    /// Connects the centers of two bodies with a spring whose rest length is
    /// their current separation
    pub fn add_spring(&mut self, a: BodyId, b: BodyId) -> Result<SpringId> {
        self.check_endpoints(a, b)?;
        let rest_length = self.bodies.get_or_err(a)?.get_position().distance(
            &self.bodies.get_or_err(b)?.get_position(),
        );
        Ok(self.springs.add(Spring::new(a, b, rest_length)))
    }

    pub fn remove_spring(&mut self, id: SpringId) -> bool {
        self.springs.remove(id).is_some()
    }

    pub fn get_spring(&self, id: SpringId) -> Option<&Spring> {
        self.springs.get(id)
    }

    /// Keeps two bodies within `tolerance` of `distance` from each other
    pub fn add_distance_constraint(
        &mut self,
        a: BodyId,
        b: BodyId,
        distance: f32,
        tolerance: f32,
    ) -> Result<ConstraintId> {
        self.check_endpoints(a, b)?;
        if !(distance >= 0.0) || !(tolerance >= 0.0) || !distance.is_finite() {
            return Err(PhysicsError::InvalidParameter(format!(
                "distance {} and tolerance {} must be non-negative",
                distance, tolerance
            )));
        }

        let constraint = DistanceConstraint::new(a, b, distance, tolerance)
            .with_bias_factor(self.config.constraint_bias_factor);
        Ok(self.constraints.add(constraint))
    }

    pub fn remove_constraint(&mut self, id: ConstraintId) -> bool {
        self.constraints.remove(id).is_some()
    }

    pub fn get_constraint(&self, id: ConstraintId) -> Option<&DistanceConstraint> {
        self.constraints.get(id)
    }

    // === Simulation ===

    /// Collisions resolved during the last `simulate`, in resolution order
    pub fn collision_events(&self) -> &[CollisionEvent] {
        self.events.collision_events()
    }

    /// Advances the world by `dt` seconds, testing every pair of collidable
    /// bodies
    pub fn simulate(&mut self, dt: f32) -> Result<()> {
        self.simulate_with_callback(dt, &mut |_: BodyId, _: BodyId| {})
    }

    /// Like `simulate`, calling `callback` once per resolved contact
    pub fn simulate_with_callback(
        &mut self,
        dt: f32,
        callback: &mut dyn CollisionCallback,
    ) -> Result<()> {
        self.run(dt, None, callback)
    }

    /// Like `simulate_with_callback`, but only tests the given candidate
    /// pairs. Pairs naming unknown, inactive or non-collidable bodies are
    /// skipped.
    pub fn simulate_pairs(
        &mut self,
        dt: f32,
        pairs: &[(BodyId, BodyId)],
        callback: &mut dyn CollisionCallback,
    ) -> Result<()> {
        self.run(dt, Some(pairs), callback)
    }

    fn substeps(&self, dt: f32) -> Result<(u32, f32)> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(PhysicsError::InvalidParameter(format!(
                "time step must be finite and non-negative, got {}",
                dt
            )));
        }

        let wanted = (dt / self.config.min_time_step).ceil().max(1.0);
        let max = self.config.max_substeps.max(1);
        let count = if wanted > max as f32 {
            warn!(wanted, max, "time step needs too many sub-steps, clamping");
            max
        } else {
            wanted as u32
        };
        Ok((count, dt / count as f32))
    }

    fn run(
        &mut self,
        dt: f32,
        pairs: Option<&[(BodyId, BodyId)]>,
        callback: &mut dyn CollisionCallback,
    ) -> Result<()> {
        let (count, step) = self.substeps(dt)?;
        if dt == 0.0 {
            return Ok(());
        }

        self.events.clear();
        for (_, body) in self.bodies.iter_mut() {
            body.set_collided(false);
        }

        debug!(dt, substeps = count, step, "simulate");
        for _ in 0..count {
            self.step(step, pairs, callback)?;
        }
        Ok(())
    }

    fn step(
        &mut self,
        dt: f32,
        pairs: Option<&[(BodyId, BodyId)]>,
        callback: &mut dyn CollisionCallback,
    ) -> Result<()> {
        // Integrate
        for (_, spring) in self.springs.iter() {
            spring.apply_forces(&mut self.bodies, dt);
        }
        for (_, constraint) in self.constraints.iter_mut() {
            constraint.solve_velocity(dt, &mut self.bodies);
        }
        let gravity = self.config.gravity;
        for (_, body) in self.bodies.iter_mut() {
            self.integrator.integrate(body, gravity, dt);
        }

        // Detect and resolve
        self.collision.begin();
        let mut candidates = std::mem::take(&mut self.candidate_pairs);
        candidates.clear();
        match pairs {
            Some(pairs) => candidates.extend(
                pairs
                    .iter()
                    .copied()
                    .filter(|&(a, b)| a != b && self.is_candidate(a) && self.is_candidate(b)),
            ),
            None => self.collect_candidates(&mut candidates),
        }
        let result = self.detect_and_resolve(&candidates, callback);
        self.candidate_pairs = candidates;

        // Tear down even when detection failed
        self.collision.end();
        for (_, body) in self.bodies.iter_mut() {
            body.shift_state();
        }
        result
    }

    fn is_candidate(&self, id: BodyId) -> bool {
        self.bodies.get(id).map_or(false, |body| {
            body.is_active() && body.is_collidable() && body.get_geometry().is_some()
        })
    }

    fn collect_candidates(&mut self, pairs: &mut Vec<(BodyId, BodyId)>) {
        let mut ids = std::mem::take(&mut self.candidate_ids);
        ids.clear();
        ids.extend(
            self.bodies
                .iter()
                .filter(|(_, body)| {
                    body.is_active() && body.is_collidable() && body.get_geometry().is_some()
                })
                .map(|(id, _)| id),
        );

        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                pairs.push((a, b));
            }
        }
        self.candidate_ids = ids;
    }

    fn test_pair(&mut self, a: BodyId, b: BodyId) -> Result<()> {
        match self.collision.test_collision(&self.bodies, a, b) {
            Ok(_) => Ok(()),
            Err(PhysicsError::ContactPoolExhausted { capacity }) if self.config.grow_contact_pool => {
                let grown = (capacity * 2).max(1);
                warn!(capacity, grown, "contact pool exhausted, growing");
                self.set_contact_capacity(grown);
                self.collision.test_collision(&self.bodies, a, b).map(|_| ())
            }
            Err(err) => Err(err),
        }
    }

    fn detect_and_resolve(
        &mut self,
        candidates: &[(BodyId, BodyId)],
        callback: &mut dyn CollisionCallback,
    ) -> Result<()> {
        for &(a, b) in candidates {
            self.test_pair(a, b)?;
        }

        for n in 0..self.collision.active_count() {
            let Some(id) = self.collision.active_at(n) else {
                break;
            };
            self.collision.resolve(id, &mut self.bodies)?;

            if let Some(contact) = self.collision.contact(id).copied() {
                self.events.add_collision_event(CollisionEvent {
                    body_a: contact.body_a,
                    body_b: contact.body_b,
                    position: contact.position,
                    normal: contact.normal,
                    contact_time: contact.contact_time,
                    penetration: contact.penetration,
                });
                callback.on_collision(contact.body_a, contact.body_b);
            }
        }
        Ok(())
    }
}

fn validate_time_step(dt: f32) -> Result<()> {
    if dt > 0.0 && dt.is_finite() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidParameter(format!(
            "minimum time step must be positive, got {}",
            dt
        )))
    }
}
