use crate::bodies::RigidBody;
use crate::collision::contact_solver::{resolve_table, ResolveFn};
use crate::collision::narrow_phase::{detect_table, DetectFn};
use crate::collision::{Contact, ContactId, ContactPool, PoolStats};
use crate::core::{BodyId, BodyStorage, SimulationConfig};
use crate::error::PhysicsError;
use crate::shapes::GeometryKind;
use crate::Result;
use std::fmt;
use tracing::trace;

/// Tunables read by the detection and resolution functions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionParams {
    pub plane_sphere_restitution: f32,
    pub sphere_sphere_restitution: f32,
    pub extent_epsilon: f32,
}

impl From<&SimulationConfig> for CollisionParams {
    fn from(config: &SimulationConfig) -> Self {
        Self {
            plane_sphere_restitution: config.plane_sphere_restitution,
            sphere_sphere_restitution: config.sphere_sphere_restitution,
            extent_epsilon: config.extent_epsilon,
        }
    }
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self::from(&SimulationConfig::default())
    }
}

/// Narrow-phase detection and impulse resolution over a pool of contacts.
///
/// A step runs `begin`, any number of `test_collision` / `resolve` calls,
/// then `end`, which hands every contact back to the pool.
pub struct CollisionEngine {
    pool: ContactPool,
    detect: [[DetectFn; GeometryKind::COUNT]; GeometryKind::COUNT],
    resolve: [[ResolveFn; GeometryKind::COUNT]; GeometryKind::COUNT],
    params: CollisionParams,
}

impl fmt::Debug for CollisionEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionEngine")
            .field("pool", &self.pool)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl CollisionEngine {
    pub fn new(capacity: usize) -> Self {
        Self::with_params(capacity, CollisionParams::default())
    }

    pub fn with_params(capacity: usize, params: CollisionParams) -> Self {
        Self {
            pool: ContactPool::new(capacity),
            detect: detect_table(),
            resolve: resolve_table(),
            params,
        }
    }

    pub fn params(&self) -> &CollisionParams {
        &self.params
    }

    pub fn set_params(&mut self, params: CollisionParams) {
        self.params = params;
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Grows the contact pool; the capacity never shrinks
    pub fn set_capacity(&mut self, capacity: usize) {
        self.pool.grow(capacity);
    }

    pub fn stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Starts a step with every contact in the free pool
    pub fn begin(&mut self) {
        self.pool.release_all();
    }

    /// Ends a step, returning all active contacts to the free pool
    pub fn end(&mut self) {
        self.pool.release_all();
    }

    /// Runs the swept test for the pair `(a, b)`.
    ///
    /// Returns the new active contact on a hit. Bodies without collision
    /// geometry never collide. Fails with `ContactPoolExhausted` when no free
    /// record is left, and with `ResourceNotFound` for unknown ids.
    pub fn test_collision(
        &mut self,
        bodies: &BodyStorage<RigidBody>,
        a: BodyId,
        b: BodyId,
    ) -> Result<Option<ContactId>> {
        let body_a = bodies.get_or_err(a)?;
        let body_b = bodies.get_or_err(b)?;

        let (Some(geometry_a), Some(geometry_b)) = (body_a.get_geometry(), body_b.get_geometry()) else {
            return Ok(None);
        };
        let detect = self.detect[geometry_a.kind().index()][geometry_b.kind().index()];

        let id = self.pool.acquire()?;
        let hit = match self.pool.get_mut(id) {
            Some(contact) => {
                contact.reset(a, b);
                detect(body_a, body_b, contact, &self.params)
            }
            None => false,
        };

        if hit {
            self.pool.activate(id);
            trace!(%a, %b, "contact");
            Ok(Some(id))
        } else {
            self.pool.release(id);
            Ok(None)
        }
    }

    /// Applies the response for an active contact and marks both bodies as
    /// collided
    pub fn resolve(&self, id: ContactId, bodies: &mut BodyStorage<RigidBody>) -> Result<()> {
        let contact = *self
            .pool
            .get(id)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("{:?} not found", id)))?;

        let (body_a, body_b) = bodies.get_pair_mut(contact.body_a, contact.body_b).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!(
                "bodies {} and {} of {:?}",
                contact.body_a, contact.body_b, id
            ))
        })?;

        let (Some(geometry_a), Some(geometry_b)) = (body_a.get_geometry(), body_b.get_geometry()) else {
            return Err(PhysicsError::SimulationError(format!(
                "{:?} references a body without collision geometry",
                id
            )));
        };
        let resolve = self.resolve[geometry_a.kind().index()][geometry_b.kind().index()];

        resolve(&contact, body_a, body_b, &self.params);
        body_a.set_collided(true);
        body_b.set_collided(true);
        Ok(())
    }

    pub fn contact(&self, id: ContactId) -> Option<&Contact> {
        self.pool.get(id)
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_len()
    }

    /// The `n`-th contact found this step
    pub fn active_at(&self, n: usize) -> Option<ContactId> {
        self.pool.active_at(n)
    }

    pub fn active_contacts(&self) -> impl Iterator<Item = &Contact> + '_ {
        self.pool.active().filter_map(move |id| self.pool.get(id))
    }

    /// Drops pending contacts that reference a removed body
    pub fn discard_contacts_for(&mut self, body: BodyId) -> usize {
        self.pool.release_for(body)
    }
}
