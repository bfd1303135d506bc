use crate::bodies::{body_flags::BodyFlags, BodyKind, InertialKind};
use crate::math::{Matrix4, Plane, Quaternion, Vector3, EPSILON};
use crate::shapes::{CollisionGeometry, GeometryDescriptor, InfinitePlane, MeshData, Shape, Sphere};

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

/// Kinematic state of a body at one end of a time step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub struct BodyState {
    pub position: Vector3,
    pub velocity: Vector3,
    pub angular_velocity: Vector3,
    pub angular_momentum: Vector3,
}

/// A rigid body for physics simulation.
///
/// The body keeps two state slices: `T0`, the state at the start of the
/// current step, and `T1`, the state being built for its end. Outside of
/// `simulate` both slices agree.
#[derive(Debug, Clone)]
pub struct RigidBody {
    /// Collision geometry; `None` for spring meshes
    geometry: Option<CollisionGeometry>,

    /// Vertex data; only spring meshes carry it
    mesh: Option<MeshData>,

    state_t0: BodyState,
    state_t1: BodyState,

    orientation: Quaternion,

    /// Inverse mass, zero for an infinitely heavy body
    oo_mass: f32,

    /// Diagonal of the inverse inertia tensor
    inertia_itd: Vector3,

    inertial_kind: InertialKind,

    /// Bounding half-size
    extent: Vector3,

    linear_damping: f32,
    angular_damping: f32,

    flags: BodyFlags,

    /// Set when a contact involving this body was resolved during the last `simulate`
    collided: bool,

    /// Impulse queued for the next step
    pending_impulse: Vector3,

    /// Angular impulse queued for the next step
    pending_twist: Vector3,
}

impl RigidBody {
    fn with_parts(
        geometry: Option<CollisionGeometry>,
        mesh: Option<MeshData>,
        oo_mass: f32,
        flags: BodyFlags,
    ) -> Self {
        let (extent, inertial_kind) = match &geometry {
            Some(geometry) => (geometry.shape().extent(), geometry.shape().inertial_kind()),
            None => (Vector3::zero(), InertialKind::Box),
        };

        let mut body = Self {
            geometry,
            mesh,
            state_t0: BodyState::default(),
            state_t1: BodyState::default(),
            orientation: Quaternion::identity(),
            oo_mass,
            inertia_itd: Vector3::zero(),
            inertial_kind,
            extent,
            linear_damping: 0.0,
            angular_damping: 0.0,
            flags,
            collided: false,
            pending_impulse: Vector3::zero(),
            pending_twist: Vector3::zero(),
        };

        body.update_inertia();
        body
    }

    /// Creates an immovable infinite plane.
    ///
    /// The body's position is the point of the plane closest to the origin.
    pub fn new_plane(plane: Plane) -> Self {
        let position = plane.normal() * plane.distance();
        let mut body = Self::with_parts(
            Some(CollisionGeometry::InfinitePlane(InfinitePlane::new(plane))),
            None,
            0.0,
            BodyFlags::ACTIVE | BodyFlags::COLLIDABLE,
        );
        body.state_t0.position = position;
        body.state_t1.position = position;
        body
    }

    /// Creates a unit-mass sphere at the origin
    pub fn new_sphere(radius: f32) -> Self {
        Self::with_parts(
            Some(CollisionGeometry::Sphere(Sphere::new(radius))),
            None,
            1.0,
            BodyFlags::all(),
        )
    }

    /// Creates a unit-mass spring mesh with no vertices
    pub fn new_spring_mesh() -> Self {
        Self::with_parts(
            None,
            Some(MeshData::new()),
            1.0,
            BodyFlags::ACTIVE | BodyFlags::USE_GRAVITY | BodyFlags::TRANSLATABLE,
        )
    }

    /// Sets the damping coefficients a freshly created body starts with
    pub fn with_damping(mut self, linear: f32, angular: f32) -> Self {
        self.linear_damping = linear.max(0.0);
        self.angular_damping = angular.max(0.0);
        self
    }

    pub fn kind(&self) -> BodyKind {
        match &self.geometry {
            Some(CollisionGeometry::InfinitePlane(_)) => BodyKind::InfinitePlane,
            Some(CollisionGeometry::Sphere(_)) => BodyKind::Sphere,
            None => BodyKind::SpringMesh,
        }
    }

    pub fn get_geometry(&self) -> Option<&CollisionGeometry> {
        self.geometry.as_ref()
    }

    pub fn get_mesh(&self) -> Option<&MeshData> {
        self.mesh.as_ref()
    }

    /// State at the start of the current step
    pub fn state_t0(&self) -> &BodyState {
        &self.state_t0
    }

    /// State at the end of the current step
    pub fn state_t1(&self) -> &BodyState {
        &self.state_t1
    }

    pub(crate) fn state_t1_mut(&mut self) -> &mut BodyState {
        &mut self.state_t1
    }

    /// Commits the end-of-step state as the start of the next step
    pub(crate) fn shift_state(&mut self) {
        self.state_t0 = self.state_t1;
    }

    // === Kinematic state ===

    pub fn get_position(&self) -> Vector3 {
        self.state_t0.position
    }

    /// Teleports the body. A plane body carries its plane along.
    pub fn set_position(&mut self, position: Vector3) {
        self.state_t0.position = position;
        self.state_t1.position = position;
        self.sync_geometry();
    }

    pub fn get_velocity(&self) -> Vector3 {
        self.state_t0.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vector3) {
        self.state_t0.velocity = velocity;
        self.state_t1.velocity = velocity;
    }

    pub fn get_angular_velocity(&self) -> Vector3 {
        self.state_t0.angular_velocity
    }

    /// Sets the angular velocity, deriving the angular momentum from it
    pub fn set_angular_velocity(&mut self, angular_velocity: Vector3) {
        let itd = self.inertia_itd;
        let invert = |w: f32, i: f32| if i > EPSILON { w / i } else { 0.0 };
        let momentum = Vector3::new(
            invert(angular_velocity.x, itd.x),
            invert(angular_velocity.y, itd.y),
            invert(angular_velocity.z, itd.z),
        );
        self.set_angular_momentum(momentum);
    }

    pub fn get_angular_momentum(&self) -> Vector3 {
        self.state_t0.angular_momentum
    }

    pub fn set_angular_momentum(&mut self, angular_momentum: Vector3) {
        let angular_velocity = angular_momentum.component_mul(&self.inertia_itd);
        for state in [&mut self.state_t0, &mut self.state_t1] {
            state.angular_momentum = angular_momentum;
            state.angular_velocity = angular_velocity;
        }
    }

    pub fn get_orientation(&self) -> Quaternion {
        self.orientation
    }

    pub fn set_orientation(&mut self, orientation: Quaternion) {
        self.orientation = orientation.normalize();
    }

    pub(crate) fn orientation_mut(&mut self) -> &mut Quaternion {
        &mut self.orientation
    }

    // === Mass properties ===

    /// Returns the inverse mass; zero means infinitely heavy
    pub fn get_inverse_mass(&self) -> f32 {
        self.oo_mass
    }

    /// Returns the mass, `f32::INFINITY` for an immovable body
    pub fn get_mass(&self) -> f32 {
        if self.oo_mass > 0.0 {
            1.0 / self.oo_mass
        } else {
            f32::INFINITY
        }
    }

    /// Sets the mass. `f32::INFINITY` makes the body immovable by impulses.
    /// Returns false for zero, negative or NaN masses and for planes, which
    /// are always infinitely heavy.
    pub fn set_mass(&mut self, mass: f32) -> bool {
        if !(mass > 0.0) || self.kind() == BodyKind::InfinitePlane {
            return false;
        }
        self.oo_mass = if mass.is_finite() { 1.0 / mass } else { 0.0 };
        self.update_inertia();
        true
    }

    /// Inverse mass as seen by impulses; zero unless the body is active and
    /// may translate
    #[inline]
    pub fn effective_inverse_mass(&self) -> f32 {
        if self.is_active() && self.is_translatable() {
            self.oo_mass
        } else {
            0.0
        }
    }

    /// Whether impulses may change the body's angular momentum
    #[inline]
    pub fn can_spin(&self) -> bool {
        self.is_spinnable() && self.oo_mass > 0.0
    }

    /// Returns the diagonal of the inverse inertia tensor
    pub fn get_inertia_itd(&self) -> Vector3 {
        self.inertia_itd
    }

    pub fn get_inertial_kind(&self) -> InertialKind {
        self.inertial_kind
    }

    pub fn set_inertial_kind(&mut self, kind: InertialKind) {
        self.inertial_kind = kind;
        self.update_inertia();
    }

    fn update_inertia(&mut self) {
        self.inertia_itd = if self.oo_mass > 0.0 {
            let mass = 1.0 / self.oo_mass;
            let e = self.extent;
            let invert = |i: f32| if i > EPSILON { 1.0 / i } else { 0.0 };
            match self.inertial_kind {
                InertialKind::Sphere => {
                    let r = e.x.max(e.y).max(e.z);
                    Vector3::splat(invert(0.4 * mass * r * r))
                }
                InertialKind::Box => {
                    let axis = |a: f32, b: f32| invert(mass / 3.0 * (a * a + b * b));
                    Vector3::new(axis(e.y, e.z), axis(e.x, e.z), axis(e.x, e.y))
                }
            }
        } else {
            Vector3::zero()
        };

        let itd = self.inertia_itd;
        for state in [&mut self.state_t0, &mut self.state_t1] {
            state.angular_velocity = state.angular_momentum.component_mul(&itd);
        }
    }

    pub fn get_extent(&self) -> Vector3 {
        self.extent
    }

    /// Sets the bounding half-size. A sphere takes the largest component as
    /// its radius. A plane's extent is fixed and cannot be set.
    pub fn set_extent(&mut self, extent: Vector3) -> bool {
        if extent.x < 0.0 || extent.y < 0.0 || extent.z < 0.0 {
            return false;
        }

        match &mut self.geometry {
            Some(CollisionGeometry::InfinitePlane(_)) => return false,
            Some(CollisionGeometry::Sphere(sphere)) => {
                let radius = extent.x.max(extent.y).max(extent.z);
                if radius <= 0.0 {
                    return false;
                }
                sphere.set_radius(radius);
                self.extent = sphere.extent();
            }
            None => self.extent = extent,
        }

        self.update_inertia();
        true
    }

    pub fn get_linear_damping(&self) -> f32 {
        self.linear_damping
    }

    /// Sets the linear damping; negative values are rejected
    pub fn set_linear_damping(&mut self, damping: f32) -> bool {
        if !(damping >= 0.0) {
            return false;
        }
        self.linear_damping = damping;
        true
    }

    pub fn get_angular_damping(&self) -> f32 {
        self.angular_damping
    }

    /// Sets the angular damping; negative values are rejected
    pub fn set_angular_damping(&mut self, damping: f32) -> bool {
        if !(damping >= 0.0) {
            return false;
        }
        self.angular_damping = damping;
        true
    }

    // === Flags ===

    pub fn get_flags(&self) -> BodyFlags {
        self.flags
    }

    pub fn set_flag(&mut self, flag: BodyFlags, enabled: bool) {
        self.flags.set(flag, enabled);
    }

    pub fn is_active(&self) -> bool {
        self.flags.contains(BodyFlags::ACTIVE)
    }

    pub fn uses_gravity(&self) -> bool {
        self.flags.contains(BodyFlags::USE_GRAVITY)
    }

    pub fn is_collidable(&self) -> bool {
        self.flags.contains(BodyFlags::COLLIDABLE)
    }

    pub fn is_spinnable(&self) -> bool {
        self.flags.contains(BodyFlags::SPINNABLE)
    }

    pub fn is_translatable(&self) -> bool {
        self.flags.contains(BodyFlags::TRANSLATABLE)
    }

    /// A body that can neither translate nor spin
    pub fn is_immovable(&self) -> bool {
        !self.is_translatable() && !self.is_spinnable()
    }

    pub fn has_collided(&self) -> bool {
        self.collided
    }

    pub(crate) fn set_collided(&mut self, collided: bool) {
        self.collided = collided;
    }

    // === Queued impulses ===

    /// Queues a linear impulse for the next step
    pub fn add_impulse(&mut self, impulse: Vector3) {
        self.pending_impulse += impulse;
    }

    /// Queues an angular impulse for the next step
    pub fn add_twist(&mut self, twist: Vector3) {
        self.pending_twist += twist;
    }

    /// Queues an impulse applied at a world-space point, which adds the
    /// matching angular impulse about the body's center
    pub fn add_twist_at(&mut self, impulse: Vector3, point: Vector3) {
        let r = point - self.state_t0.position;
        self.pending_impulse += impulse;
        self.pending_twist += r.cross(&impulse);
    }

    /// Zeroes the linear velocity and drops any queued impulse
    pub fn stop_moving(&mut self) {
        self.set_velocity(Vector3::zero());
        self.pending_impulse = Vector3::zero();
    }

    /// Zeroes the angular velocity and momentum and drops any queued twist
    pub fn stop_spinning(&mut self) {
        self.set_angular_momentum(Vector3::zero());
        self.pending_twist = Vector3::zero();
    }

    pub(crate) fn take_pending_impulse(&mut self) -> Vector3 {
        std::mem::take(&mut self.pending_impulse)
    }

    pub(crate) fn take_pending_twist(&mut self) -> Vector3 {
        std::mem::take(&mut self.pending_twist)
    }

    /// Applies an impulse `impulse` at offset `r` from the center to the
    /// end-of-step state. Immovable directions are left untouched.
    pub(crate) fn apply_contact_impulse(&mut self, impulse: Vector3, r: Vector3) {
        let oo_mass = self.effective_inverse_mass();
        self.state_t1.velocity.scaled_add(oo_mass, impulse);

        if self.can_spin() {
            self.state_t1.angular_momentum += r.cross(&impulse);
            self.state_t1.angular_velocity =
                self.state_t1.angular_momentum.component_mul(&self.inertia_itd);
        }
    }

    /// Moves a plane's geometry so that it passes through the body's position
    pub(crate) fn sync_geometry(&mut self) {
        if let Some(CollisionGeometry::InfinitePlane(plane)) = &mut self.geometry {
            let moved = Plane::from_point_normal(self.state_t1.position, plane.get_normal());
            if moved != *plane.get_plane() {
                *plane = InfinitePlane::new(moved);
            }
        }
    }

    // === Mesh data ===

    /// Replaces a spring mesh's vertex positions. Fails for other bodies.
    pub fn set_mesh_positions(&mut self, data: &[f32], stride: usize, count: usize) -> bool {
        let Some(mesh) = &mut self.mesh else {
            return false;
        };
        if !mesh.set_positions_strided(data, stride, count) {
            return false;
        }

        self.extent = mesh.bounds().map_or(Vector3::zero(), |(_, extent)| extent);
        self.update_inertia();
        true
    }

    /// Replaces a spring mesh's index list. Fails for other bodies.
    pub fn set_mesh_indices(&mut self, indices: &[u32]) -> bool {
        match &mut self.mesh {
            Some(mesh) => {
                mesh.set_indices(indices);
                true
            }
            None => false,
        }
    }

    // === Render boundary ===

    /// Local-to-world matrix, column-major
    pub fn transform_matrix(&self) -> [f32; 16] {
        Matrix4::from_position_orientation(self.state_t0.position, self.orientation).to_column_major()
    }

    pub fn descriptor(&self) -> GeometryDescriptor<'_> {
        GeometryDescriptor {
            kind: self.kind(),
            center: self.state_t0.position,
            extent: self.extent,
            radius: self
                .geometry
                .as_ref()
                .and_then(CollisionGeometry::as_sphere)
                .map(Sphere::get_radius),
            plane: self
                .geometry
                .as_ref()
                .and_then(CollisionGeometry::as_plane)
                .map(|plane| *plane.get_plane()),
            mesh: self.mesh.as_ref(),
        }
    }
}
