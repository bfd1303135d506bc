mod contact;
mod contact_pool;
mod narrow_phase;
mod contact_solver;
mod collision_engine;

pub use self::contact::{Contact, ContactId};
pub use self::contact_pool::{ContactPool, PoolStats};
pub use self::collision_engine::{CollisionEngine, CollisionParams};
pub use self::narrow_phase::DetectFn;
pub use self::contact_solver::ResolveFn;
