use crate::collision::{Contact, ContactId};
use crate::core::BodyId;
use crate::error::PhysicsError;
use crate::Result;

/// Occupancy of the contact pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub free: usize,
    pub active: usize,
    pub capacity: usize,
}

/// Fixed set of contact records reused every step.
///
/// Every record is either on the free list or on the active list. Capacity
/// only grows, and steady-state stepping does not allocate.
#[derive(Debug)]
pub struct ContactPool {
    slots: Vec<Contact>,
    free: Vec<usize>,
    active: Vec<usize>,
}

impl ContactPool {
    pub fn new(capacity: usize) -> Self {
        let mut pool = Self {
            slots: Vec::new(),
            free: Vec::new(),
            active: Vec::new(),
        };
        pool.grow(capacity);
        pool
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Raises the capacity to `capacity`; smaller values are ignored
    pub fn grow(&mut self, capacity: usize) {
        let current = self.slots.len();
        if capacity <= current {
            return;
        }

        self.slots.resize(capacity, Contact::empty());
        self.free.reserve(capacity - current);
        self.active.reserve(capacity - self.active.len());
        // Lowest indices are handed out first.
        self.free.extend((current..capacity).rev());
    }

    /// Takes a record off the free list
    pub fn acquire(&mut self) -> Result<ContactId> {
        self.free.pop().map(ContactId).ok_or(PhysicsError::ContactPoolExhausted {
            capacity: self.slots.len(),
        })
    }

    /// Moves an acquired record onto the active list
    pub fn activate(&mut self, id: ContactId) {
        self.active.push(id.0);
    }

    /// Gives an acquired, never activated record back
    pub fn release(&mut self, id: ContactId) {
        self.free.push(id.0);
    }

    /// Returns every active record to the free list
    pub fn release_all(&mut self) {
        self.free.extend(self.active.drain(..).rev());
    }

    /// Drops active records that reference `body`
    pub fn release_for(&mut self, body: BodyId) -> usize {
        let slots = &self.slots;
        let free = &mut self.free;
        let before = self.active.len();
        self.active.retain(|&index| {
            if slots[index].involves(body) {
                free.push(index);
                false
            } else {
                true
            }
        });
        before - self.active.len()
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.slots.get(id.0)
    }

    pub fn get_mut(&mut self, id: ContactId) -> Option<&mut Contact> {
        self.slots.get_mut(id.0)
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// The `n`-th active contact, in activation order
    pub fn active_at(&self, n: usize) -> Option<ContactId> {
        self.active.get(n).copied().map(ContactId)
    }

    pub fn active(&self) -> impl Iterator<Item = ContactId> + '_ {
        self.active.iter().copied().map(ContactId)
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            free: self.free.len(),
            active: self.active.len(),
            capacity: self.slots.len(),
        }
    }
}
