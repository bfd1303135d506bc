use crate::core::{BodyId, ConstraintId, SpringId};
use crate::error::PhysicsError;
use crate::Result;
use std::fmt::Debug;
use std::marker::PhantomData;

/// Integer handle into a `HandleStorage`
pub trait Handle: Copy + Eq + Debug {
    fn from_raw(raw: u32) -> Self;
    fn raw(self) -> u32;
}

/// Generic storage trait for physics objects
pub trait Storage<T, H> {
    /// Creates a new empty storage
    fn new() -> Self;

    /// Adds an item to the storage and returns its handle
    fn add(&mut self, item: T) -> H;

    /// Gets a reference to an item by its handle
    fn get(&self, handle: H) -> Option<&T>;

    /// Gets a mutable reference to an item by its handle
    fn get_mut(&mut self, handle: H) -> Option<&mut T>;

    /// Removes an item from the storage
    fn remove(&mut self, handle: H) -> Option<T>;

    /// Returns the number of items in the storage
    fn len(&self) -> usize;

    /// Returns whether the storage is empty
    fn is_empty(&self) -> bool;

    /// Clears all items from the storage
    fn clear(&mut self);

    /// Returns all live handles in ascending order
    fn handles(&self) -> Vec<H>;

    /// Returns an iterator over all items
    fn iter<'a>(&'a self) -> impl Iterator<Item = (H, &'a T)> + 'a where T: 'a;

    /// Returns a mutable iterator over all items
    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (H, &'a mut T)> + 'a where T: 'a;
}

/// Slot arena keyed by monotonically increasing handles.
///
/// Handle `n` lives in slot `n - 1`; removed slots stay empty so a handle is
/// never handed out twice. Iteration runs in handle order.
pub struct HandleStorage<H, T> {
    slots: Vec<Option<T>>,
    len: usize,
    _handle: PhantomData<H>,
}

/// Storage for rigid bodies
pub type BodyStorage<T> = HandleStorage<BodyId, T>;

/// Storage for springs
pub type SpringStorage<T> = HandleStorage<SpringId, T>;

/// Storage for distance constraints
pub type ConstraintStorage<T> = HandleStorage<ConstraintId, T>;

impl<H: Handle, T> HandleStorage<H, T> {
    #[inline]
    fn slot(handle: H) -> Option<usize> {
        (handle.raw() as usize).checked_sub(1)
    }

    /// Returns whether an item with this handle is stored
    pub fn contains(&self, handle: H) -> bool {
        self.get(handle).is_some()
    }

    /// Returns mutable references to two distinct items at once
    pub fn get_pair_mut(&mut self, a: H, b: H) -> Option<(&mut T, &mut T)> {
        let ia = Self::slot(a)?;
        let ib = Self::slot(b)?;
        if ia == ib || ia >= self.slots.len() || ib >= self.slots.len() {
            return None;
        }

        if ia < ib {
            let (lo, hi) = self.slots.split_at_mut(ib);
            Some((lo[ia].as_mut()?, hi[0].as_mut()?))
        } else {
            let (lo, hi) = self.slots.split_at_mut(ia);
            Some((hi[0].as_mut()?, lo[ib].as_mut()?))
        }
    }

    /// Gets an item by its handle, returning an error if not found
    pub fn get_or_err(&self, handle: H) -> Result<&T> {
        self.get(handle)
            .ok_or_else(|| PhysicsError::ResourceNotFound(format!("{:?} not found", handle)))
    }

    /// Removes every item matching the predicate, returning the removed handles
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> Vec<H> {
        let mut removed = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.as_ref().map_or(false, &mut predicate) {
                *slot = None;
                self.len -= 1;
                removed.push(H::from_raw(index as u32 + 1));
            }
        }
        removed
    }
}

impl<H: Handle, T> Storage<T, H> for HandleStorage<H, T> {
    fn new() -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
            _handle: PhantomData,
        }
    }

    fn add(&mut self, item: T) -> H {
        self.slots.push(Some(item));
        self.len += 1;
        H::from_raw(self.slots.len() as u32)
    }

    fn get(&self, handle: H) -> Option<&T> {
        self.slots.get(Self::slot(handle)?)?.as_ref()
    }

    fn get_mut(&mut self, handle: H) -> Option<&mut T> {
        self.slots.get_mut(Self::slot(handle)?)?.as_mut()
    }

    fn remove(&mut self, handle: H) -> Option<T> {
        let item = self.slots.get_mut(Self::slot(handle)?)?.take();
        if item.is_some() {
            self.len -= 1;
        }
        item
    }

    fn len(&self) -> usize {
        self.len
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    // Slots are kept so that handles issued before the clear stay dead.
    fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.len = 0;
    }

    fn handles(&self) -> Vec<H> {
        self.iter().map(|(h, _)| h).collect()
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (H, &'a T)> + 'a where T: 'a {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|item| (H::from_raw(i as u32 + 1), item)))
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (H, &'a mut T)> + 'a where T: 'a {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|item| (H::from_raw(i as u32 + 1), item)))
    }
}
