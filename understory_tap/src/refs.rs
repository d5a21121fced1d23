// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handing the bound element to several consumers.
//!
//! The tap machine owns its handle; callers that also need the element register
//! [`RefTarget`]s in a [`MergedRef`]. A target that rejects an assignment is a
//! configuration mismatch on the caller's side and is skipped silently.
//!
//! ```
//! use understory_tap::refs::{MergedRef, SharedRef};
//!
//! let mine = SharedRef::<u32>::new();
//! let mut merged = MergedRef::new();
//! merged.push(mine.clone());
//!
//! assert_eq!(merged.assign(Some(&7)), 1);
//! assert_eq!(mine.get(), Some(7));
//!
//! merged.assign(None);
//! assert_eq!(mine.get(), None);
//! ```

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

/// A ref target refused the assignment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RefRejected;

impl fmt::Display for RefRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ref target rejected the assignment")
    }
}

impl core::error::Error for RefRejected {}

/// Something that wants to know which element is bound.
pub trait RefTarget<H> {
    /// Receives the newly bound element, or `None` when unbound.
    fn assign(&mut self, handle: Option<&H>) -> Result<(), RefRejected>;
}

/// A cloneable slot holding a copy of the bound handle.
#[derive(Debug)]
pub struct SharedRef<H>(Rc<RefCell<Option<H>>>);

impl<H> Clone for SharedRef<H> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<H> Default for SharedRef<H> {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }
}

impl<H> SharedRef<H> {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with the current value.
    ///
    /// While `f` runs the slot is borrowed, and assignments to it are rejected.
    pub fn with<R>(&self, f: impl FnOnce(Option<&H>) -> R) -> R {
        f(self.0.borrow().as_ref())
    }
}

impl<H: Clone> SharedRef<H> {
    /// Copy of the current value.
    pub fn get(&self) -> Option<H> {
        self.0.borrow().clone()
    }
}

impl<H: Clone> RefTarget<H> for SharedRef<H> {
    fn assign(&mut self, handle: Option<&H>) -> Result<(), RefRejected> {
        let mut slot = self.0.try_borrow_mut().map_err(|_| RefRejected)?;
        *slot = handle.cloned();
        Ok(())
    }
}

/// Fan-out of one assignment to every registered target.
pub struct MergedRef<H> {
    targets: Vec<Box<dyn RefTarget<H>>>,
}

impl<H> Default for MergedRef<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for MergedRef<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MergedRef")
            .field("targets", &self.targets.len())
            .finish()
    }
}

impl<H> MergedRef<H> {
    /// Creates an empty fan-out.
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
        }
    }

    /// Registers a target.
    pub fn push(&mut self, target: impl RefTarget<H> + 'static) {
        self.targets.push(Box::new(target));
    }

    /// Number of registered targets.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` if no target is registered.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Assigns `handle` to every target; returns how many accepted it.
    pub fn assign(&mut self, handle: Option<&H>) -> usize {
        let mut accepted = 0;
        for (index, target) in self.targets.iter_mut().enumerate() {
            match target.assign(handle) {
                Ok(()) => accepted += 1,
                Err(RefRejected) => log::debug!("ref target {index} rejected assignment"),
            }
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Refuses;

    impl RefTarget<u32> for Refuses {
        fn assign(&mut self, _: Option<&u32>) -> Result<(), RefRejected> {
            Err(RefRejected)
        }
    }

    #[test]
    fn rejection_does_not_stop_other_targets() {
        let a = SharedRef::new();
        let b = SharedRef::new();
        let mut merged = MergedRef::new();
        merged.push(a.clone());
        merged.push(Refuses);
        merged.push(b.clone());

        assert_eq!(merged.assign(Some(&3)), 2);
        assert_eq!(a.get(), Some(3));
        assert_eq!(b.get(), Some(3));
    }

    #[test]
    fn borrowed_slot_rejects() {
        let slot = SharedRef::<u32>::new();
        let mut target = slot.clone();
        slot.with(|_| {
            assert_eq!(target.assign(Some(&1)), Err(RefRejected));
        });
        assert_eq!(slot.get(), None);
        assert_eq!(target.assign(Some(&1)), Ok(()));
        assert_eq!(slot.get(), Some(1));
    }
}
