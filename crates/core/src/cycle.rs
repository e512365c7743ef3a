//! Reference-loop tolerance for shared object graphs.
//!
//! Serde walks a value as a tree, so a graph with a back-reference would
//! recurse forever. [`Shared`] nodes keep a thread-local visited set keyed
//! by object identity for the duration of a traversal: the first visit
//! serializes the node's contents, and a re-entrant visit emits `null`
//! instead. The cyclic edge is dropped, not preserved, so a round-tripped
//! back-reference reads back as `None`.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashSet;
use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::serializer_config;

thread_local! {
    static VISITING: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

/// A shared, mutable graph node. Clones alias the same node.
///
/// Back-references that may close a cycle belong behind `Option`, so the
/// `null` written for a broken cycle reads back as `None`.
#[derive(Debug)]
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// True when both handles alias the same node.
    pub fn same_node(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

/// Removes a node from the visited set on every exit path, including
/// serialization failures partway through the node's contents.
struct VisitGuard(usize);

impl Drop for VisitGuard {
    fn drop(&mut self) {
        VISITING.with(|set| {
            set.borrow_mut().remove(&self.0);
        });
    }
}

impl<T: Serialize> Serialize for Shared<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let addr = Rc::as_ptr(&self.0) as usize;
        let first_visit = VISITING.with(|set| set.borrow_mut().insert(addr));
        if !first_visit {
            if serializer_config().skip_cycles {
                return serializer.serialize_none();
            }
            return Err(serde::ser::Error::custom("reference cycle detected"));
        }
        let _guard = VisitGuard(addr);
        let inner = self
            .0
            .try_borrow()
            .map_err(|_| serde::ser::Error::custom("shared node is mutably borrowed"))?;
        inner.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Shared<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Shared::new)
    }
}

#[cfg(test)]
#[path = "tests/cycle_tests.rs"]
mod tests;
