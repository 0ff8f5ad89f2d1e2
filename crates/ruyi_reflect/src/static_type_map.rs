//! A [`StaticTypeMap`] maps a Rust type to a lazily created, never dropped value.
//!
//! Statics declared inside generic functions are shared by every instantiation, so generic
//! [`HasStaticType`](crate::HasStaticType) implementations key their descriptors by the Rust type
//! they were requested for.

use std::{any::TypeId, cell::RefCell};

use parking_lot::ReentrantMutex;
use rustc_hash::FxHashMap;

/// A map from Rust types to leaked values of `T`.
pub(crate) struct StaticTypeMap<T: 'static> {
    map: ReentrantMutex<RefCell<FxHashMap<TypeId, &'static T>>>,
}

impl<T: 'static> Default for StaticTypeMap<T> {
    fn default() -> Self {
        Self {
            map: ReentrantMutex::new(RefCell::new(FxHashMap::default())),
        }
    }
}

impl<T: 'static> StaticTypeMap<T> {
    /// Returns the value stored for `Key`, creating it with `init` on first use.
    ///
    /// The lock is reentrant because `init` may request the value of another key from the same
    /// map, e.g. when the descriptor of `Vec<Vec<i32>>` needs the one of `Vec<i32>`.
    pub fn call_once<Key, Init>(&'static self, init: Init) -> &'static T
    where
        Key: 'static,
        Init: FnOnce() -> T,
    {
        let map = self.map.lock();
        let existing = map.borrow().get(&TypeId::of::<Key>()).copied();
        if let Some(value) = existing {
            return value;
        }

        // No borrow may be held while `init` runs, it can reenter this map
        let value: &'static T = Box::leak(Box::new(init()));
        let stored = *map
            .borrow_mut()
            .entry(TypeId::of::<Key>())
            .or_insert(value);
        stored
    }
}
