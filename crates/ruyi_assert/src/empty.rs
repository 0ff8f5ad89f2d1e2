//! Emptiness predicates.
//!
//! Statically known values are checked through the [`IsEmpty`] trait. Type-erased values are
//! checked through a registry of probes keyed by [`TypeId`]; values whose runtime type has no
//! registered probe cannot be inspected and result in an [`Error::UnsupportedType`].

use std::{
    any::{self, Any, TypeId},
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque},
    ffi::{OsStr, OsString},
    path::{Path, PathBuf},
    rc::Rc,
    sync::Arc,
};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{Error, Result};

/// A type whose values can be logically empty.
pub trait IsEmpty {
    /// Returns true if the value holds no characters, elements or entries.
    fn is_empty(&self) -> bool;
}

/// Returns true if `value` is logically empty.
pub fn is_empty<T: IsEmpty + ?Sized>(value: &T) -> bool {
    value.is_empty()
}

/// Returns true if the cursor `iter` has no next element. The cursor itself is not advanced.
pub fn is_exhausted<I: Iterator + Clone>(iter: &I) -> bool {
    iter.clone().next().is_none()
}

macro_rules! impl_is_empty {
    ($([$($params:tt)*] $ty:ty),+ $(,)?) => {
        $(
            impl<$($params)*> IsEmpty for $ty {
                fn is_empty(&self) -> bool {
                    // Resolves to the inherent method of the collection
                    Self::is_empty(self)
                }
            }
        )+
    };
}

impl_is_empty! {
    [] str,
    [] String,
    [] OsStr,
    [T] [T],
    [T] Vec<T>,
    [T] VecDeque<T>,
    [T] LinkedList<T>,
    [T] BinaryHeap<T>,
    [T] BTreeSet<T>,
    [K, V] BTreeMap<K, V>,
    [T, S] HashSet<T, S>,
    [K, V, S] HashMap<K, V, S>,
}

impl<T, const N: usize> IsEmpty for [T; N] {
    fn is_empty(&self) -> bool {
        N == 0
    }
}

impl IsEmpty for OsString {
    fn is_empty(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

impl IsEmpty for Path {
    fn is_empty(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

impl IsEmpty for PathBuf {
    fn is_empty(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

/// An absent value is considered empty.
impl<T: IsEmpty> IsEmpty for Option<T> {
    fn is_empty(&self) -> bool {
        self.as_ref().map_or(true, IsEmpty::is_empty)
    }
}

impl<B: IsEmpty + ToOwned + ?Sized> IsEmpty for Cow<'_, B> {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

impl<T: IsEmpty + ?Sized> IsEmpty for &T {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

impl<T: IsEmpty + ?Sized> IsEmpty for &mut T {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

impl<T: IsEmpty + ?Sized> IsEmpty for Box<T> {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

impl<T: IsEmpty + ?Sized> IsEmpty for Rc<T> {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

impl<T: IsEmpty + ?Sized> IsEmpty for Arc<T> {
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }
}

/// A probe that knows how to determine the emptiness of one concrete runtime type.
#[derive(Clone, Copy)]
struct Probe {
    type_name: &'static str,
    check: fn(&dyn Any) -> bool,
}

impl Probe {
    fn of<T: IsEmpty + Any>() -> Self {
        Self {
            type_name: any::type_name::<T>(),
            check: probe::<T>,
        }
    }
}

fn probe<T: IsEmpty + Any>(value: &dyn Any) -> bool {
    value.downcast_ref::<T>().map_or(false, IsEmpty::is_empty)
}

macro_rules! register_probes {
    ($table:ident, $($ty:ty),+ $(,)?) => {
        $(
            $table.insert(TypeId::of::<$ty>(), Probe::of::<$ty>());
        )+
    };
}

static PROBES: Lazy<RwLock<FxHashMap<TypeId, Probe>>> = Lazy::new(|| {
    let mut table = FxHashMap::default();
    register_probes!(
        table,
        String,
        &'static str,
        Box<str>,
        OsString,
        PathBuf,
        Vec<u8>,
        Vec<i32>,
        Vec<i64>,
        Vec<f64>,
        Vec<bool>,
        Vec<String>,
        Vec<&'static str>,
        Vec<Box<dyn Any + Send + Sync>>,
        VecDeque<String>,
        HashSet<String>,
        BTreeSet<String>,
        HashMap<String, String>,
        BTreeMap<String, String>,
    );
    RwLock::new(table)
});

/// Registers `T` so that type-erased values of `T` can be inspected by [`try_is_empty_dyn`].
///
/// Returns false if a probe for `T` was already registered.
pub fn register_emptiness_probe<T: IsEmpty + Any>() -> bool {
    PROBES
        .write()
        .insert(TypeId::of::<T>(), Probe::of::<T>())
        .is_none()
}

/// Returns the names of all types with a registered emptiness probe, sorted by name.
pub fn registered_emptiness_types() -> Vec<&'static str> {
    let mut names: Vec<_> = PROBES.read().values().map(|probe| probe.type_name).collect();
    names.sort_unstable();
    names
}

/// Determines the emptiness of `value` through the probe registered for its type.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] naming `T` if no probe is registered for `T`.
pub fn try_is_empty<T: Any>(value: &T) -> Result<bool> {
    let probe = PROBES.read().get(&TypeId::of::<T>()).copied();
    match probe {
        Some(probe) => Ok((probe.check)(value)),
        None => Err(Error::unsupported_type([any::type_name::<T>()])),
    }
}

/// Determines the emptiness of a type-erased `value` through the probe registered for its runtime
/// type.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if no probe is registered for the runtime type. A
/// type-erased value does not carry its type name, so an unregistered type can only be reported by
/// its [`TypeId`]; [`registered_emptiness_types`] lists the types that are supported.
pub fn try_is_empty_dyn(value: &dyn Any) -> Result<bool> {
    let type_id = value.type_id();
    let probe = PROBES.read().get(&type_id).copied();
    match probe {
        Some(probe) => Ok((probe.check)(value)),
        None => Err(Error::unsupported_type([format!("<unregistered {type_id:?}>")])),
    }
}
