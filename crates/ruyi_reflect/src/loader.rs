//! Type loaders locate struct types by name.
//!
//! When no loader is passed to a resolution, the default loader is used. It is derived anew on
//! every call, in order of preference:
//!
//! 1. the context loader of the current thread,
//! 2. the library loader installed for the process,
//! 3. the system loader, which is always present and holds the core types.

use std::{cell::RefCell, fmt, sync::Arc};

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::{Type, TypeTable};

/// A source of struct types.
pub trait TypeLoader: Send + Sync {
    /// Returns the name of the loader, used for diagnostics.
    fn name(&self) -> &str;

    /// Returns the type with the given name, or `None` if this loader does not know it.
    fn find_type(&self, name: &str) -> Option<Type>;
}

impl fmt::Debug for dyn TypeLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeLoader").field(&self.name()).finish()
    }
}

thread_local! {
    static CONTEXT_LOADER: RefCell<Option<Arc<dyn TypeLoader>>> = const { RefCell::new(None) };
}

static LIBRARY_LOADER: Lazy<RwLock<Option<Arc<dyn TypeLoader>>>> =
    Lazy::new(|| RwLock::new(None));

static SYSTEM_LOADER: Lazy<Arc<TypeTable>> = Lazy::new(|| Arc::new(TypeTable::default()));

/// Returns the context loader of the current thread, if one is set.
pub fn context_loader() -> Option<Arc<dyn TypeLoader>> {
    CONTEXT_LOADER.with(|loader| loader.borrow().clone())
}

/// Sets the context loader of the current thread and returns the previous one.
pub fn set_context_loader(loader: Option<Arc<dyn TypeLoader>>) -> Option<Arc<dyn TypeLoader>> {
    CONTEXT_LOADER.with(|current| current.replace(loader))
}

/// Sets the context loader of the current thread until the returned guard is dropped.
pub fn scoped_context_loader(loader: Arc<dyn TypeLoader>) -> ContextLoaderGuard {
    ContextLoaderGuard {
        previous: set_context_loader(Some(loader)),
    }
}

/// Restores the previous context loader of the thread when dropped.
#[must_use = "the context loader is reset when the guard is dropped"]
pub struct ContextLoaderGuard {
    previous: Option<Arc<dyn TypeLoader>>,
}

impl Drop for ContextLoaderGuard {
    fn drop(&mut self) {
        set_context_loader(self.previous.take());
    }
}

/// Returns the library loader of the process, if one is installed.
pub fn library_loader() -> Option<Arc<dyn TypeLoader>> {
    LIBRARY_LOADER.read().clone()
}

/// Installs the library loader of the process and returns the previous one.
pub fn install_library_loader(loader: Option<Arc<dyn TypeLoader>>) -> Option<Arc<dyn TypeLoader>> {
    std::mem::replace(&mut *LIBRARY_LOADER.write(), loader)
}

/// Returns the system loader.
pub fn system_loader() -> Arc<TypeTable> {
    SYSTEM_LOADER.clone()
}

/// Returns the loader to use when none is specified.
pub fn default_loader() -> Arc<dyn TypeLoader> {
    if let Some(loader) = context_loader() {
        return loader;
    }
    log::trace!("no context loader set, falling back to the library loader");

    if let Some(loader) = library_loader() {
        return loader;
    }
    log::trace!("no library loader installed, falling back to the system loader");

    system_loader()
}
