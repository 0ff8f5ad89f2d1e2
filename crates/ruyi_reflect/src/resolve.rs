//! Resolves type names to types.
//!
//! A name is resolved in three stages:
//!
//! 1. primitive names and the names of their wrappers (`int`, `core::Integer`) resolve to the
//!    primitive type,
//! 2. names ending with `[]` resolve to the array type of the name without the suffix,
//! 3. all other names are looked up through a [`TypeLoader`].

use std::sync::Arc;

use ruyi_assert::{failed_msg, require_non_blank, require_true, Result};

use crate::{
    loader::{default_loader, TypeLoader},
    PrimitiveType, Type,
};

/// The suffix of array type names
pub const ARRAY_SUFFIX: &str = "[]";

/// The maximum number of dimensions of an array type name
pub const MAX_ARRAY_DIMENSIONS: usize = 255;

/// Resolves the type with the given name.
///
/// If `loader` is `None` the [default loader](crate::loader::default_loader) is used. If
/// `initialize` is set, a resolved struct type, or the element type of a resolved array type, is
/// initialized before it is returned.
///
/// ```rust
/// # use ruyi_reflect::resolve::resolve;
/// let ty = resolve("core::Integer[][]", false, None).unwrap().unwrap();
/// assert_eq!(ty.name(), "int[][]");
/// assert!(resolve("no::such::Type", false, None).unwrap().is_none());
/// ```
///
/// # Errors
///
/// Returns [`ruyi_assert::Error::InvalidArgument`] if the name, or the name that remains after
/// stripping array suffixes, is blank, or if the name has more than [`MAX_ARRAY_DIMENSIONS`]
/// array suffixes.
pub fn resolve(
    name: &str,
    initialize: bool,
    loader: Option<&dyn TypeLoader>,
) -> Result<Option<Type>> {
    let name = require_non_blank(name, "type name must be valid")?;

    let mut element_name = name;
    let mut dimensions = 0usize;
    while let Some(stripped) = element_name.strip_suffix(ARRAY_SUFFIX) {
        element_name = stripped;
        dimensions += 1;
    }
    let element_name = require_non_blank(element_name, "type name must be valid")?;
    require_true(dimensions <= MAX_ARRAY_DIMENSIONS, || {
        failed_msg(format!(
            "array types cannot have more than {MAX_ARRAY_DIMENSIONS} dimensions"
        ))
    })?;

    let element = resolve_element(element_name, initialize, loader);
    Ok(element.map(|element| {
        (0..dimensions).fold(element, |ty, _| ty.array_type())
    }))
}

/// Resolves a name without array suffixes.
fn resolve_element(
    name: &str,
    initialize: bool,
    loader: Option<&dyn TypeLoader>,
) -> Option<Type> {
    if let Some(primitive) = resolve_primitive(name) {
        return Some(primitive);
    }

    let ty = match loader {
        Some(loader) => loader.find_type(name),
        None => default_loader().find_type(name),
    };

    match &ty {
        Some(ty) if initialize => ty.initialize(),
        Some(_) => {}
        None => log::debug!("type `{name}` could not be found"),
    }

    ty
}

/// Resolves the type with the given name without initializing it.
///
/// # Errors
///
/// See [`resolve`].
pub fn for_name(name: &str, loader: Option<&dyn TypeLoader>) -> Result<Option<Type>> {
    resolve(name, false, loader)
}

/// Returns the primitive type with the given primitive or wrapper name.
pub fn resolve_primitive(name: &str) -> Option<Type> {
    PrimitiveType::from_name(name).map(|ty| ty.type_info().clone())
}

/// Returns the innermost element type of an array type, or `ty` itself if it is not an array.
pub fn resolve_atomic(ty: &Type) -> Type {
    let mut atomic = ty;
    while let Some(element) = atomic.element_type() {
        atomic = element;
    }
    atomic.clone()
}

/// Returns true if a type with the given name can be resolved. The type is never initialized.
///
/// # Errors
///
/// See [`resolve`].
pub fn is_type_present(name: &str, loader: Option<&dyn TypeLoader>) -> Result<bool> {
    Ok(for_name(name, loader)?.is_some())
}

/// Options for resolving types through a [`Resolver`].
#[derive(Clone, Debug, Default)]
pub struct ResolveOptions {
    /// Whether to initialize resolved types
    pub initialize: bool,

    /// The loader to use; the default loader if not set
    pub loader: Option<Arc<dyn TypeLoader>>,
}

/// A builder for resolving types with a fixed configuration.
///
/// ```rust
/// # use std::sync::Arc;
/// # use ruyi_reflect::{resolve::Resolver, StructTypeBuilder, TypeTable};
/// let mut table = TypeTable::new("plugins");
/// table
///     .insert_type(StructTypeBuilder::new("plugins::Echo").finish().unwrap())
///     .unwrap();
///
/// let resolver = Resolver::new().initialize(true).loader(Arc::new(table));
/// assert!(resolver.is_present("plugins::Echo").unwrap());
/// assert!(resolver.resolve("plugins::Echo[]").unwrap().unwrap().is_array());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Resolver {
    options: ResolveOptions,
}

impl Resolver {
    /// Constructs a resolver that does not initialize types and uses the default loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs a resolver from the given options.
    pub fn from_options(options: ResolveOptions) -> Self {
        Self { options }
    }

    /// Sets whether resolved types are initialized.
    pub fn initialize(mut self, initialize: bool) -> Self {
        self.options.initialize = initialize;
        self
    }

    /// Sets the loader used to find struct types.
    pub fn loader(mut self, loader: Arc<dyn TypeLoader>) -> Self {
        self.options.loader = Some(loader);
        self
    }

    /// Returns the options of this resolver.
    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Resolves the type with the given name.
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub fn resolve(&self, name: &str) -> Result<Option<Type>> {
        resolve(name, self.options.initialize, self.options.loader.as_deref())
    }

    /// Returns true if a type with the given name can be resolved. The type is never initialized.
    ///
    /// # Errors
    ///
    /// See [`resolve`].
    pub fn is_present(&self, name: &str) -> Result<bool> {
        is_type_present(name, self.options.loader.as_deref())
    }
}
