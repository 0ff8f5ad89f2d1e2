use std::sync::Arc;

use rustc_hash::FxHashMap;
use ruyi_assert::{failed_msg, require_true, Result};

use crate::{loader::TypeLoader, HasStaticType, Type};

/// A named table of struct types that can be used as a [`TypeLoader`].
///
/// Primitive and array types are never stored; they are derived from their names during
/// resolution.
#[derive(Clone)]
pub struct TypeTable {
    name: String,
    parent: Option<Arc<dyn TypeLoader>>,
    types: FxHashMap<String, Type>,
}

impl TypeTable {
    /// Constructs an empty table without a parent.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            types: FxHashMap::default(),
        }
    }

    /// Constructs an empty table that delegates to `parent` before looking at its own types.
    pub fn with_parent(name: impl Into<String>, parent: Arc<dyn TypeLoader>) -> Self {
        Self {
            parent: Some(parent),
            ..Self::new(name)
        }
    }

    /// Returns the [`Type`] with the given name registered in this table. The parent is not
    /// consulted.
    pub fn find_type_by_name<S: AsRef<str>>(&self, name: S) -> Option<Type> {
        self.types.get(name.as_ref()).cloned()
    }

    /// Inserts a type that has static type info into the table.
    pub fn insert_static_type<T: HasStaticType>(&mut self) -> Result<Option<Type>> {
        self.insert_type(T::type_info().clone())
    }

    /// Inserts `ty` into the type table.
    ///
    /// If the type table already contained a type with the same name, it is replaced and the old
    /// type is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ruyi_assert::Error::InvalidArgument`] for primitive and array types.
    pub fn insert_type(&mut self, ty: Type) -> Result<Option<Type>> {
        require_true(ty.is_struct(), || {
            failed_msg(format!("only struct types can be registered, found [{ty}]"))
        })?;

        log::trace!("registering type `{ty}` in `{}`", self.name);
        Ok(self.types.insert(ty.name().to_owned(), ty))
    }

    /// Removes the specified type from the table. Returns `None` if this table holds a different
    /// type under the same name.
    pub fn remove_type(&mut self, ty: &Type) -> Option<Type> {
        if self.types.get(ty.name()) == Some(ty) {
            self.types.remove(ty.name())
        } else {
            None
        }
    }

    /// Removes and returns the type corresponding to `name`, if it exists.
    pub fn remove_type_by_name<S: AsRef<str>>(&mut self, name: S) -> Option<Type> {
        self.types.remove(name.as_ref())
    }

    /// Returns the number of types registered in this table.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no types are registered in this table.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Returns an iterator over the types registered in this table, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Type> {
        self.types.values()
    }
}

impl TypeLoader for TypeTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn find_type(&self, name: &str) -> Option<Type> {
        self.parent
            .as_ref()
            .and_then(|parent| parent.find_type(name))
            .or_else(|| self.find_type_by_name(name))
    }
}

/// Constructs the system table, which holds the core types.
impl Default for TypeTable {
    fn default() -> Self {
        let mut type_table = Self::new("system");
        type_table.types.extend(
            [Type::object(), String::type_info()]
                .into_iter()
                .map(|ty| (ty.name().to_owned(), ty.clone())),
        );
        type_table
    }
}
