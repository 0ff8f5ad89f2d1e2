//! Runtime type descriptions for the ruyi toolkit.
//!
//! Types are described by [`Type`] handles: primitives, struct types with fields and methods, and
//! arrays of other types. Struct types are registered in [`TypeTable`]s and found by name through
//! [`TypeLoader`]s:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use ruyi_reflect::{
//!     enumerate::list_fields, loader::scoped_context_loader, resolve::for_name, HasStaticType,
//!     Member, Modifiers, StructTypeBuilder, TypeTable,
//! };
//!
//! let base = StructTypeBuilder::new("demo::Base")
//!     .add_field("x", i32::type_info().clone(), Modifiers::PUBLIC)
//!     .finish()
//!     .unwrap();
//! let derived = StructTypeBuilder::new("demo::Derived")
//!     .set_super_type(base.clone())
//!     .add_field("y", String::type_info().clone(), Modifiers::PRIVATE)
//!     .finish()
//!     .unwrap();
//!
//! let mut table = TypeTable::new("demo");
//! table.insert_type(base).unwrap();
//! table.insert_type(derived).unwrap();
//!
//! let _guard = scoped_context_loader(Arc::new(table));
//! let ty = for_name("demo::Derived", None).unwrap().unwrap();
//! let names: Vec<_> = list_fields(&ty, true).iter().map(|f| f.name()).collect();
//! assert_eq!(names, ["y", "x"]);
//! ```
//!
//! # Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade and does not install a logger.
//! Loader fallbacks and type registrations are logged at `trace` level, type initialization and
//! unresolved names at `debug` level.

pub mod assert;
pub mod enumerate;
pub mod loader;
pub mod member;
pub mod resolve;
mod static_type_map;
mod r#type;
mod type_table;

pub use ruyi_assert::{Error, ErrorKind, Result};

pub use crate::{
    enumerate::VisitError,
    loader::TypeLoader,
    member::{Accessibility, Field, IllegalAccess, Member, Method, Modifiers},
    r#type::{
        ArrayType, HasStaticType, PrimitiveType, StructType, StructTypeBuilder, Type, TypeKind,
        OBJECT_TYPE_NAME, STRING_TYPE_NAME,
    },
    type_table::TypeTable,
};
