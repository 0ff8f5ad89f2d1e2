//! Information about the built-in (or primitive) types.

use std::fmt;

use once_cell::sync::Lazy;

use super::{Type, TypeData};

/// The primitive types: eight scalar kinds and `void`.
///
/// Every primitive has a boxed wrapper type whose name resolves to the primitive itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PrimitiveType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Boolean,
    Void,
}

impl PrimitiveType {
    /// All primitive types in table order.
    pub const ALL: [PrimitiveType; 9] = [
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
        PrimitiveType::Char,
        PrimitiveType::Boolean,
        PrimitiveType::Void,
    ];

    /// Returns the name of the primitive, e.g. `int`.
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Char => "char",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Void => "void",
        }
    }

    /// Returns the name of the boxed wrapper of the primitive, e.g. `core::Integer`.
    pub const fn wrapper_name(self) -> &'static str {
        match self {
            PrimitiveType::Byte => "core::Byte",
            PrimitiveType::Short => "core::Short",
            PrimitiveType::Int => "core::Integer",
            PrimitiveType::Long => "core::Long",
            PrimitiveType::Float => "core::Float",
            PrimitiveType::Double => "core::Double",
            PrimitiveType::Char => "core::Character",
            PrimitiveType::Boolean => "core::Boolean",
            PrimitiveType::Void => "core::Void",
        }
    }

    /// Finds the primitive with the given primitive or wrapper name.
    pub fn from_name(name: &str) -> Option<PrimitiveType> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.name() == name || ty.wrapper_name() == name)
    }

    /// Returns the primitive represented by `ty`, if any.
    pub fn from_type(ty: &Type) -> Option<PrimitiveType> {
        match ty.data() {
            TypeData::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// Returns the type descriptor of this primitive.
    pub fn type_info(self) -> &'static Type {
        static TYPES: Lazy<Vec<Type>> = Lazy::new(|| {
            PrimitiveType::ALL
                .into_iter()
                .map(|ty| Type::new_unlinked(ty.name(), TypeData::Primitive(ty)))
                .collect()
        });

        &TYPES[self as usize]
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::PrimitiveType;

    #[test]
    fn lookup_by_either_name() {
        for ty in PrimitiveType::ALL {
            assert_eq!(PrimitiveType::from_name(ty.name()), Some(ty));
            assert_eq!(PrimitiveType::from_name(ty.wrapper_name()), Some(ty));
            assert_eq!(PrimitiveType::from_type(ty.type_info()), Some(ty));
        }
        assert_eq!(PrimitiveType::from_name("integer"), None);
        assert_eq!(PrimitiveType::from_name(""), None);
    }

    #[test]
    fn type_info_is_shared() {
        assert_eq!(PrimitiveType::Int.type_info(), PrimitiveType::Int.type_info());
        assert_ne!(PrimitiveType::Int.type_info(), PrimitiveType::Long.type_info());
        assert_eq!(PrimitiveType::Char.type_info().name(), "char");
    }
}
