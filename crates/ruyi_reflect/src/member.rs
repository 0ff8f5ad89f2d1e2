//! Fields and methods declared by struct types, their modifiers and access rules.

use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::r#type::{FieldInfo, MethodInfo, Type};

bitflags::bitflags! {
    /// Modifier flags of types and members.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Modifiers: u32 {
        const PUBLIC = 0x1;
        const PRIVATE = 0x2;
        const PROTECTED = 0x4;
        const STATIC = 0x8;
        const FINAL = 0x10;
        /// Generated by tooling, not declared in source
        const SYNTHETIC = 0x1000;

        /// The bits that determine accessibility
        const VISIBILITY = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
    }
}

impl Modifiers {
    /// Returns the accessibility level described by these modifiers.
    pub fn accessibility(self) -> Accessibility {
        if self.contains(Modifiers::PUBLIC) {
            Accessibility::Public
        } else if self.contains(Modifiers::PROTECTED) {
            Accessibility::Protected
        } else if self.contains(Modifiers::PRIVATE) {
            Accessibility::Private
        } else {
            Accessibility::PackagePrivate
        }
    }
}

impl Display for Modifiers {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let keywords = [
            (Modifiers::PUBLIC, "public"),
            (Modifiers::PROTECTED, "protected"),
            (Modifiers::PRIVATE, "private"),
            (Modifiers::STATIC, "static"),
            (Modifiers::FINAL, "final"),
        ];
        let words = keywords
            .into_iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, word)| word)
            .join(" ");
        f.write_str(&words)
    }
}

/// How widely a type or member can be accessed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Accessibility {
    Public,
    Protected,
    /// No visibility modifier: accessible within the same namespace
    PackagePrivate,
    Private,
}

/// Returns true if `modifiers` carry none of the visibility flags.
pub fn is_package_private(modifiers: Modifiers) -> bool {
    !modifiers.intersects(Modifiers::VISIBILITY)
}

/// Returns true if `member` is public and was not generated by tooling.
pub fn is_accessible<'t, M: Member<'t>>(member: &M) -> bool {
    !member.is_synthetic() && member.modifiers().contains(Modifiers::PUBLIC)
}

/// The error returned when a member is not accessible from a type.
#[derive(Debug, thiserror::Error)]
#[error(
    "type [{accessor}] cannot access {kind} [{member}] of type [{declaring_type}] with modifiers \"{modifiers}\""
)]
pub struct IllegalAccess {
    /// The type that attempted the access
    pub accessor: String,
    /// Either `field` or `method`
    pub kind: &'static str,
    /// The name of the member
    pub member: String,
    /// The type that declares the member
    pub declaring_type: String,
    /// The modifiers of the member
    pub modifiers: Modifiers,
}

/// A member declared by a struct type.
pub trait Member<'t>: Copy + Sized {
    /// Describes the kind of member in messages, e.g. `field`.
    const KIND: &'static str;

    /// Returns the members `ty` declares itself, in declaration order. Types other than structs
    /// declare nothing.
    fn declared(ty: &'t Type) -> Vec<Self>;

    /// Returns the name of the member
    fn name(&self) -> &'t str;

    /// Returns the type that declares the member
    fn declaring_type(&self) -> &'t Type;

    /// Returns the modifiers of the member
    fn modifiers(&self) -> Modifiers;

    /// Returns true if the member was generated by tooling.
    fn is_synthetic(&self) -> bool {
        self.modifiers().contains(Modifiers::SYNTHETIC)
    }

    /// Returns the accessibility level of the member.
    fn accessibility(&self) -> Accessibility {
        self.modifiers().accessibility()
    }

    /// Checks whether code of type `accessor` may access this member.
    ///
    /// Public members are accessible from anywhere. Private members only from the declaring type.
    /// Protected members from the declaring type, its subtypes and types in the same namespace.
    /// Members without visibility modifier from types in the same namespace.
    fn check_access(&self, accessor: &Type) -> Result<(), IllegalAccess> {
        let declaring_type = self.declaring_type();
        let same_package = accessor.package() == declaring_type.package();
        let allowed = match self.accessibility() {
            Accessibility::Public => true,
            Accessibility::Private => accessor == declaring_type,
            Accessibility::Protected => {
                same_package || declaring_type.is_assignable_from(accessor)
            }
            Accessibility::PackagePrivate => same_package,
        };

        if allowed {
            Ok(())
        } else {
            Err(IllegalAccess {
                accessor: accessor.name().to_owned(),
                kind: Self::KIND,
                member: self.name().to_owned(),
                declaring_type: declaring_type.name().to_owned(),
                modifiers: self.modifiers(),
            })
        }
    }
}

/// A field declared by a struct type.
#[derive(Clone, Copy)]
pub struct Field<'t> {
    declaring_type: &'t Type,
    inner: &'t FieldInfo,
}

impl<'t> Field<'t> {
    pub(crate) fn new(declaring_type: &'t Type, inner: &'t FieldInfo) -> Self {
        Self {
            declaring_type,
            inner,
        }
    }

    /// Returns the type of the field
    pub fn ty(&self) -> &'t Type {
        &self.inner.ty
    }
}

impl<'t> Member<'t> for Field<'t> {
    const KIND: &'static str = "field";

    fn declared(ty: &'t Type) -> Vec<Self> {
        ty.as_struct()
            .map(|s| s.fields().collect())
            .unwrap_or_default()
    }

    fn name(&self) -> &'t str {
        &self.inner.name
    }

    fn declaring_type(&self) -> &'t Type {
        self.declaring_type
    }

    fn modifiers(&self) -> Modifiers {
        self.inner.modifiers
    }
}

impl fmt::Debug for Field<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}: {}", self.declaring_type, self.name(), self.ty())
    }
}

/// A method declared by a struct type.
#[derive(Clone, Copy)]
pub struct Method<'t> {
    declaring_type: &'t Type,
    inner: &'t MethodInfo,
}

impl<'t> Method<'t> {
    pub(crate) fn new(declaring_type: &'t Type, inner: &'t MethodInfo) -> Self {
        Self {
            declaring_type,
            inner,
        }
    }

    /// Returns the types of the parameters in declaration order
    pub fn parameter_types(&self) -> &'t [Type] {
        &self.inner.parameters
    }

    /// Returns the return type of the method
    pub fn return_type(&self) -> &'t Type {
        &self.inner.return_type
    }
}

impl<'t> Member<'t> for Method<'t> {
    const KIND: &'static str = "method";

    fn declared(ty: &'t Type) -> Vec<Self> {
        ty.as_struct()
            .map(|s| s.methods().collect())
            .unwrap_or_default()
    }

    fn name(&self) -> &'t str {
        &self.inner.name
    }

    fn declaring_type(&self) -> &'t Type {
        self.declaring_type
    }

    fn modifiers(&self) -> Modifiers {
        self.inner.modifiers
    }
}

impl fmt::Debug for Method<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}({}) -> {}",
            self.declaring_type,
            self.name(),
            self.parameter_types().iter().join(", "),
            self.return_type()
        )
    }
}
