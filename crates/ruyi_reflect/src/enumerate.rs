//! Enumerates the fields and methods of a type and its ancestors.
//!
//! Members are reported in a fixed order: the members a type declares itself, in declaration order,
//! followed by the members of its super type, up to and including the root type.

use ruyi_assert::{Error, Result};

use crate::{
    member::{Field, IllegalAccess, Member, Method},
    Type,
};

/// The error a member visitor can fail with.
#[derive(Debug, thiserror::Error)]
pub enum VisitError {
    /// The visitor was not allowed to access the member
    #[error(transparent)]
    IllegalAccess(#[from] IllegalAccess),
    /// Any other failure, returned to the caller unchanged
    #[error(transparent)]
    Invalid(#[from] Error),
}

fn hierarchy(ty: &Type, include_ancestors: bool) -> impl Iterator<Item = &Type> {
    ty.ancestors().take(if include_ancestors { usize::MAX } else { 1 })
}

/// Returns the members of `ty`, optionally including those of its ancestors.
pub fn list_members<'t, M: Member<'t>>(ty: &'t Type, include_ancestors: bool) -> Vec<M> {
    hierarchy(ty, include_ancestors)
        .flat_map(M::declared)
        .collect()
}

/// Returns the fields of `ty`, optionally including those of its ancestors.
pub fn list_fields(ty: &Type, include_ancestors: bool) -> Vec<Field<'_>> {
    list_members(ty, include_ancestors)
}

/// Returns the methods of `ty`, optionally including those of its ancestors.
pub fn list_methods(ty: &Type, include_ancestors: bool) -> Vec<Method<'_>> {
    list_members(ty, include_ancestors)
}

/// Calls `visitor` for every member of `ty` selected by `filter`, or for every member if there is
/// no filter. Members are visited in the same order as [`list_members`] returns them.
///
/// # Errors
///
/// The first visitor failure stops the traversal. An [`IllegalAccess`] is reported as an
/// [`Error::InvalidState`] naming the member, with the access error as its source. Any other
/// error is returned unchanged.
pub fn visit_members<'t, M: Member<'t>>(
    ty: &'t Type,
    mut visitor: impl FnMut(M) -> Result<(), VisitError>,
    filter: Option<&dyn Fn(&M) -> bool>,
    include_ancestors: bool,
) -> Result<()> {
    for member in hierarchy(ty, include_ancestors).flat_map(M::declared) {
        if filter.map_or(true, |filter| filter(&member)) {
            visitor(member).map_err(|err| match err {
                VisitError::IllegalAccess(err) => Error::invalid_state_caused_by(
                    format!("Not allowed to access {} [{}]: {err}", M::KIND, member.name()),
                    err,
                ),
                VisitError::Invalid(err) => err,
            })?;
        }
    }
    Ok(())
}

/// Calls `visitor` for every field of `ty` selected by `filter`.
///
/// See [`visit_members`].
pub fn visit_fields<'t>(
    ty: &'t Type,
    visitor: impl FnMut(Field<'t>) -> Result<(), VisitError>,
    filter: Option<&dyn Fn(&Field<'t>) -> bool>,
    include_ancestors: bool,
) -> Result<()> {
    visit_members(ty, visitor, filter, include_ancestors)
}

/// Calls `visitor` for every method of `ty` selected by `filter`.
///
/// See [`visit_members`].
pub fn visit_methods<'t>(
    ty: &'t Type,
    visitor: impl FnMut(Method<'t>) -> Result<(), VisitError>,
    filter: Option<&dyn Fn(&Method<'t>) -> bool>,
    include_ancestors: bool,
) -> Result<()> {
    visit_members(ty, visitor, filter, include_ancestors)
}

#[cfg(test)]
mod tests {
    use super::{list_fields, list_methods, visit_fields, VisitError};
    use crate::{member::Member, HasStaticType, Modifiers, StructTypeBuilder, Type};
    use ruyi_assert::ErrorKind;

    #[test]
    fn non_struct_types_declare_nothing() {
        assert!(list_fields(i32::type_info(), true).is_empty());
        assert!(list_methods(&Type::string().array_type(), true).is_empty());
    }

    #[test]
    fn string_members() {
        let names: Vec<_> = list_methods(Type::string(), true)
            .iter()
            .map(|m| m.name())
            .collect();
        assert_eq!(names, ["length", "is_empty", "char_at"]);
    }

    #[test]
    fn wraps_illegal_access() {
        let ty = StructTypeBuilder::new("bank::Account")
            .add_field("owner", String::type_info().clone(), Modifiers::PUBLIC)
            .add_field("pin", i32::type_info().clone(), Modifiers::PRIVATE)
            .finish()
            .unwrap();
        let outsider = StructTypeBuilder::new("heist::Crew").finish().unwrap();

        let mut visited = Vec::new();
        let err = visit_fields(
            &ty,
            |field| {
                field.check_access(&outsider)?;
                visited.push(field.name());
                Ok(())
            },
            None,
            false,
        )
        .unwrap_err();

        assert_eq!(visited, ["owner"]);
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert!(std::error::Error::source(&err).is_some());
        insta::assert_snapshot!(err.to_string(), @r###"Not allowed to access field [pin]: type [heist::Crew] cannot access field [pin] of type [bank::Account] with modifiers "private""###);
    }

    #[test]
    fn passes_other_errors_through() {
        let err = visit_fields(
            Type::string(),
            |_| Err(VisitError::Invalid(ruyi_assert::Error::invalid_argument("stop"))),
            None,
            true,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(err.to_string(), "stop");
    }
}
