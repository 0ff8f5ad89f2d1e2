//! Assertions about the types of values.

use ruyi_assert::{
    assert_that, failed_msg, param_non_null, require_non_null, Message, Result,
};

use crate::{HasStaticType, Type};

/// A value that can report its runtime type.
pub trait Reflect {
    /// Returns the type of the value.
    fn type_of(&self) -> Type;
}

impl<T: HasStaticType> Reflect for T {
    fn type_of(&self) -> Type {
        T::type_info().clone()
    }
}

/// Fails unless `obj` is present and an instance of `ty`.
///
/// # Errors
///
/// Returns [`ruyi_assert::Error::NullArgument`] if `ty` is absent, and
/// [`ruyi_assert::Error::InvalidArgument`] with `msg` if `obj` is absent or its type is not
/// assignable to `ty`.
pub fn require_instance_of(
    obj: Option<&dyn Reflect>,
    ty: Option<&Type>,
    msg: impl Message,
) -> Result<()> {
    let ty = require_non_null(ty, || {
        failed_msg("the type to check against must not be null")
    })?;
    assert_that(
        obj.is_some_and(|obj| ty.is_assignable_from(&obj.type_of())),
        msg,
    )
}

/// Like [`require_instance_of`] with a message naming the expected type.
///
/// # Errors
///
/// See [`require_instance_of`].
pub fn require_instance_of_default(obj: Option<&dyn Reflect>, ty: Option<&Type>) -> Result<()> {
    require_instance_of(obj, ty, || {
        failed_msg(format!(
            "the object must not be null and must be an instance of type [{}]",
            ty.map_or("", Type::name)
        ))
    })
}

/// Fails unless `sub_type` is assignable to `super_type`.
///
/// # Errors
///
/// Returns [`ruyi_assert::Error::NullArgument`] naming the absent parameter if either type is
/// absent, and [`ruyi_assert::Error::InvalidArgument`] with `msg` if `super_type` is not assignable
/// from `sub_type`.
pub fn require_subtype_of(
    sub_type: Option<&Type>,
    super_type: Option<&Type>,
    msg: impl Message,
) -> Result<()> {
    let sub_type = param_non_null(sub_type, "sub_type")?;
    let super_type = param_non_null(super_type, "super_type")?;
    assert_that(super_type.is_assignable_from(sub_type), msg)
}

/// Like [`require_subtype_of`] with a message naming both types.
///
/// # Errors
///
/// See [`require_subtype_of`].
pub fn require_subtype_of_default(
    sub_type: Option<&Type>,
    super_type: Option<&Type>,
) -> Result<()> {
    require_subtype_of(sub_type, super_type, || {
        failed_msg(format!(
            "type [{}] must be a subtype of type [{}]",
            sub_type.map_or("", Type::name),
            super_type.map_or("", Type::name)
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::{require_instance_of, require_instance_of_default, require_subtype_of_default};
    use crate::{HasStaticType, Type};
    use ruyi_assert::ErrorKind;

    #[test]
    fn instance_of() {
        let text = String::from("text");
        assert!(require_instance_of(Some(&text), Some(Type::object()), "").is_ok());
        assert!(require_instance_of_default(Some(&vec![1i32]), Some(Type::object())).is_ok());

        let err = require_instance_of_default(Some(&1i32), Some(String::type_info())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        insta::assert_snapshot!(err.to_string(), @"[Assertion failed] - the object must not be null and must be an instance of type [core::String]");

        let err = require_instance_of_default(None, Some(Type::object())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let err = require_instance_of(Some(&text), None, "unused").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NullArgument);
        assert_eq!(
            err.to_string(),
            "[Assertion failed] - the type to check against must not be null"
        );
    }

    #[test]
    fn subtype_of() {
        assert!(require_subtype_of_default(Some(Type::string()), Some(Type::object())).is_ok());
        assert!(require_subtype_of_default(
            Some(Vec::<String>::type_info()),
            Some(&Type::object().array_type())
        )
        .is_ok());

        let err =
            require_subtype_of_default(Some(Type::object()), Some(Type::string())).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"[Assertion failed] - type [core::Object] must be a subtype of type [core::String]");

        let err = require_subtype_of_default(None, Some(Type::object())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NullArgument);
        insta::assert_snapshot!(err.to_string(), @"[Assertion failed] - the parameter [sub_type] must not be null");

        let err = require_subtype_of_default(Some(Type::object()), None).unwrap_err();
        assert!(err.to_string().contains("[super_type]"));
    }
}
