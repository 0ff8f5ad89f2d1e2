use std::any::Any;

use crate::{
    empty::{try_is_empty, try_is_empty_dyn, IsEmpty},
    message::{failed_msg, render, Message},
    Error, Result,
};

/// Returns the contained value, or an [`Error::NullArgument`] if there is none.
pub fn require_non_null<T>(value: Option<T>, msg: impl Message) -> Result<T> {
    value.ok_or_else(|| Error::null_argument(msg))
}

/// Returns the contained value of the parameter named `param_name`, or an
/// [`Error::NullArgument`] that names the parameter.
pub fn param_non_null<T>(value: Option<T>, param_name: &str) -> Result<T> {
    require_non_null(value, || {
        failed_msg(format!("the parameter [{param_name}] must not be null"))
    })
}

/// Returns `value` if it is not logically empty, otherwise an [`Error::InvalidArgument`].
pub fn require_non_empty<T: IsEmpty + ?Sized>(value: &T, msg: impl Message) -> Result<&T> {
    assert_that(!value.is_empty(), msg)?;
    Ok(value)
}

/// Like [`require_non_empty`] but determines the emptiness of `value` at runtime.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if the emptiness of `T` cannot be determined, or
/// [`Error::InvalidArgument`] if `value` is empty.
pub fn require_non_empty_any<T: Any>(value: &T, msg: impl Message) -> Result<&T> {
    assert_that(!try_is_empty(value)?, msg)?;
    Ok(value)
}

/// Like [`require_non_empty_any`] for a type-erased value.
pub fn require_non_empty_dyn<'a>(value: &'a dyn Any, msg: impl Message) -> Result<&'a dyn Any> {
    assert_that(!try_is_empty_dyn(value)?, msg)?;
    Ok(value)
}

/// Fails with an [`Error::InvalidArgument`] unless `exp` is `true`. An absent expression is not
/// `true`.
pub fn require_true(exp: impl Into<Option<bool>>, msg: impl Message) -> Result<()> {
    assert_that(exp.into() == Some(true), msg)
}

/// Fails with an [`Error::InvalidArgument`] unless `exp` is `false`. An absent expression is not
/// `false`.
pub fn require_false(exp: impl Into<Option<bool>>, msg: impl Message) -> Result<()> {
    assert_that(exp.into() == Some(false), msg)
}

/// Returns `text` if it contains at least one non-whitespace character, otherwise an
/// [`Error::InvalidArgument`].
pub fn require_non_blank<'a>(
    text: impl Into<Option<&'a str>>,
    msg: impl Message,
) -> Result<&'a str> {
    match text.into() {
        Some(text) if has_text(text) => Ok(text),
        _ => Err(Error::invalid_argument(msg)),
    }
}

/// Fails with an [`Error::InvalidState`] unless `exp` holds.
pub fn require_state(exp: bool, msg: impl Message) -> Result<()> {
    if exp {
        Ok(())
    } else {
        Err(Error::invalid_state(render(msg)))
    }
}

/// Fails with an [`Error::InvalidArgument`] unless `exp` holds.
pub fn assert_that(exp: bool, msg: impl Message) -> Result<()> {
    if exp {
        Ok(())
    } else {
        Err(Error::invalid_argument(msg))
    }
}

/// Fails with the error produced by `err` unless `exp` holds. `err` is only invoked on failure.
pub fn assert_or_else<E>(exp: bool, err: impl FnOnce() -> E) -> Result<(), E> {
    if exp {
        Ok(())
    } else {
        Err(err())
    }
}

/// Returns true if `text` contains at least one non-whitespace character.
pub fn has_text(text: &str) -> bool {
    text.chars().any(|c| !c.is_whitespace())
}

/// Returns true if `text` is absent, empty, or only consists of whitespace.
pub fn is_blank<'a>(text: impl Into<Option<&'a str>>) -> bool {
    !text.into().is_some_and(has_text)
}
