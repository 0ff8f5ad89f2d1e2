/// The prefix of every message produced by [`failed_msg`].
pub const FAILED_PREFIX: &str = "[Assertion failed] - ";

/// The message used when an assertion produces an empty message.
pub const DEFAULT_MESSAGE: &str = "Assertion failed";

/// Something that can be turned into the message of a failed assertion.
///
/// Literal strings are used as-is. Closures are only invoked when the assertion fails, which keeps
/// expensive formatting off the success path:
///
/// ```rust
/// # use ruyi_assert::require_true;
/// let names = ["a", "b"];
/// assert!(require_true(names.len() == 2, || format!("expected two names, got {names:?}")).is_ok());
/// ```
pub trait Message {
    /// Produces the message text.
    fn into_message(self) -> String;
}

impl Message for &str {
    fn into_message(self) -> String {
        self.to_owned()
    }
}

impl Message for String {
    fn into_message(self) -> String {
        self
    }
}

impl Message for &String {
    fn into_message(self) -> String {
        self.clone()
    }
}

impl<F, S> Message for F
where
    F: FnOnce() -> S,
    S: Into<String>,
{
    fn into_message(self) -> String {
        self().into()
    }
}

/// Evaluates `msg`, falling back to [`DEFAULT_MESSAGE`] for empty text.
pub(crate) fn render(msg: impl Message) -> String {
    let message = msg.into_message();
    if message.is_empty() {
        DEFAULT_MESSAGE.to_owned()
    } else {
        message
    }
}

/// Prefixes `msg` with `[Assertion failed] - `.
pub fn failed_msg(msg: impl AsRef<str>) -> String {
    format!("{FAILED_PREFIX}{}", msg.as_ref())
}
