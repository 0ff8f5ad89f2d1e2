//! Fail-fast assertions for the ruyi toolkit.
//!
//! Every assertion takes the value under test together with a [`Message`] and returns the
//! validated value, so checks can be chained with `?`:
//!
//! ```rust
//! use ruyi_assert::{require_non_blank, require_non_empty, Result};
//!
//! fn first_word(text: &str) -> Result<&str> {
//!     let text = require_non_blank(text, "text must contain a word")?;
//!     let words: Vec<&str> = text.split_whitespace().collect();
//!     Ok(require_non_empty(&words, "no words")?[0])
//! }
//!
//! assert_eq!(first_word("  hello world").unwrap(), "hello");
//! assert!(first_word("   ").is_err());
//! ```
#![warn(missing_docs)]

mod assert;
pub mod empty;
mod error;
mod message;

pub use crate::{
    assert::{
        assert_or_else, assert_that, has_text, is_blank, param_non_null, require_false,
        require_non_blank, require_non_empty, require_non_empty_any, require_non_empty_dyn,
        require_non_null, require_state, require_true,
    },
    empty::{is_empty, is_exhausted, IsEmpty},
    error::{Error, ErrorKind, Result},
    message::{failed_msg, Message, DEFAULT_MESSAGE, FAILED_PREFIX},
};
