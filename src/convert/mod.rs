//! Canonicalization of arbitrary errors into [`Coded`] values.
//!
//! Every function here is total: whatever arrives at a boundary (nothing, a
//! plain error, an error chain whose root already carries a code, a bare
//! integer or a numeric string) maps to some valid [`Coded`] value.
//!
//! # Examples
//!
//! ```
//! use status_rail::convert::{cause, parse_string};
//! use status_rail::Code;
//! use status_rail::traits::Codes;
//!
//! let plain = std::io::Error::other("404");
//! assert_eq!(cause(Some(&plain)).code(), 404);
//! assert_eq!(cause(None), Code::OK);
//! assert_eq!(parse_string("not a number"), Code::INVALID_ARGUMENT);
//! ```

use std::error::Error;

use crate::code::Code;
use crate::types::{Coded, Status};

/// Follows [`Error::source`] to the deepest error in the chain.
pub fn root_cause<'a>(err: &'a (dyn Error + 'static)) -> &'a (dyn Error + 'static) {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current
}

/// Returns the coded value behind `err` if it is one of this crate's types.
///
/// A status comes back as a clone sharing the same record.
pub fn as_coded(err: &(dyn Error + 'static)) -> Option<Coded> {
    if let Some(status) = err.downcast_ref::<Status>() {
        return Some(Coded::Status(status.clone()));
    }
    if let Some(code) = err.downcast_ref::<Code>() {
        return Some(Coded::Code(*code));
    }
    err.downcast_ref::<Coded>().cloned()
}

/// Canonicalizes an error.
///
/// - `None` is [`Code::OK`].
/// - A root cause that already carries a code is returned as-is.
/// - Anything else is read as a numeric code string via [`parse_string`].
pub fn cause(err: Option<&(dyn Error + 'static)>) -> Coded {
    let Some(err) = err else {
        return Coded::Code(Code::OK);
    };
    let root = root_cause(err);
    match as_coded(root) {
        Some(coded) => coded,
        None => Coded::Code(parse_string(&root.to_string())),
    }
}

/// Parses a code string: empty is OK, non-numeric is InvalidArgument.
pub fn parse_string(s: &str) -> Code {
    if s.is_empty() {
        return Code::OK;
    }
    match s.parse::<i32>() {
        Ok(code) => Code::new(code),
        Err(_) => Code::INVALID_ARGUMENT,
    }
}

/// Wraps an integer without any checks.
#[inline]
pub const fn as_int(code: i32) -> Code {
    Code::new(code)
}

/// Promotes a coded value to a [`Status`].
///
/// A status passes through untouched, keeping its stack details; a bare code
/// becomes a status with its registered text and a fresh stack capture.
pub fn wrap_codes(codes: impl Into<Coded>) -> Status {
    match codes.into() {
        Coded::Status(status) => status,
        Coded::Code(code) => Status::new(code, code.error_text()),
    }
}

/// Canonicalizes an error, wrapping uncoded errors under `fallback`.
///
/// Unlike [`cause`], the text of an uncoded error is kept as the message of
/// a new status instead of being parsed as a code.
pub fn from_error(err: Option<&(dyn Error + 'static)>, fallback: Code) -> Coded {
    let Some(err) = err else {
        return Coded::Code(Code::OK);
    };
    match as_coded(root_cause(err)) {
        Some(coded) => coded,
        None => Coded::Status(Status::new(fallback, err.to_string())),
    }
}
