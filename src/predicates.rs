//! Nil-safe predicates and context helpers.
//!
//! "No error" is `None`. Every helper here treats `None` exactly like
//! [`Code::OK`], so callers never need to special-case absence before
//! comparing or deriving contexts.

use core::time::Duration;
use std::error::Error;

use crate::code::Code;
use crate::context::{CancelFunc, Context, ContextValue, Instant};
use crate::convert::cause;
use crate::traits::Codes;
use crate::types::Status;

/// Returns `true` when no coded value is present.
#[inline]
pub fn is_nil_codes(c: Option<&dyn Codes>) -> bool {
    c.is_none()
}

/// Substitutes [`Code::OK`] for an absent value.
#[inline]
pub fn safe_code(c: Option<&dyn Codes>) -> &dyn Codes {
    match c {
        Some(c) => c,
        None => &Code::OK,
    }
}

/// Compares two values by integer code.
#[inline]
pub fn equal(a: Option<&dyn Codes>, b: Option<&dyn Codes>) -> bool {
    safe_code(a).code() == safe_code(b).code()
}

/// Returns `true` if `err` canonicalizes to `code`'s integer code.
#[inline]
pub fn equal_error(code: &dyn Codes, err: Option<&(dyn Error + 'static)>) -> bool {
    cause(err).code() == code.code()
}

/// Returns `true` for absent values and for [`Code::OK`].
#[inline]
pub fn is_ok(c: Option<&dyn Codes>) -> bool {
    equal(c, Some(&Code::OK))
}

/// Negation of [`is_ok`].
#[inline]
pub fn is_error(c: Option<&dyn Codes>) -> bool {
    !is_ok(c)
}

/// Alias of [`is_ok`].
#[inline]
pub fn check_ok(c: Option<&dyn Codes>) -> bool {
    is_ok(c)
}

/// Alias of [`is_error`].
#[inline]
pub fn check_error(c: Option<&dyn Codes>) -> bool {
    is_error(c)
}

/// Context of `c`, or the background context.
#[inline]
pub fn context(c: Option<&dyn Codes>) -> Context {
    safe_code(c).context()
}

/// Binds `ctx` to `c` (OK when absent).
#[inline]
pub fn with_context(c: Option<&dyn Codes>, ctx: Context) -> Status {
    safe_code(c).with_context(ctx)
}

/// Derives a cancellable context for `c` (OK when absent).
#[inline]
pub fn with_cancel(c: Option<&dyn Codes>) -> (Status, CancelFunc) {
    safe_code(c).with_cancel()
}

/// Derives a deadline-bound context for `c` (OK when absent).
#[inline]
pub fn with_deadline(c: Option<&dyn Codes>, deadline: Instant) -> (Status, CancelFunc) {
    safe_code(c).with_deadline(deadline)
}

/// Derives a timeout-bound context for `c` (OK when absent).
#[inline]
pub fn with_timeout(c: Option<&dyn Codes>, timeout: Duration) -> (Status, CancelFunc) {
    safe_code(c).with_timeout(timeout)
}

/// Derives a value-carrying context for `c` (OK when absent).
#[inline]
pub fn with_value(c: Option<&dyn Codes>, key: &'static str, value: ContextValue) -> Status {
    safe_code(c).with_value(key, value)
}
