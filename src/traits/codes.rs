use core::fmt;
use core::time::Duration;

use crate::context::{CancelFunc, Context, ContextValue, Instant};
use crate::types::{DebugInfo, Envelope, Status};

/// Capability shared by every value that can stand in for an error code.
///
/// Exactly two concrete shapes implement it: the bare [`Code`](crate::Code)
/// and the rich [`Status`]. [`Coded`](crate::types::Coded) is the closed sum
/// of both and implements it by delegation.
///
/// The context derivation methods never touch the receiver: they return a new
/// [`Status`] that shares the receiver's code, message and details and only
/// swaps the attached [`Context`].
pub trait Codes: fmt::Display + fmt::Debug + Send + Sync {
    /// Integer code.
    fn code(&self) -> i32;

    /// Registered message of [`Codes::code`].
    fn message(&self) -> String;

    /// Error string carried by the value.
    ///
    /// For a bare code this equals [`Codes::message`]; a status returns its
    /// own message, which may override the registered one.
    fn error_text(&self) -> String;

    /// Attached detail envelopes; always empty for a bare code.
    fn details(&self) -> &[Envelope];

    /// HTTP status mapped to [`Codes::code`].
    fn http_status(&self) -> u16;

    /// Decoded stack-capture details; always empty for a bare code.
    fn stack_entries(&self) -> Vec<DebugInfo>;

    /// Attached context, or the background context.
    fn context(&self) -> Context;

    /// Projects the value onto a [`Status`] without capturing a stack.
    fn to_status(&self) -> Status;

    /// Returns a status bound to `ctx`.
    fn with_context(&self, ctx: Context) -> Status {
        self.to_status().with_context(ctx)
    }

    /// Returns a status bound to a cancellable child of [`Codes::context`].
    fn with_cancel(&self) -> (Status, CancelFunc) {
        self.to_status().with_cancel()
    }

    /// Returns a status bound to a child context expiring at `deadline`.
    fn with_deadline(&self, deadline: Instant) -> (Status, CancelFunc) {
        self.to_status().with_deadline(deadline)
    }

    /// Returns a status bound to a child context expiring after `timeout`.
    fn with_timeout(&self, timeout: Duration) -> (Status, CancelFunc) {
        self.to_status().with_timeout(timeout)
    }

    /// Returns a status bound to a child context carrying `key -> value`.
    fn with_value(&self, key: &'static str, value: ContextValue) -> Status {
        self.to_status().with_shared_value(key, value)
    }
}
