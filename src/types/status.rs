//! Rich status values.
//!
//! A [`Status`] pairs a shared [`StatusRecord`] (code, message, detail
//! envelopes) with an optional [`Context`]. Context derivation returns a new
//! status that points at the same record, so details attached before the
//! derivation are always visible through the derived value.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use status_rail::{Code, Status};
//!
//! let status = Status::new(Code::UNAVAILABLE, "inventory service down");
//! let (scoped, _cancel) = status.with_timeout(Duration::from_secs(1));
//!
//! assert_eq!(scoped.code(), 14);
//! assert_eq!(scoped.error_text(), "inventory service down");
//! assert_eq!(scoped.details(), status.details());
//! assert!(scoped.context().deadline().is_some());
//! ```

use core::any::Any;
use core::fmt;
use core::time::Duration;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::code::Code;
use crate::context::{CancelFunc, Context, ContextValue, Instant};
use crate::predicates::equal_error;
use crate::registry::Registry;
use crate::stack::StackCapture;
use crate::traits::Codes;
use crate::types::{Coded, DebugInfo, DetailMessage, EncodingError, Envelope, ErrorVec};

/// Wire form of a status: code, message and ordered detail envelopes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    /// Integer code.
    pub code: i32,
    /// Message; empty means "resolve the registered message locally".
    #[serde(default)]
    pub message: String,
    /// Detail envelopes in attachment order.
    #[serde(default)]
    pub details: ErrorVec<Envelope>,
}

impl DetailMessage for StatusRecord {
    const TYPE_URL: &'static str = "type.googleapis.com/google.rpc.Status";
}

/// Error value carrying a code, a message, structured details and a context.
#[derive(Clone)]
pub struct Status {
    record: Arc<StatusRecord>,
    ctx: Option<Context>,
}

impl Status {
    /// Builds a status with a custom message, capturing the caller's stack.
    pub fn new(code: Code, message: impl Into<String>) -> Self {
        let message = message.into();
        let mut status = Self::from_parts(code.code(), message.clone());
        status.push_stack(message);
        status
    }

    /// Builds a status from pre-formatted arguments; see [`errorf!`](crate::errorf).
    #[inline]
    pub fn formatted(code: Code, args: fmt::Arguments<'_>) -> Self {
        Self::new(code, args.to_string())
    }

    /// Builds a status carrying the code's registered message, capturing the
    /// caller's stack.
    pub fn from_code(code: Code) -> Self {
        let mut status = Self::from_parts(code.code(), code.message());
        status.push_stack(String::new());
        status
    }

    /// Converts a wire record.
    ///
    /// An empty message yields a bare [`Code`], leaving the message to be
    /// resolved from the local registry rather than trusted from the wire.
    pub fn from_proto(record: StatusRecord) -> Coded {
        if record.message.is_empty() {
            return Coded::Code(Code::new(record.code));
        }
        Coded::Status(Self::from_record(record))
    }

    /// Converts an envelope expected to hold a [`StatusRecord`].
    ///
    /// Any other shape becomes an [`Code::INTERNAL`] status describing it.
    pub fn from_any(envelope: &Envelope) -> Coded {
        match envelope.unpack::<StatusRecord>() {
            Ok(Some(record)) => Self::from_proto(record),
            Ok(None) => Coded::Status(Self::new(
                Code::INTERNAL,
                format!("invalid proto message get {}", envelope.type_url),
            )),
            Err(err) => Coded::Status(Self::new(
                Code::INTERNAL,
                format!("invalid proto message get {}: {}", envelope.type_url, err),
            )),
        }
    }

    pub(crate) fn from_parts(code: i32, message: String) -> Self {
        Self::from_record(StatusRecord { code, message, details: ErrorVec::new() })
    }

    pub(crate) fn from_record(record: StatusRecord) -> Self {
        Self { record: Arc::new(record), ctx: None }
    }

    /// Integer code.
    #[inline]
    pub fn code(&self) -> i32 {
        self.record.code
    }

    /// Registered message of the status code.
    #[inline]
    pub fn message(&self) -> String {
        Code::new(self.code()).message()
    }

    /// The status's own message.
    #[inline]
    pub fn error_text(&self) -> String {
        self.record.message.clone()
    }

    /// HTTP status mapped to the status code.
    #[inline]
    pub fn http_status(&self) -> u16 {
        Code::new(self.code()).http_status()
    }

    /// Detail envelopes in attachment order.
    #[inline]
    pub fn details(&self) -> &[Envelope] {
        &self.record.details
    }

    /// Decodes every stack-capture detail.
    ///
    /// Envelopes of other types are skipped; corrupt ones are logged and skipped.
    pub fn stack_entries(&self) -> Vec<DebugInfo> {
        self.record
            .details
            .iter()
            .filter_map(|envelope| match envelope.unpack::<DebugInfo>() {
                Ok(info) => info,
                Err(err) => {
                    tracing::warn!(code = self.code(), error = %err, "skipping undecodable stack detail");
                    None
                },
            })
            .collect()
    }

    /// Attached context, or the background context.
    #[inline]
    pub fn context(&self) -> Context {
        self.ctx.clone().unwrap_or_default()
    }

    /// Appends each message as a detail envelope.
    ///
    /// Not transactional: when a message fails to encode, the envelopes
    /// appended before it stay on the status and the error is returned.
    /// Statuses derived earlier keep their own view of the details.
    pub fn with_details<M: DetailMessage>(
        &mut self,
        messages: &[M],
    ) -> Result<&mut Self, EncodingError> {
        let record = Arc::make_mut(&mut self.record);
        for message in messages {
            record.details.push(Envelope::pack(message)?);
        }
        Ok(self)
    }

    /// Appends already encoded envelopes.
    pub fn with_envelopes<I>(&mut self, envelopes: I) -> &mut Self
    where
        I: IntoIterator<Item = Envelope>,
    {
        Arc::make_mut(&mut self.record).details.extend(envelopes);
        self
    }

    /// Captures the caller's stack into a new detail annotated with `note`.
    #[must_use]
    pub fn with_stack_entries(mut self, note: impl Into<String>) -> Self {
        self.push_stack(note.into());
        self
    }

    /// Appends the stack details of `other`, annotating each one with
    /// `":{code}|{message}|{original}"` so the wrapped provenance survives.
    #[must_use]
    pub fn merge_stack_entries(mut self, other: &dyn Codes) -> Self {
        let code = other.code();
        let message = other.message();
        let merged: Vec<DebugInfo> = other
            .stack_entries()
            .into_iter()
            .map(|mut info| {
                info.detail = format!(":{}|{}|{}", code, message, info.detail);
                info
            })
            .collect();
        let merged = self.with_details(&merged).map(|_| ());
        if let Err(err) = merged {
            tracing::warn!(code = self.code(), error = %err, "failed to merge stack details");
        }
        self
    }

    /// Returns `true` if `err` canonicalizes to the same code.
    #[inline]
    pub fn equal(&self, err: Option<&(dyn std::error::Error + 'static)>) -> bool {
        equal_error(self, err)
    }

    /// Returns a status sharing this record, bound to `ctx`.
    pub fn with_context(&self, ctx: Context) -> Status {
        Status { record: Arc::clone(&self.record), ctx: Some(ctx) }
    }

    /// Returns a status bound to a cancellable child of the current context.
    pub fn with_cancel(&self) -> (Status, CancelFunc) {
        let (ctx, cancel) = self.context().with_cancel();
        (self.with_context(ctx), cancel)
    }

    /// Returns a status bound to a child context expiring at `deadline`.
    pub fn with_deadline(&self, deadline: impl Into<Instant>) -> (Status, CancelFunc) {
        let (ctx, cancel) = self.context().with_deadline(deadline);
        (self.with_context(ctx), cancel)
    }

    /// Returns a status bound to a child context expiring after `timeout`.
    pub fn with_timeout(&self, timeout: Duration) -> (Status, CancelFunc) {
        let (ctx, cancel) = self.context().with_timeout(timeout);
        (self.with_context(ctx), cancel)
    }

    /// Returns a status bound to a child context carrying `key -> value`.
    pub fn with_value<V>(&self, key: &'static str, value: V) -> Status
    where
        V: Any + Send + Sync,
    {
        self.with_context(self.context().with_value(key, value))
    }

    /// Like [`Status::with_value`] for an already shared value.
    pub fn with_shared_value(&self, key: &'static str, value: ContextValue) -> Status {
        self.with_context(self.context().with_shared_value(key, value))
    }

    /// Borrows the wire record.
    #[inline]
    pub fn proto(&self) -> &StatusRecord {
        &self.record
    }

    /// Extracts the wire record, cloning it only if it is shared.
    #[inline]
    pub fn into_proto(self) -> StatusRecord {
        Arc::unwrap_or_clone(self.record)
    }

    /// Encodes the wire record into an envelope.
    #[inline]
    pub fn to_any(&self) -> Result<Envelope, EncodingError> {
        Envelope::pack(self.proto())
    }

    /// Returns `true` if both statuses share one record.
    #[inline]
    pub fn ptr_eq(a: &Status, b: &Status) -> bool {
        Arc::ptr_eq(&a.record, &b.record)
    }

    fn push_stack(&mut self, note: String) {
        let config = Registry::global().config();
        if !config.capture_stacks {
            return;
        }
        let entries = StackCapture::from_config(config).capture(0);
        let info = DebugInfo::from_entries(&entries, note);
        let attached = self.with_details(&[info]).map(|_| ());
        if let Err(err) = attached {
            tracing::warn!(code = self.code(), error = %err, "failed to attach stack detail");
        }
    }
}

impl Codes for Status {
    #[inline]
    fn code(&self) -> i32 {
        Status::code(self)
    }

    #[inline]
    fn message(&self) -> String {
        Status::message(self)
    }

    #[inline]
    fn error_text(&self) -> String {
        Status::error_text(self)
    }

    #[inline]
    fn details(&self) -> &[Envelope] {
        Status::details(self)
    }

    #[inline]
    fn http_status(&self) -> u16 {
        Status::http_status(self)
    }

    #[inline]
    fn stack_entries(&self) -> Vec<DebugInfo> {
        Status::stack_entries(self)
    }

    #[inline]
    fn context(&self) -> Context {
        Status::context(self)
    }

    #[inline]
    fn to_status(&self) -> Status {
        self.clone()
    }
}

impl Codes for Code {
    #[inline]
    fn code(&self) -> i32 {
        Code::code(*self)
    }

    #[inline]
    fn message(&self) -> String {
        Code::message(*self)
    }

    #[inline]
    fn error_text(&self) -> String {
        Code::error_text(*self)
    }

    #[inline]
    fn details(&self) -> &[Envelope] {
        &[]
    }

    #[inline]
    fn http_status(&self) -> u16 {
        Code::http_status(*self)
    }

    #[inline]
    fn stack_entries(&self) -> Vec<DebugInfo> {
        Vec::new()
    }

    #[inline]
    fn context(&self) -> Context {
        Context::background()
    }

    fn to_status(&self) -> Status {
        Status::from_parts(self.code(), Code::message(*self))
    }
}

impl PartialEq for Status {
    /// Compares code, message and details; contexts are ignored.
    fn eq(&self, other: &Self) -> bool {
        Status::ptr_eq(self, other) || self.record == other.record
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Status")
            .field("code", &self.record.code)
            .field("message", &self.record.message)
            .field("details", &self.record.details.len())
            .field("context", &self.ctx)
            .finish()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.record.message)
    }
}

impl std::error::Error for Status {}

impl From<StatusRecord> for Status {
    #[inline]
    fn from(record: StatusRecord) -> Self {
        Self::from_record(record)
    }
}
