//! Cancellable, deadline-bearing context handles.
//!
//! A [`Context`] is an immutable, cheaply cloneable handle. Deriving a new
//! one (`with_cancel`, `with_deadline`, `with_timeout`, `with_value`) links
//! it to its parent:
//!
//! - cancelling a parent cancels every derived child,
//! - a child's deadline is never later than its parent's,
//! - value lookups walk from the child towards the root.
//!
//! The status types only manufacture and thread these handles; consumers
//! observe them through [`Context::err`] or await [`Context::done`].
//!
//! # Examples
//!
//! ```
//! use status_rail::context::{Context, ContextError};
//!
//! let root = Context::background();
//! let (child, cancel) = root.with_cancel();
//! let grandchild = child.with_value("request_id", 42_u64);
//!
//! assert_eq!(grandchild.value::<u64>("request_id"), Some(&42));
//! cancel.cancel();
//! assert_eq!(grandchild.err(), Some(ContextError::Canceled));
//! assert_eq!(root.err(), None);
//! ```

use core::any::Any;
use core::fmt;
use core::time::Duration;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::code::Code;

/// Deadline instant; follows tokio's clock so paused test time applies.
pub use tokio::time::Instant;

/// Type-erased value stored in a [`Context`].
pub type ContextValue = Arc<dyn Any + Send + Sync>;

/// Handle carrying cancellation, an optional deadline and scoped values.
///
/// The default value is the background context: never cancelled, no
/// deadline, no values.
#[derive(Clone, Default)]
pub struct Context {
    node: Option<Arc<Node>>,
}

struct Node {
    parent: Context,
    token: Option<CancellationToken>,
    deadline: Option<Instant>,
    value: Option<(&'static str, ContextValue)>,
}

impl Context {
    /// Returns the empty root context.
    #[inline]
    pub fn background() -> Self {
        Self::default()
    }

    /// Returns `true` if nothing has been derived onto this handle.
    #[inline]
    pub fn is_background(&self) -> bool {
        self.node.is_none()
    }

    /// Cancellation token shared with this context, if any ancestor is cancellable.
    #[inline]
    pub fn token(&self) -> Option<&CancellationToken> {
        self.node.as_ref().and_then(|node| node.token.as_ref())
    }

    /// Effective deadline, if any.
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.node.as_ref().and_then(|node| node.deadline)
    }

    /// Derives a cancellable child.
    pub fn with_cancel(&self) -> (Context, CancelFunc) {
        let token = self.child_token();
        let ctx = self.derive(Some(token.clone()), self.deadline(), None);
        (ctx, CancelFunc { token })
    }

    /// Derives a child that expires at `deadline` or at the parent's
    /// deadline, whichever comes first.
    pub fn with_deadline(&self, deadline: impl Into<Instant>) -> (Context, CancelFunc) {
        let deadline = deadline.into();
        let effective = match self.deadline() {
            Some(parent) if parent < deadline => parent,
            _ => deadline,
        };
        let token = self.child_token();
        let ctx = self.derive(Some(token.clone()), Some(effective), None);
        (ctx, CancelFunc { token })
    }

    /// Derives a child that expires `timeout` from now.
    pub fn with_timeout(&self, timeout: Duration) -> (Context, CancelFunc) {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            // Unrepresentable instant; treat as no deadline at all.
            None => self.with_cancel(),
        }
    }

    /// Derives a child carrying `key -> value`.
    pub fn with_value<V>(&self, key: &'static str, value: V) -> Context
    where
        V: Any + Send + Sync,
    {
        self.with_shared_value(key, Arc::new(value))
    }

    /// Derives a child carrying an already shared value.
    pub fn with_shared_value(&self, key: &'static str, value: ContextValue) -> Context {
        self.derive(self.token().cloned(), self.deadline(), Some((key, value)))
    }

    /// Looks up the nearest value stored under `key`.
    ///
    /// Returns `None` when the key is absent or the nearest value under it
    /// is not a `V`.
    pub fn value<V: Any>(&self, key: &str) -> Option<&V> {
        let mut current = self;
        while let Some(node) = &current.node {
            if let Some((k, value)) = &node.value {
                if *k == key {
                    return value.downcast_ref::<V>();
                }
            }
            current = &node.parent;
        }
        None
    }

    /// Reports why the context is done, or `None` while it is still live.
    pub fn err(&self) -> Option<ContextError> {
        if self.token().is_some_and(CancellationToken::is_cancelled) {
            return Some(ContextError::Canceled);
        }
        match self.deadline() {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Returns `true` once cancelled or past the deadline.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.err().is_some()
    }

    /// Resolves when the context is cancelled or its deadline passes.
    ///
    /// Never resolves for the background context.
    pub async fn done(&self) {
        let cancelled = async {
            match self.token() {
                Some(token) => token.cancelled().await,
                None => core::future::pending::<()>().await,
            }
        };
        match self.deadline() {
            Some(deadline) => {
                tokio::select! {
                    _ = cancelled => {},
                    _ = tokio::time::sleep_until(deadline) => {},
                }
            },
            None => cancelled.await,
        }
    }

    fn child_token(&self) -> CancellationToken {
        match self.token() {
            Some(parent) => parent.child_token(),
            None => CancellationToken::new(),
        }
    }

    fn derive(
        &self,
        token: Option<CancellationToken>,
        deadline: Option<Instant>,
        value: Option<(&'static str, ContextValue)>,
    ) -> Context {
        Context {
            node: Some(Arc::new(Node { parent: self.clone(), token, deadline, value })),
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            None => f.write_str("Context::Background"),
            Some(node) => f
                .debug_struct("Context")
                .field("cancellable", &node.token.is_some())
                .field("deadline", &node.deadline)
                .field("key", &node.value.as_ref().map(|(key, _)| *key))
                .field("err", &self.err())
                .finish_non_exhaustive(),
        }
    }
}

/// Trigger returned alongside a cancellable context.
///
/// Cancelling is idempotent and propagates to every context derived from
/// the one it was issued with.
#[derive(Debug, Clone)]
pub struct CancelFunc {
    token: CancellationToken,
}

impl CancelFunc {
    /// Cancels the associated context and its descendants.
    #[inline]
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns `true` once [`CancelFunc::cancel`] ran here or on an ancestor.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Why a context is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextError {
    /// Cancelled through a [`CancelFunc`].
    Canceled,
    /// The deadline passed.
    DeadlineExceeded,
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canceled => f.write_str("context canceled"),
            Self::DeadlineExceeded => f.write_str("context deadline exceeded"),
        }
    }
}

impl std::error::Error for ContextError {}

impl From<ContextError> for Code {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Canceled => Code::CANCELLED,
            ContextError::DeadlineExceeded => Code::DEADLINE_EXCEEDED,
        }
    }
}
