//! Unified status codes for distributed services.
//!
//! Every error reduces to an integer [`Code`], an optional message, optional
//! structured details and an HTTP mapping. Each submodule re-exports its
//! public surface from here, so consumers can simply depend on
//! `status_rail::*` or pick focused pieces as needed.
//!
//! # Examples
//!
//! ## Registering Business Codes
//!
//! ```
//! use status_rail::{new_business_code, register_http_status, register_message};
//!
//! let insufficient_funds = new_business_code(-10_001);
//! register_message(-10_001, "insufficient funds");
//! register_http_status(-10_001, 402);
//!
//! assert_eq!(insufficient_funds.message(), "insufficient funds");
//! assert_eq!(insufficient_funds.http_status(), 402);
//! ```
//!
//! ## Building and Canonicalizing Statuses
//!
//! ```
//! use status_rail::prelude::*;
//!
//! let status = Status::new(Code::PERMISSION_DENIED, "tenant 7 may not export");
//! assert_eq!(status.stack_entries().len(), 1);
//!
//! let err: Box<dyn std::error::Error> = Box::new(status.clone());
//! let canonical = cause(Some(err.as_ref()));
//! assert!(Status::ptr_eq(canonical.as_status().unwrap(), &status));
//! assert!(is_error(Some(&canonical)));
//! ```
//!
//! ## Threading Contexts
//!
//! ```
//! use std::time::Duration;
//! use status_rail::prelude::*;
//!
//! let (status, cancel) = Code::UNAVAILABLE.with_timeout(Duration::from_millis(250));
//! assert!(status.context().deadline().is_some());
//! cancel.cancel();
//! assert!(status.context().is_done());
//! ```

/// Bare integer codes and the canonical code set
pub mod code;
/// Cancellable, deadline-bearing context handles
pub mod context;
/// Canonicalization of arbitrary errors
pub mod convert;
/// Status construction macros
pub mod macros;
/// Nil-safe predicates and context helpers
pub mod predicates;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Process-wide code registry
pub mod registry;
/// Call-path capture
pub mod stack;
/// Capability traits
pub mod traits;
/// Status values and detail envelopes
pub mod types;

/// Tower integration - Layer and Service implementations (requires `tower` feature)
#[cfg(feature = "tower")]
pub mod tower;

pub use code::Code;
pub use context::{CancelFunc, Context, ContextError};
pub use convert::{as_int, cause, from_error, parse_string, root_cause, wrap_codes};
pub use predicates::*;
pub use registry::{
    new_business_code, register_code, register_http_status, register_message, register_messages,
    Registry, RegistryConfig, RegistryError,
};
pub use stack::{StackCapture, StackEntry};
pub use traits::Codes;
pub use types::{
    Coded, DebugInfo, DetailMessage, EncodingError, Envelope, ErrorVec, Status, StatusRecord,
};
