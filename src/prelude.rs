//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use status_rail::prelude::*;
//!
//! fn load_order(id: u64) -> StatusResult<String> {
//!     Err(errorf!(Code::NOT_FOUND, "order {} not found", id).into())
//! }
//!
//! let err = load_order(7).unwrap_err();
//! assert!(is_error(Some(&err)));
//! assert_eq!(err.http_status(), 404);
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`errorf!`]
//! - **Types**: [`Code`], [`Status`], [`Coded`], [`Context`]
//! - **Traits**: [`Codes`]
//! - **Functions**: canonicalization and predicates

// Macros
pub use crate::errorf;

// Core types
pub use crate::code::Code;
pub use crate::context::{CancelFunc, Context};
pub use crate::types::{Coded, Status};

// Traits
pub use crate::traits::Codes;

// Functions
pub use crate::convert::{cause, from_error, wrap_codes};
pub use crate::predicates::{equal, equal_error, is_error, is_ok};

/// Result whose error side is a canonical [`Coded`] value.
pub type StatusResult<T> = Result<T, Coded>;
