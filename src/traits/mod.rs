//! Capability traits.
//!
//! - [`Codes`]: the error capability surface (code, messages, details, HTTP
//!   mapping, stack entries and context derivation) implemented by
//!   [`Code`](crate::Code), [`Status`](crate::types::Status) and
//!   [`Coded`](crate::types::Coded).
//!
//! # Examples
//!
//! ```
//! use status_rail::traits::Codes;
//! use status_rail::Code;
//!
//! fn describe(codes: &dyn Codes) -> String {
//!     format!("{} ({})", codes.code(), codes.http_status())
//! }
//!
//! assert_eq!(describe(&Code::UNAVAILABLE), "14 (503)");
//! ```

pub mod codes;

pub use codes::Codes;
