//! Status values and the detail envelopes they carry.
//!
//! - [`Status`] / [`StatusRecord`]: the rich error value and its wire form.
//! - [`Coded`]: the closed sum of a bare [`Code`](crate::Code) and a [`Status`].
//! - [`Envelope`] / [`DetailMessage`]: opaque, self-describing details.
//! - [`DebugInfo`]: the stack-capture detail.
//!
//! # Examples
//!
//! ```
//! use status_rail::types::{DebugInfo, Envelope};
//!
//! let info = DebugInfo { stack_entries: vec!["src/lib.rs:1 demo".into()], detail: "boot".into() };
//! let envelope = Envelope::pack(&info).unwrap();
//!
//! assert!(envelope.is::<DebugInfo>());
//! assert_eq!(envelope.unpack::<DebugInfo>().unwrap(), Some(info));
//! ```
use smallvec::SmallVec;

pub mod coded;
pub mod debug_info;
pub mod envelope;
pub mod status;

pub use coded::Coded;
pub use debug_info::DebugInfo;
pub use envelope::{DetailMessage, EncodingError, Envelope};
pub use status::{Status, StatusRecord};

/// SmallVec-backed collection used for detail envelopes.
///
/// Most statuses carry exactly one envelope (their own stack capture), so a
/// single inline slot avoids a heap allocation in the common case.
pub type ErrorVec<E> = SmallVec<[E; 1]>;
