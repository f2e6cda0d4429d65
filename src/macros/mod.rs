//! Formatting shorthand for building statuses.
//!
//! - [`macro@crate::errorf`] - builds a [`Status`](crate::types::Status) with a
//!   formatted message, capturing the call site's stack.
//!
//! # Examples
//!
//! ```
//! use status_rail::{errorf, Code};
//!
//! let order_id = 42;
//! let status = errorf!(Code::NOT_FOUND, "order {} not found", order_id);
//!
//! assert_eq!(status.error_text(), "order 42 not found");
//! assert_eq!(status.code(), 5);
//! ```

/// Builds a [`Status`](crate::types::Status) whose message is formatted
/// like [`format!`].
///
/// # Arguments
///
/// * `$code` - The [`Code`](crate::Code) of the status
/// * remaining arguments - format string and arguments
#[macro_export]
macro_rules! errorf {
    ($code:expr, $($arg:tt)+) => {
        $crate::types::Status::formatted($code, format_args!($($arg)+))
    };
}
