//! Bare integer status codes.
//!
//! A [`Code`] is the lightweight half of the status model: a `Copy` integer
//! whose message and HTTP mapping are resolved through the [`Registry`] on
//! demand. It carries no details and no context of its own; the context
//! derivation methods of [`Codes`](crate::traits::Codes) promote it to a
//! [`Status`](crate::types::Status) first.
//!
//! # Examples
//!
//! ```
//! use status_rail::Code;
//!
//! assert_eq!(Code::NOT_FOUND.http_status(), 404);
//! assert_eq!(Code::new(987_654).message(), "987654");
//! assert_eq!(Code::new(987_654).error_text(), "987654");
//! ```

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::registry::Registry;

/// An integer status code.
///
/// Negative values are reserved for business codes; `0..=16` follow the
/// canonical RPC numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Code(i32);

impl Code {
    /// Not an error; returned on success.
    pub const OK: Code = Code(0);
    /// The operation was cancelled, typically by the caller.
    pub const CANCELLED: Code = Code(1);
    /// Unknown error, e.g. a status from an unknown error space.
    pub const UNKNOWN: Code = Code(2);
    /// The client specified an invalid argument.
    pub const INVALID_ARGUMENT: Code = Code(3);
    /// The deadline expired before the operation could complete.
    pub const DEADLINE_EXCEEDED: Code = Code(4);
    /// Some requested entity was not found.
    pub const NOT_FOUND: Code = Code(5);
    /// The entity a client attempted to create already exists.
    pub const ALREADY_EXISTS: Code = Code(6);
    /// The caller lacks permission for the operation.
    pub const PERMISSION_DENIED: Code = Code(7);
    /// Some resource (quota, disk) has been exhausted.
    pub const RESOURCE_EXHAUSTED: Code = Code(8);
    /// The system is not in a state required for the operation.
    pub const FAILED_PRECONDITION: Code = Code(9);
    /// The operation was aborted, typically by a concurrency conflict.
    pub const ABORTED: Code = Code(10);
    /// The operation was attempted past the valid range.
    pub const OUT_OF_RANGE: Code = Code(11);
    /// The operation is not implemented or not enabled.
    pub const UNIMPLEMENTED: Code = Code(12);
    /// An internal invariant was broken.
    pub const INTERNAL: Code = Code(13);
    /// The service is currently unavailable.
    pub const UNAVAILABLE: Code = Code(14);
    /// Unrecoverable data loss or corruption.
    pub const DATA_LOSS: Code = Code(15);
    /// The request lacks valid authentication credentials.
    pub const UNAUTHENTICATED: Code = Code(16);

    /// Wraps any integer without validation or registration.
    #[inline]
    pub const fn new(code: i32) -> Self {
        Self(code)
    }

    /// Returns the integer value.
    #[inline]
    pub const fn code(self) -> i32 {
        self.0
    }

    /// Returns `true` for negative (business) codes.
    #[inline]
    pub const fn is_business(self) -> bool {
        self.0 < 0
    }

    /// Registered message in the global registry, or the decimal code.
    #[inline]
    pub fn message(self) -> String {
        self.message_in(Registry::global())
    }

    /// Registered message in `registry`, or the decimal code.
    pub fn message_in(self, registry: &Registry) -> String {
        registry.message(self.0).unwrap_or_else(|| self.0.to_string())
    }

    /// Same value as [`Code::message`].
    #[inline]
    pub fn error_text(self) -> String {
        self.message()
    }

    /// Registered HTTP status in the global registry, or the configured default.
    #[inline]
    pub fn http_status(self) -> u16 {
        self.http_status_in(Registry::global())
    }

    /// Registered HTTP status in `registry`, or its configured default.
    pub fn http_status_in(self, registry: &Registry) -> u16 {
        registry
            .http_status(self.0)
            .unwrap_or(registry.config().default_http_status)
    }
}

impl From<i32> for Code {
    #[inline]
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl From<Code> for i32 {
    #[inline]
    fn from(code: Code) -> Self {
        code.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error_text())
    }
}

impl std::error::Error for Code {}

/// The canonical system codes with their HTTP mapping and message.
pub(crate) const CANONICAL_CODES: [(Code, u16, &str); 17] = [
    (Code::OK, 200, ""),
    (Code::CANCELLED, 499, "已取消"),
    (Code::UNKNOWN, 500, "未知错误"),
    (Code::INVALID_ARGUMENT, 400, "非法输入"),
    (Code::DEADLINE_EXCEEDED, 504, "超时错误"),
    (Code::NOT_FOUND, 404, "没找到对象"),
    (Code::ALREADY_EXISTS, 409, "已经存在"),
    (Code::PERMISSION_DENIED, 403, "权限错误"),
    (Code::RESOURCE_EXHAUSTED, 429, "资源耗尽"),
    (Code::FAILED_PRECONDITION, 400, "非预期状态"),
    (Code::ABORTED, 409, "访问拒绝"),
    (Code::OUT_OF_RANGE, 400, "超出范围"),
    (Code::UNIMPLEMENTED, 501, "没有实现"),
    (Code::INTERNAL, 500, "内部错误"),
    (Code::UNAVAILABLE, 503, "不可用"),
    (Code::DATA_LOSS, 500, "数据丢失"),
    (Code::UNAUTHENTICATED, 401, "未通过身份验证"),
];
