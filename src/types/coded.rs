use core::fmt;

use crate::code::Code;
use crate::context::Context;
use crate::traits::Codes;
use crate::types::{DebugInfo, Envelope, Status};

/// A canonical error value: either a bare [`Code`] or a rich [`Status`].
///
/// Canonicalization helpers such as [`cause`](crate::convert::cause) and
/// [`from_error`](crate::convert::from_error) always produce one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Coded {
    /// A bare code; message and HTTP mapping come from the registry.
    Code(Code),
    /// A status with its own message, details and context.
    Status(Status),
}

impl Coded {
    /// Borrows the status variant.
    #[inline]
    pub fn as_status(&self) -> Option<&Status> {
        match self {
            Self::Status(status) => Some(status),
            Self::Code(_) => None,
        }
    }

    /// Returns `true` for the bare code variant.
    #[inline]
    pub fn is_bare_code(&self) -> bool {
        matches!(self, Self::Code(_))
    }

    /// Returns the code, dropping any status payload.
    #[inline]
    pub fn as_code(&self) -> Code {
        Code::new(self.code())
    }

    #[inline]
    fn as_dyn(&self) -> &dyn Codes {
        match self {
            Self::Code(code) => code,
            Self::Status(status) => status,
        }
    }
}

impl Codes for Coded {
    #[inline]
    fn code(&self) -> i32 {
        self.as_dyn().code()
    }

    #[inline]
    fn message(&self) -> String {
        self.as_dyn().message()
    }

    #[inline]
    fn error_text(&self) -> String {
        self.as_dyn().error_text()
    }

    #[inline]
    fn details(&self) -> &[Envelope] {
        match self {
            Self::Code(_) => &[],
            Self::Status(status) => status.details(),
        }
    }

    #[inline]
    fn http_status(&self) -> u16 {
        self.as_dyn().http_status()
    }

    #[inline]
    fn stack_entries(&self) -> Vec<DebugInfo> {
        self.as_dyn().stack_entries()
    }

    #[inline]
    fn context(&self) -> Context {
        self.as_dyn().context()
    }

    #[inline]
    fn to_status(&self) -> Status {
        self.as_dyn().to_status()
    }
}

impl fmt::Display for Coded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => fmt::Display::fmt(code, f),
            Self::Status(status) => fmt::Display::fmt(status, f),
        }
    }
}

impl std::error::Error for Coded {}

impl From<Code> for Coded {
    #[inline]
    fn from(code: Code) -> Self {
        Self::Code(code)
    }
}

impl From<Status> for Coded {
    #[inline]
    fn from(status: Status) -> Self {
        Self::Status(status)
    }
}

impl PartialEq<Code> for Coded {
    /// Compares by integer code only.
    fn eq(&self, other: &Code) -> bool {
        self.code() == other.code()
    }
}
