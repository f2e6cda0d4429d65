//! Process-wide code registry.
//!
//! The registry owns three independent tables:
//!
//! - code identity (once-only registration),
//! - human messages (last write wins),
//! - HTTP status mappings (last write wins).
//!
//! Each table sits behind its own [`RwLock`]; a writer locks only the table
//! it touches.
//!
//! # Examples
//!
//! ```
//! use status_rail::{Code, Registry, RegistryConfig};
//!
//! let registry = Registry::new(RegistryConfig::default());
//! let code = registry.register(-4001, 409, "order already paid");
//!
//! assert_eq!(code.message_in(&registry), "order already paid");
//! assert_eq!(code.http_status_in(&registry), 409);
//! assert!(registry.contains(-4001));
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::code::{Code, CANONICAL_CODES};

/// Fallback HTTP status for codes without a registered mapping.
pub const DEFAULT_HTTP_STATUS: u16 = 200;

/// Default bound on the number of frames recorded per stack capture.
pub const DEFAULT_MAX_STACK_DEPTH: usize = 64;

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// Tunables applied to a [`Registry`] and to statuses built against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// HTTP status reported for codes that have no registered mapping.
    pub default_http_status: u16,
    /// Maximum number of frames kept by a single stack capture.
    pub max_stack_depth: usize,
    /// When `false`, statuses are built without stack entries.
    pub capture_stacks: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_http_status: DEFAULT_HTTP_STATUS,
            max_stack_depth: DEFAULT_MAX_STACK_DEPTH,
            capture_stacks: true,
        }
    }
}

impl RegistryConfig {
    /// Sets the HTTP status used when a code has no registered mapping.
    #[inline]
    pub fn with_default_http_status(mut self, status: u16) -> Self {
        self.default_http_status = status;
        self
    }

    /// Sets the maximum number of frames kept per capture.
    #[inline]
    pub fn with_max_stack_depth(mut self, depth: usize) -> Self {
        self.max_stack_depth = depth;
        self
    }

    /// Enables or disables stack capture on status construction.
    #[inline]
    pub fn with_capture_stacks(mut self, enabled: bool) -> Self {
        self.capture_stacks = enabled;
        self
    }
}

/// Recoverable view of the registry's programmer-error conditions.
///
/// The panicking registration paths format exactly these messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The code was already registered.
    Duplicate(i32),
    /// A business code must be strictly negative.
    NotBusinessCode(i32),
    /// [`Registry::init`] was called after the global registry was built.
    AlreadyInitialized,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate(code) => write!(f, "code {} already registered", code),
            Self::NotBusinessCode(code) => {
                write!(f, "business code must be negative, got {}", code)
            },
            Self::AlreadyInitialized => f.write_str("global registry already initialized"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Code, message and HTTP status tables guarded by independent locks.
#[derive(Debug, Default)]
pub struct Registry {
    config: RegistryConfig,
    codes: RwLock<HashSet<i32>>,
    messages: RwLock<HashMap<i32, String>>,
    http_statuses: RwLock<HashMap<i32, u16>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            codes: RwLock::default(),
            messages: RwLock::default(),
            http_statuses: RwLock::default(),
        }
    }

    /// Creates a registry pre-populated with the canonical code set.
    pub fn with_canonical_codes(config: RegistryConfig) -> Self {
        let registry = Self::new(config);
        for &(code, http_status, message) in CANONICAL_CODES.iter() {
            registry.register(code.code(), http_status, message);
        }
        registry
    }

    /// Returns the process-wide registry, building it with the default
    /// configuration and the canonical codes on first use.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(|| Registry::with_canonical_codes(RegistryConfig::default()))
    }

    /// Installs the process-wide registry with a custom configuration.
    ///
    /// Must run before anything touches [`Registry::global`].
    pub fn init(config: RegistryConfig) -> Result<&'static Registry, RegistryError> {
        let mut installed = false;
        let registry = GLOBAL.get_or_init(|| {
            installed = true;
            Registry::with_canonical_codes(config)
        });
        if installed {
            tracing::debug!(config = ?registry.config, "global status registry initialized");
            Ok(registry)
        } else {
            Err(RegistryError::AlreadyInitialized)
        }
    }

    /// Returns the configuration this registry was built with.
    #[inline]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Registers a code identity, failing if it already exists.
    pub fn try_register_code(&self, code: i32) -> Result<Code, RegistryError> {
        let mut codes = write(&self.codes);
        if !codes.insert(code) {
            return Err(RegistryError::Duplicate(code));
        }
        tracing::debug!(code, "registered status code");
        Ok(Code::new(code))
    }

    /// Registers a code identity.
    ///
    /// # Panics
    ///
    /// Panics if `code` is already registered.
    pub fn register_code(&self, code: i32) -> Code {
        match self.try_register_code(code) {
            Ok(code) => code,
            Err(err) => panic!("{}", err),
        }
    }

    /// Validates and registers a business code.
    pub fn try_new_business_code(&self, code: i32) -> Result<Code, RegistryError> {
        if code >= 0 {
            return Err(RegistryError::NotBusinessCode(code));
        }
        self.try_register_code(code)
    }

    /// Validates and registers a business code.
    ///
    /// # Panics
    ///
    /// Panics if `code` is not negative or is already registered.
    pub fn new_business_code(&self, code: i32) -> Code {
        match self.try_new_business_code(code) {
            Ok(code) => code,
            Err(err) => panic!("{}", err),
        }
    }

    /// Registers a business code together with its HTTP status and message.
    ///
    /// # Panics
    ///
    /// Same conditions as [`Registry::new_business_code`].
    pub fn register_business_code(&self, code: i32, http_status: u16, message: &str) -> Code {
        if code >= 0 {
            panic!("{}", RegistryError::NotBusinessCode(code));
        }
        self.register(code, http_status, message)
    }

    /// Registers message, HTTP status and code identity in one call.
    ///
    /// # Panics
    ///
    /// Panics if `code` is already registered; its existing message and
    /// HTTP mapping are left untouched.
    pub fn register(&self, code: i32, http_status: u16, message: &str) -> Code {
        let code = self.register_code(code);
        self.register_message(code.code(), message);
        self.register_http_status(code.code(), http_status);
        code
    }

    /// Sets the message for `code`, replacing any previous one.
    pub fn register_message(&self, code: i32, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(code, %message, "registered status message");
        write(&self.messages).insert(code, message);
    }

    /// Sets many messages under a single lock acquisition.
    pub fn register_messages<I, S>(&self, messages: I)
    where
        I: IntoIterator<Item = (i32, S)>,
        S: Into<String>,
    {
        let mut table = write(&self.messages);
        for (code, message) in messages {
            table.insert(code, message.into());
        }
        tracing::debug!(total = table.len(), "registered status messages");
    }

    /// Sets the HTTP status for `code`, replacing any previous one.
    pub fn register_http_status(&self, code: i32, http_status: u16) {
        tracing::debug!(code, http_status, "registered status http mapping");
        write(&self.http_statuses).insert(code, http_status);
    }

    /// Looks up the registered message for `code`.
    pub fn message(&self, code: i32) -> Option<String> {
        read(&self.messages).get(&code).cloned()
    }

    /// Looks up the registered HTTP status for `code`.
    pub fn http_status(&self, code: i32) -> Option<u16> {
        read(&self.http_statuses).get(&code).copied()
    }

    /// Returns `true` if the code identity has been registered.
    pub fn contains(&self, code: i32) -> bool {
        read(&self.codes).contains(&code)
    }
}

// A panicking writer cannot leave a half-inserted entry in a HashMap, so the
// tables stay usable after poisoning.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Registers a code identity in the global registry.
///
/// # Panics
///
/// Panics if the code is already registered.
#[inline]
pub fn register_code(code: i32) -> Code {
    Registry::global().register_code(code)
}

/// Registers a negative business code in the global registry.
///
/// # Panics
///
/// Panics if `code >= 0` or the code is already registered.
#[inline]
pub fn new_business_code(code: i32) -> Code {
    Registry::global().new_business_code(code)
}

/// Sets a message in the global registry.
#[inline]
pub fn register_message(code: i32, message: impl Into<String>) {
    Registry::global().register_message(code, message)
}

/// Sets many messages in the global registry.
#[inline]
pub fn register_messages<I, S>(messages: I)
where
    I: IntoIterator<Item = (i32, S)>,
    S: Into<String>,
{
    Registry::global().register_messages(messages)
}

/// Sets an HTTP status mapping in the global registry.
#[inline]
pub fn register_http_status(code: i32, http_status: u16) {
    Registry::global().register_http_status(code, http_status)
}
