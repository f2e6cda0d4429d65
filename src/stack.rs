//! Call-path capture for status construction.
//!
//! Frames are taken from [`std::backtrace::Backtrace::force_capture`], which
//! ignores `RUST_BACKTRACE` so statuses are traceable regardless of the
//! environment. Frames belonging to the backtrace machinery and to this
//! crate's own constructors are dropped, so a capture starts at the caller
//! that built the status.
//!
//! Crate frames are recognized by their qualified symbol. Builds that keep
//! only line tables report bare function names (`capture`, `new<&str>`);
//! those frames are recognized by their source file instead.

use core::fmt;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::path::Path;
use std::sync::Once;

use crate::registry::RegistryConfig;

/// One frame of a captured call path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackEntry {
    /// Source file, or `<unknown>` when debug info is unavailable.
    pub file: String,
    /// Source line, `0` when unknown.
    pub line: u32,
    /// Demangled symbol name.
    pub function: String,
}

impl fmt::Display for StackEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {}", self.file, self.line, self.function)
    }
}

/// Captures the current call path, bounded by `max_depth` frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackCapture {
    max_depth: usize,
}

impl StackCapture {
    /// Creates a capture bounded by `max_depth` frames.
    #[inline]
    pub const fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Creates a capture using the registry configuration's bound.
    #[inline]
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.max_stack_depth)
    }

    /// Returns the frame bound.
    #[inline]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Walks the stack from the first frame outside this crate, skipping
    /// `skip` further frames.
    ///
    /// Returns an empty path on platforms without backtrace support.
    pub fn capture(&self, skip: usize) -> Vec<StackEntry> {
        let backtrace = Backtrace::force_capture();
        if backtrace.status() != BacktraceStatus::Captured {
            static UNSUPPORTED: Once = Once::new();
            UNSUPPORTED.call_once(|| {
                tracing::warn!("stack capture unsupported on this platform; statuses carry no frames");
            });
            return Vec::new();
        }

        let cwd = std::env::current_dir().ok();
        parse_frames(&backtrace.to_string())
            .into_iter()
            .skip_while(|entry| is_internal(entry, cwd.as_deref()))
            .skip(skip)
            .take(self.max_depth)
            .collect()
    }
}

impl Default for StackCapture {
    fn default() -> Self {
        Self::from_config(&RegistryConfig::default())
    }
}

/// Parses the rendered form of a backtrace into frames.
///
/// Frame headers look like `  3: some::function` and are optionally followed
/// by an `at path/to/file.rs:12:5` line.
pub(crate) fn parse_frames(rendered: &str) -> Vec<StackEntry> {
    let mut frames: Vec<StackEntry> = Vec::new();
    let mut located = false;

    for line in rendered.lines() {
        let line = line.trim();
        if let Some(location) = line.strip_prefix("at ") {
            if let (Some(frame), false) = (frames.last_mut(), located) {
                let (file, number) = split_location(location);
                frame.file = file.to_string();
                frame.line = number;
                located = true;
            }
            continue;
        }

        let Some((index, symbol)) = line.split_once(": ") else {
            continue;
        };
        if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        frames.push(StackEntry {
            file: "<unknown>".into(),
            line: 0,
            function: strip_hash(symbol.trim()).to_string(),
        });
        located = false;
    }

    frames
}

// `path:line:column`, where the path itself may contain colons.
fn split_location(location: &str) -> (&str, u32) {
    let mut parts = location.rsplitn(3, ':');
    let last = parts.next().unwrap_or_default();
    let middle = parts.next();
    let head = parts.next();

    match (head, middle) {
        (Some(file), Some(line)) => match line.parse() {
            Ok(line) => (file, line),
            Err(_) => (location, 0),
        },
        (None, Some(file)) => (file, last.parse().unwrap_or(0)),
        _ => (location, 0),
    }
}

fn strip_hash(symbol: &str) -> &str {
    match symbol.rsplit_once("::h") {
        Some((head, hash)) if hash.len() == 16 && hash.bytes().all(|b| b.is_ascii_hexdigit()) => head,
        _ => symbol,
    }
}

// Files whose functions build statuses and so sit above the caller's frame.
const CAPTURING_SOURCES: [&str; 4] =
    ["src/stack.rs", "src/types/status.rs", "src/convert/mod.rs", "src/tower.rs"];

// Relative frame locations are resolved against `cwd`.
fn is_internal(entry: &StackEntry, cwd: Option<&Path>) -> bool {
    let symbol = entry.function.trim_start_matches('<');
    if symbol.starts_with("std::backtrace") || symbol.starts_with("backtrace::") {
        return true;
    }
    match crate_segment(symbol) {
        Some(krate) => krate == env!("CARGO_CRATE_NAME") && !symbol.contains("::tests::"),
        None => is_capturing_source(&entry.file, cwd),
    }
}

// Leading path segment of a qualified symbol; `None` for bare names.
fn crate_segment(symbol: &str) -> Option<&str> {
    let (head, _) = symbol.split_once("::")?;
    let plain = !head.is_empty() && head.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    plain.then_some(head)
}

fn is_capturing_source(file: &str, cwd: Option<&Path>) -> bool {
    let path = Path::new(file);
    let resolved = match cwd {
        Some(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    };
    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    CAPTURING_SOURCES.iter().any(|source| resolved == root.join(source))
}
