use serde::{Deserialize, Serialize};

use crate::stack::StackEntry;
use crate::types::DetailMessage;

/// Stack-capture detail: the rendered call path plus a free-text note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugInfo {
    /// Frames rendered as `"{file}:{line} {function}"`, innermost first.
    #[serde(default)]
    pub stack_entries: Vec<String>,
    /// Annotation attached at capture (or merge) time.
    #[serde(default)]
    pub detail: String,
}

impl DebugInfo {
    /// Packs captured frames with `detail`.
    pub fn from_entries<'a, I>(entries: I, detail: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = &'a StackEntry>,
    {
        Self {
            stack_entries: entries.into_iter().map(ToString::to_string).collect(),
            detail: detail.into(),
        }
    }
}

impl DetailMessage for DebugInfo {
    const TYPE_URL: &'static str = "type.googleapis.com/google.rpc.DebugInfo";
}
