use serde::Serialize;

use super::patterns::{ContinuationMatch, KeywordStatus, StartMatch};
use super::script::join_fragments;

/// One keyword annotation found in a document comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// 1-based line of the keyword; continuation lines do not move it.
    pub line: usize,
    /// Whitespace between the comment marker and the keyword.
    pub prefix_len: usize,
    /// The text the keyword pattern matched (not the label).
    pub key: String,
    pub label: String,
    pub status: KeywordStatus,
    pub message: Option<String>,
}

impl Annotation {
    pub fn from_start(line: usize, m: &StartMatch<'_>) -> Self {
        Self {
            line,
            prefix_len: m.prefix_len,
            key: m.key.to_string(),
            label: m.label.to_string(),
            status: m.status,
            message: m.message.map(str::to_string),
        }
    }

    /// Whether `m` is indented deeper than this annotation's keyword and so
    /// may extend its message.
    pub fn accepts(&self, m: &ContinuationMatch<'_>) -> bool {
        m.prefix_len > self.prefix_len
    }

    /// Append a continuation line's message.
    pub fn extend(&mut self, m: &ContinuationMatch<'_>) {
        let head = self.message.as_deref().unwrap_or("");
        let tail = m.message.unwrap_or("");
        let joined = join_fragments(head, tail);
        self.message = (!joined.is_empty()).then_some(joined);
    }

    pub fn is_resolved(&self) -> bool {
        self.status == KeywordStatus::Resolved
    }
}
