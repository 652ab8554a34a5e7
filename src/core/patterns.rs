//! Start and continuation patterns compiled from keyword rules.
//!
//! All keys are folded into one regex alternation, resolved keys first and
//! active keys after, each group in configuration order. The regex engine
//! picks the leftmost alternative that matches, so a specific key such as
//! `question solved` has to be listed before its prefix `question`.

use std::{collections::HashSet, sync::LazyLock};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// A configured keyword: the pattern key searched for and the label shown
/// for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeywordRule {
    pub key: String,
    pub label: String,
}

impl KeywordRule {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Which keyword group an annotation was matched by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordStatus {
    /// Open items (`todo`, `question`, ...).
    Active,
    /// Closed items (`done`, `question solved`, ...).
    Resolved,
}

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("keyword with label \"{label}\" has an empty key")]
    EmptyKey { label: String },

    #[error("keyword \"{key}\" is configured more than once")]
    DuplicateKey { key: String },

    #[error("keyword \"{key}\" is not a valid pattern: {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to compile keyword patterns: {0}")]
    Compile(#[from] regex::Error),
}

// Leading whitespace, a comment marker, the continuation indent, then an
// optional message that starts with a non-space.
static CONTINUATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*%(?P<pfx>[ \t]*)(?P<msg>\S.*)?$").expect("valid continuation regex")
});

#[derive(Debug, Clone)]
struct CompiledRule {
    group: String,
    label: String,
    status: KeywordStatus,
}

/// A successful start-pattern match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartMatch<'a> {
    pub prefix_len: usize,
    pub key: &'a str,
    pub label: &'a str,
    pub status: KeywordStatus,
    pub message: Option<&'a str>,
}

/// A successful continuation-pattern match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContinuationMatch<'a> {
    pub prefix_len: usize,
    pub message: Option<&'a str>,
}

/// Compiled matchers for one set of keyword rules.
///
/// Built once and shared read-only; it is `Send + Sync`.
#[derive(Debug, Clone)]
pub struct PatternSet {
    start: Option<Regex>,
    rules: Vec<CompiledRule>,
}

impl PatternSet {
    /// Compile the active and resolved keyword groups.
    ///
    /// Empty groups are fine; with no keywords at all the start pattern
    /// matches nothing.
    pub fn compile(active: &[KeywordRule], resolved: &[KeywordRule]) -> Result<Self, PatternError> {
        let ordered = resolved
            .iter()
            .map(|rule| (rule, KeywordStatus::Resolved))
            .chain(active.iter().map(|rule| (rule, KeywordStatus::Active)));

        let mut seen = HashSet::new();
        let mut rules = Vec::new();
        let mut alternatives = Vec::new();

        for (index, (rule, status)) in ordered.enumerate() {
            if rule.key.is_empty() {
                return Err(PatternError::EmptyKey {
                    label: rule.label.clone(),
                });
            }
            if !seen.insert(rule.key.as_str()) {
                return Err(PatternError::DuplicateKey {
                    key: rule.key.clone(),
                });
            }
            // Compile each fragment alone first so a syntax error names its key.
            Regex::new(&rule.key).map_err(|source| PatternError::InvalidKey {
                key: rule.key.clone(),
                source,
            })?;

            let group = format!("kw{index}");
            alternatives.push(format!("(?P<{group}>{})", rule.key));
            rules.push(CompiledRule {
                group,
                label: rule.label.clone(),
                status,
            });
        }

        let start = if alternatives.is_empty() {
            None
        } else {
            let pattern = format!(
                r"(?:[^\\]|^)%(?P<pfx>[ \t]*)(?P<key>{})[ \t]*:?[ \t]*(?P<msg>\S.*)?$",
                alternatives.join("|")
            );
            Some(Regex::new(&pattern)?)
        };

        Ok(Self { start, rules })
    }

    /// Number of keyword rules compiled into the start pattern.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Search `line` for an unescaped `%` followed by a keyword.
    pub fn match_start<'a>(&'a self, line: &'a str) -> Option<StartMatch<'a>> {
        let caps = self.start.as_ref()?.captures(line)?;
        let key = caps.name("key")?.as_str();
        let rule = self.rules.iter().find(|rule| caps.name(&rule.group).is_some())?;

        Some(StartMatch {
            prefix_len: prefix_len(&caps),
            key,
            label: &rule.label,
            status: rule.status,
            message: caps.name("msg").map(|m| m.as_str()),
        })
    }

    /// Match `line` as a follow-on comment line; no keyword is required.
    pub fn match_continuation<'a>(&self, line: &'a str) -> Option<ContinuationMatch<'a>> {
        let caps = CONTINUATION_REGEX.captures(line)?;
        Some(ContinuationMatch {
            prefix_len: prefix_len(&caps),
            message: caps.name("msg").map(|m| m.as_str()),
        })
    }
}

// Spaces and tabs are single-byte, so the byte length is the character count.
fn prefix_len(caps: &Captures<'_>) -> usize {
    caps.name("pfx").map_or(0, |m| m.as_str().len())
}
