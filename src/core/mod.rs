//! Annotation scanning engine.
//!
//! Pure and free of I/O: [`PatternSet`] compiles keyword rules once,
//! [`scan`] turns the lines of one document into [`Annotation`]s.

pub mod annotation;
pub mod patterns;
pub mod scanner;
pub mod script;

pub use annotation::Annotation;
pub use patterns::{KeywordRule, KeywordStatus, PatternError, PatternSet};
pub use scanner::{Scanner, scan};
