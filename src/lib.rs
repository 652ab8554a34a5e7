//! todotex - list TODO and DONE annotations in TeX comments
//!
//! todotex finds comments such as `% todo cite this` or `% question solved`
//! in TeX documents and reports where they are and what they say. Keywords
//! and their labels come from a TOML configuration.
//!
//! ## Module Structure
//!
//! - `core`: Pattern compilation and the line scanner (pure, no I/O)
//! - `traversal`: Finding, decoding and scanning documents in parallel
//! - `config`: Keyword configuration loading
//! - `cli`: Command-line interface and reporters

pub mod cli;
pub mod config;
pub mod core;
pub mod traversal;
