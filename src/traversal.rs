//! Document discovery, decoding and parallel scanning.
//!
//! Turns command-line paths into TeX documents, decodes each one with the
//! configured encoding and hands its lines to the [`scan`] engine. A
//! document that cannot be read is reported in [`ScanReport::errors`] and
//! never stops the others from being scanned.

use std::{
    borrow::Cow,
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use encoding_rs::{Encoding, UTF_8};
use glob::glob;
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::core::{Annotation, PatternSet, scan};

pub const DEFAULT_EXTENSION: &str = "tex";

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("{}: no such file or directory", path.display())]
    NotFound { path: PathBuf },

    #[error("{}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    #[error("{}: {source}", display_path(path.as_deref()))]
    Read {
        path: Option<PathBuf>,
        #[source]
        source: io::Error,
    },

    #[error("{}: invalid {encoding} text", display_path(path.as_deref()))]
    Decode {
        path: Option<PathBuf>,
        encoding: &'static str,
    },
}

fn display_path(path: Option<&Path>) -> Cow<'_, str> {
    match path {
        Some(path) => path.to_string_lossy(),
        None => Cow::Borrowed("<stdin>"),
    }
}

/// Which files a directory argument expands to.
#[derive(Debug, Clone)]
pub struct TraversalOptions {
    /// Descend into subdirectories instead of listing direct children only.
    pub recursive: bool,
    /// Accepted file extensions, without the leading dot.
    pub extensions: Vec<String>,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            recursive: false,
            extensions: vec![DEFAULT_EXTENSION.to_string()],
        }
    }
}

impl TraversalOptions {
    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }
}

/// Result of resolving input paths to documents.
#[derive(Debug, Default)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    pub errors: Vec<DocumentError>,
}

fn is_glob_pattern(path: &str) -> bool {
    path.contains(['*', '?', '['])
}

/// Resolve `paths` to the documents to scan, in argument order.
///
/// Files are kept when their extension is accepted; directories expand to
/// the accepted files below them, sorted by name. An argument that does not
/// exist but contains wildcards is expanded as a glob.
pub fn discover(paths: &[PathBuf], options: &TraversalOptions) -> Discovery {
    let mut discovery = Discovery::default();

    for path in paths {
        if path.exists() {
            collect_path(path, options, &mut discovery);
            continue;
        }

        let pattern = path.to_string_lossy();
        if !is_glob_pattern(&pattern) {
            discovery.errors.push(DocumentError::NotFound { path: path.clone() });
            continue;
        }
        match glob(&pattern) {
            Ok(entries) => {
                for entry in entries {
                    match entry {
                        Ok(found) => collect_path(&found, options, &mut discovery),
                        Err(e) => discovery.errors.push(DocumentError::Walk {
                            path: e.path().to_path_buf(),
                            message: e.error().to_string(),
                        }),
                    }
                }
            }
            Err(e) => discovery.errors.push(DocumentError::Walk {
                path: path.clone(),
                message: format!("invalid pattern: {}", e.msg),
            }),
        }
    }

    discovery
}

fn collect_path(path: &Path, options: &TraversalOptions, discovery: &mut Discovery) {
    if path.is_file() {
        if options.accepts(path) {
            discovery.files.push(path.to_path_buf());
        }
        return;
    }

    let mut walker = WalkDir::new(path).min_depth(1).sort_by_file_name();
    if !options.recursive {
        walker = walker.max_depth(1);
    }

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                discovery.errors.push(DocumentError::Walk {
                    path: e.path().unwrap_or(path).to_path_buf(),
                    message: e.to_string(),
                });
                continue;
            }
        };
        let child = entry.path();
        if child.is_file() && options.accepts(child) {
            discovery.files.push(child.to_path_buf());
        }
    }
}

/// Look up an encoding by its WHATWG label (`utf-8`, `gbk`, `shift_jis`, ...).
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

/// Decode a whole document. A byte order mark overrides `encoding`; malformed
/// input is an error rather than being replaced.
pub fn decode<'a>(bytes: &'a [u8], encoding: &'static Encoding) -> Option<Cow<'a, str>> {
    let (encoding, bom_len) = Encoding::for_bom(bytes).unwrap_or((encoding, 0));
    encoding.decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
}

/// Settings shared by every document of one run.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub allow_continuation: bool,
    pub encoding: &'static Encoding,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            allow_continuation: false,
            encoding: UTF_8,
        }
    }
}

/// Annotations of one document. `path` is `None` for standard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentAnnotations {
    pub path: Option<PathBuf>,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Default)]
pub struct ScanReport {
    /// Documents with at least one annotation, in input order.
    pub documents: Vec<DocumentAnnotations>,
    pub errors: Vec<DocumentError>,
    pub documents_scanned: usize,
}

impl ScanReport {
    pub fn annotation_count(&self) -> usize {
        self.documents.iter().map(|d| d.annotations.len()).sum()
    }

    fn push(&mut self, result: Result<DocumentAnnotations, DocumentError>) {
        match result {
            Ok(doc) => {
                self.documents_scanned += 1;
                if !doc.annotations.is_empty() {
                    self.documents.push(doc);
                }
            }
            Err(e) => self.errors.push(e),
        }
    }
}

/// Split on `\n`, `\r\n` and a lone `\r`. A final line ending does not
/// produce an extra empty line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let (line, tail) = match rest.find(['\r', '\n']) {
            Some(i) => {
                let end = if rest[i..].starts_with("\r\n") { i + 2 } else { i + 1 };
                (&rest[..i], &rest[end..])
            }
            None => (rest, ""),
        };
        rest = tail;
        Some(line)
    })
}

fn scan_text(
    path: Option<PathBuf>,
    bytes: &[u8],
    options: &ScanOptions,
    patterns: &PatternSet,
) -> Result<DocumentAnnotations, DocumentError> {
    let text = decode(bytes, options.encoding).ok_or_else(|| DocumentError::Decode {
        path: path.clone(),
        encoding: options.encoding.name(),
    })?;
    let annotations = scan(split_lines(&text), options.allow_continuation, patterns);
    Ok(DocumentAnnotations { path, annotations })
}

fn scan_file(
    path: &Path,
    options: &ScanOptions,
    patterns: &PatternSet,
) -> Result<DocumentAnnotations, DocumentError> {
    let bytes = fs::read(path).map_err(|source| DocumentError::Read {
        path: Some(path.to_path_buf()),
        source,
    })?;
    scan_text(Some(path.to_path_buf()), &bytes, options, patterns)
}

/// Scan `files` in parallel, keeping their order in the report.
pub fn scan_paths(files: &[PathBuf], options: &ScanOptions, patterns: &PatternSet) -> ScanReport {
    let results: Vec<_> = files
        .par_iter()
        .map(|path| scan_file(path, options, patterns))
        .collect();

    let mut report = ScanReport::default();
    for result in results {
        report.push(result);
    }
    report
}

/// Scan a single unnamed stream such as standard input.
pub fn scan_reader<R: Read>(
    mut reader: R,
    options: &ScanOptions,
    patterns: &PatternSet,
) -> ScanReport {
    let mut bytes = Vec::new();
    let result = match reader.read_to_end(&mut bytes) {
        Ok(_) => scan_text(None, &bytes, options, patterns),
        Err(source) => Err(DocumentError::Read { path: None, source }),
    };

    let mut report = ScanReport::default();
    report.push(result);
    report
}
