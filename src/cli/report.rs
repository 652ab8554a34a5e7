//! Report formatting and printing utilities.
//!
//! Kept out of the scanning code so todotex can be used as a library
//! without printing side effects.

use std::{
    borrow::Cow,
    io::{self, Write},
    path::Path,
};

use colored::Colorize;
use serde::Serialize;

use crate::core::{Annotation, KeywordStatus};
use crate::traversal::{DocumentAnnotations, DocumentError};

/// Which fields to print and how.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    pub line_number: bool,
    pub resolved: bool,
    pub label: bool,
    pub message: bool,
    pub absolute_path: bool,
    pub heading: bool,
    pub color: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            line_number: true,
            resolved: true,
            label: true,
            message: true,
            absolute_path: false,
            heading: false,
            color: false,
        }
    }
}

impl ReportOptions {
    fn shows(&self, annotation: &Annotation) -> bool {
        self.resolved || !annotation.is_resolved()
    }

    fn prints_fields(&self) -> bool {
        self.line_number || self.label || self.message
    }

    fn path_text<'a>(&self, path: &'a Path) -> Cow<'a, str> {
        if self.absolute_path
            && let Ok(canonical) = path.canonicalize()
        {
            return Cow::Owned(canonical.to_string_lossy().into_owned());
        }
        path.to_string_lossy()
    }

    fn paint_path(&self, path: &str) -> String {
        if self.color {
            path.purple().to_string()
        } else {
            path.to_string()
        }
    }

    /// The `line:label:message` fields of one annotation.
    fn fields(&self, annotation: &Annotation) -> Vec<String> {
        let mut fields = Vec::with_capacity(3);
        if self.line_number {
            let line = annotation.line.to_string();
            fields.push(if self.color {
                line.green().to_string()
            } else {
                line
            });
        }
        if self.label {
            fields.push(if self.color {
                annotation.label.bold().red().to_string()
            } else {
                annotation.label.clone()
            });
        }
        if self.message
            && let Some(message) = &annotation.message
        {
            fields.push(message.clone());
        }
        fields
    }
}

/// Line writer that never emits leading or trailing empty lines.
///
/// Empty lines after the first non-empty one are held back and only written
/// once another non-empty line follows.
struct TrimmedLines<'w, W: Write> {
    writer: &'w mut W,
    started: bool,
    pending_empty: usize,
}

impl<'w, W: Write> TrimmedLines<'w, W> {
    fn new(writer: &'w mut W) -> Self {
        Self {
            writer,
            started: false,
            pending_empty: 0,
        }
    }

    fn line(&mut self, line: &str) -> io::Result<()> {
        if line.is_empty() {
            if self.started {
                self.pending_empty += 1;
            }
            return Ok(());
        }
        for _ in 0..self.pending_empty {
            writeln!(self.writer)?;
        }
        self.pending_empty = 0;
        self.started = true;
        writeln!(self.writer, "{}", line)
    }
}

/// Write annotations as text.
///
/// With `heading`, each file name is printed on its own line above its
/// annotations; otherwise it prefixes every annotation line. Empty rows at
/// the start or end of the output are dropped.
pub fn write_text<W: Write>(
    documents: &[DocumentAnnotations],
    options: &ReportOptions,
    writer: &mut W,
) -> io::Result<()> {
    let mut out = TrimmedLines::new(writer);
    for doc in documents {
        let path = doc
            .path
            .as_deref()
            .map(|p| options.paint_path(&options.path_text(p)));
        let shown = doc.annotations.iter().filter(|a| options.shows(a));

        if options.heading {
            if let Some(path) = &path {
                out.line(path)?;
            }
            if options.prints_fields() {
                for annotation in shown {
                    out.line(&options.fields(annotation).join(":"))?;
                }
            }
            continue;
        }

        for annotation in shown {
            let mut fields = Vec::new();
            if let Some(path) = &path {
                fields.push(path.clone());
            }
            fields.extend(options.fields(annotation));
            if !fields.is_empty() {
                out.line(&fields.join(":"))?;
            }
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct JsonAnnotation<'a> {
    file: Option<Cow<'a, str>>,
    line: usize,
    key: &'a str,
    label: &'a str,
    status: KeywordStatus,
    message: Option<&'a str>,
}

/// Write annotations as a JSON array.
pub fn write_json<W: Write>(
    documents: &[DocumentAnnotations],
    options: &ReportOptions,
    writer: &mut W,
) -> io::Result<()> {
    let entries: Vec<JsonAnnotation<'_>> = documents
        .iter()
        .flat_map(|doc| {
            doc.annotations
                .iter()
                .filter(move |a| options.shows(a))
                .map(move |a| JsonAnnotation {
                    file: doc.path.as_deref().map(|p| options.path_text(p)),
                    line: a.line,
                    key: &a.key,
                    label: &a.label,
                    status: a.status,
                    message: a.message.as_deref(),
                })
        })
        .collect();

    serde_json::to_writer_pretty(&mut *writer, &entries)?;
    writeln!(writer)
}

/// Print per-document errors to stderr.
///
/// Without `verbose` only a one-line summary is shown.
pub fn print_document_errors(errors: &[DocumentError], verbose: bool) {
    if errors.is_empty() {
        return;
    }
    if verbose {
        for error in errors {
            eprintln!("{} {}", "warning:".bold().yellow(), error);
        }
    } else {
        eprintln!(
            "{} {} document(s) could not be read (use {} for details)",
            "warning:".bold().yellow(),
            errors.len(),
            "-v".cyan()
        );
    }
}
