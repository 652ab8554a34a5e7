//! Line-by-line annotation scanner.
//!
//! With continuation enabled, a keyed comment line stays open and absorbs
//! each following comment line that is indented deeper than the keyword
//! itself:
//!
//! ```text
//! Some text. % todo cite the original
//!            %      paper and the erratum
//! ```
//!
//! The first line that is not such a continuation closes the annotation and
//! is then checked as a possible start of a new one.

use super::annotation::Annotation;
use super::patterns::PatternSet;

/// Incremental scanner over the lines of one document.
pub struct Scanner<'p> {
    patterns: &'p PatternSet,
    allow_continuation: bool,
    line_no: usize,
    open: Option<Annotation>,
    finished: Vec<Annotation>,
}

impl<'p> Scanner<'p> {
    pub fn new(patterns: &'p PatternSet, allow_continuation: bool) -> Self {
        Self {
            patterns,
            allow_continuation,
            line_no: 0,
            open: None,
            finished: Vec::new(),
        }
    }

    /// Feed the next line. A trailing `\n` or `\r\n` is ignored.
    pub fn push_line(&mut self, line: &str) {
        self.line_no += 1;
        let line = strip_line_ending(line);

        if let Some(mut open) = self.open.take() {
            match self.patterns.match_continuation(line) {
                Some(cont) if open.accepts(&cont) => {
                    open.extend(&cont);
                    self.open = Some(open);
                    return;
                }
                _ => self.finished.push(open),
            }
        }

        if let Some(start) = self.patterns.match_start(line) {
            let annotation = Annotation::from_start(self.line_no, &start);
            if self.allow_continuation {
                self.open = Some(annotation);
            } else {
                self.finished.push(annotation);
            }
        }
    }

    /// Close any open annotation and return all annotations in line order.
    pub fn finish(mut self) -> Vec<Annotation> {
        if let Some(open) = self.open.take() {
            self.finished.push(open);
        }
        self.finished
    }
}

/// Scan a whole document.
pub fn scan<I, S>(lines: I, allow_continuation: bool, patterns: &PatternSet) -> Vec<Annotation>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = Scanner::new(patterns, allow_continuation);
    for line in lines {
        scanner.push_line(line.as_ref());
    }
    scanner.finish()
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
