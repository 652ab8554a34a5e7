use std::process::ExitCode;

use crate::traversal::ScanReport;

/// Exit status of the todotex binary.
///
/// - `Success` (0): every document was scanned
/// - `Failure` (1): some documents could not be read or decoded
/// - `Error` (2): the run failed before scanning (config error, bad encoding, ...)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// Annotations found are not a failure; unreadable documents are.
    pub fn from_report(report: &ScanReport) -> Self {
        if report.errors.is_empty() {
            ExitStatus::Success
        } else {
            ExitStatus::Failure
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(match status {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        })
    }
}
