//! Command-line layer: argument parsing, orchestration and output.

mod args;
mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, LayoutArgs, When};
pub use exit_status::ExitStatus;
pub use run::{is_broken_pipe, run};
