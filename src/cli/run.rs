//! Dispatch parsed arguments to the scanner and the reporters.

use std::{
    env,
    io::{self, IsTerminal, Write},
};

use anyhow::{Context, Result, anyhow};
use colored::Colorize;

use super::{
    args::Arguments,
    exit_status::ExitStatus,
    report::{ReportOptions, print_document_errors, write_json, write_text},
};
use crate::config::{default_config_toml, load_config};
use crate::traversal::{
    ScanOptions, ScanReport, TraversalOptions, discover, encoding_for_label, scan_paths,
    scan_reader,
};

pub fn run(args: Arguments) -> Result<ExitStatus> {
    if args.print_default_config {
        let mut out = io::stdout().lock();
        out.write_all(default_config_toml()?.as_bytes())?;
        out.flush()?;
        return Ok(ExitStatus::Success);
    }

    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let loaded = load_config(args.config.as_deref(), &current_dir)?;
    if args.verbose {
        match &loaded.source {
            Some(path) => eprintln!("{} {}", "config:".bold(), path.display()),
            None => eprintln!("{} built-in keywords", "config:".bold()),
        }
    }
    let patterns = loaded.config.patterns()?;

    let encoding = encoding_for_label(&args.encoding)
        .ok_or_else(|| anyhow!("Unknown encoding: {}", args.encoding))?;
    let scan_options = ScanOptions {
        allow_continuation: args.allow_continuation,
        encoding,
    };

    let report = if args.paths.is_empty() {
        scan_reader(io::stdin().lock(), &scan_options, &patterns)
    } else {
        let traversal = TraversalOptions {
            recursive: args.recursive,
            extensions: args.extensions.clone(),
        };
        let discovery = discover(&args.paths, &traversal);
        let mut report = scan_paths(&discovery.files, &scan_options, &patterns);
        let mut errors = discovery.errors;
        errors.append(&mut report.errors);
        report.errors = errors;
        report
    };

    let stdout_is_terminal = io::stdout().is_terminal();
    let layout = &args.layout;
    let color = layout
        .color
        .resolve(stdout_is_terminal && env::var_os("NO_COLOR").is_none());
    colored::control::set_override(color);

    let options = ReportOptions {
        line_number: !layout.no_line_number,
        resolved: !layout.no_resolved,
        label: !layout.no_label,
        message: !layout.no_message,
        absolute_path: layout.absolute_path,
        heading: layout.heading.resolve(stdout_is_terminal),
        color,
    };

    write_report(&report, &options, args.json)?;
    print_document_errors(&report.errors, args.verbose);

    if args.verbose {
        eprintln!(
            "{} {} annotation(s) in {} document(s)",
            "scanned:".bold(),
            report.annotation_count(),
            report.documents_scanned
        );
    }

    Ok(ExitStatus::from_report(&report))
}

fn write_report(report: &ScanReport, options: &ReportOptions, json: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    if json {
        write_json(&report.documents, options, &mut out)?;
    } else {
        write_text(&report.documents, options, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

/// Whether `err` was caused by writing to a closed pipe, as in `todotex | head`.
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
    })
}
