//! Handles all user-facing output for a test run.
//!
//! The pre-run and post-run summaries, the per-test status words and the exit
//! status derived from the final counters all live here, so the runner only
//! decides *what* happened and this module decides how it reads.

// ============================================================================
// PRIMARY CHANNEL
// ============================================================================

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::capture::SharedSink;
use crate::cli::ExitStatus;
use crate::registry::Registry;
use crate::test::{Outcome, RunCounters};

/// An 80 column dashed line.
pub const SEPARATOR: &str =
    "--------------------------------------------------------------------------------";

/// Color only when stdout is a terminal.
pub fn use_colors() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// The primary channel: stdout, colored when attached to a terminal.
pub fn stdout() -> StandardStream {
    let choice = if use_colors() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

// ============================================================================
// REPORTER
// ============================================================================

pub fn print_separator<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", SEPARATOR)
}

/// Test and group counts, before anything runs.
pub fn print_pre_run_summary<W: WriteColor + ?Sized>(
    out: &mut W,
    registry: &Registry,
) -> io::Result<()> {
    let tests = registry.total_test_count();
    let groups = registry.group_count();

    print_separator(out)?;
    writeln!(
        out,
        "INFO:\tIf all tests pass (or no tests fail), the program will return success."
    )?;
    writeln!(out, "\t\tOtherwise, it will return failure.")?;
    writeln!(
        out,
        "INFO:\tFound {} test{} in {} group{}.",
        tests,
        plural(tests),
        groups,
        plural(groups)
    )?;
    print_separator(out)
}

/// The status word that completes a `[n] : 'name' ` line.
pub fn print_outcome<W: WriteColor + ?Sized>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::Passed => {
            let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
            write!(out, "passed.")?;
            let _ = out.reset();
            writeln!(out)
        }
        Outcome::Failed { location } => {
            let _ = out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
            write!(out, "failed at '{}'.", location)?;
            let _ = out.reset();
            writeln!(out)
        }
    }
}

/// `Passed X out of Y tests.`
pub fn summary_line(counters: &RunCounters) -> String {
    format!("Passed {} out of {} tests.", counters.passed(), counters.total())
}

/// The summary block, written to the primary channel and mirrored into the log.
pub fn print_post_run_summary<W: WriteColor + ?Sized>(
    out: &mut W,
    log: &mut SharedSink,
    counters: &RunCounters,
) -> io::Result<()> {
    write_summary_block(out, counters)?;
    write_summary_block(log, counters)?;
    log.flush()?;
    out.flush()
}

fn write_summary_block<W: Write + ?Sized>(out: &mut W, counters: &RunCounters) -> io::Result<()> {
    print_separator(out)?;
    writeln!(out, "SUMMARY:")?;
    writeln!(out, "\t{}", summary_line(counters))?;
    print_separator(out)
}

/// Pass only when every registered test passed, including when there were none.
pub fn exit_status(counters: &RunCounters) -> ExitStatus {
    if counters.all_passed() {
        ExitStatus::Pass
    } else {
        ExitStatus::Fail
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
