//! The bunit entry point.
//!
//! [`run`] is what [`test_main!`](crate::test_main) calls: it sets up logging and
//! the primary channel, opens the configured log sink, runs everything in the
//! registry and maps the result to an [`ExitStatus`]. There are no command-line
//! arguments; configuration is fixed at build time (see
//! [`CaptureConfig`](crate::CaptureConfig)).

use std::io::Write;

use termcolor::WriteColor;
use tracing::info;

use crate::capture::SharedSink;
use crate::errors::HarnessResult;
use crate::registry::Registry;
use crate::test::runner::{Runner, RunnerConfig};
use crate::test::RunCounters;

pub mod output;

/// Process exit status for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every test passed, or none were registered.
    Pass = 0,
    /// At least one test failed.
    Fail = -1,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn is_pass(self) -> bool {
        self == ExitStatus::Pass
    }

    /// Ends the process with this status.
    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }
}

/// Runs a frozen registry with the default configuration, writing to stdout.
///
/// A fatal harness error (for example an unwritable log file) is rendered on
/// stderr and reported as [`ExitStatus::Fail`].
pub fn run(registry: Registry) -> ExitStatus {
    init_tracing();
    run_with_config(&registry, &RunnerConfig::default())
}

pub fn run_with_config(registry: &Registry, config: &RunnerConfig) -> ExitStatus {
    let mut out = output::stdout();
    let result = config
        .capture
        .open_sink()
        .and_then(|log| execute(registry, &mut out, log, config.contain_panics));

    match result {
        Ok(counters) => output::exit_status(&counters),
        Err(err) => {
            let _ = out.flush();
            eprintln!("{:?}", miette::Report::new(err));
            ExitStatus::Fail
        }
    }
}

/// Announces, runs and summarises one registry against explicit channels.
///
/// With an empty registry the runner is never started, so no capture happens;
/// the summary still reports `0` out of `0`.
pub fn execute<W: WriteColor>(
    registry: &Registry,
    out: &mut W,
    mut log: SharedSink,
    contain_panics: bool,
) -> HarnessResult<RunCounters> {
    output::print_pre_run_summary(out, registry)?;

    let counters = if registry.is_empty() {
        RunCounters::new(0)
    } else {
        let mut runner = Runner::new(registry, &mut *out, log.clone()).contain_panics(contain_panics);
        runner.run()?
    };

    output::print_post_run_summary(out, &mut log, &counters)?;
    info!(
        passed = counters.passed(),
        total = counters.total(),
        "test run finished"
    );
    Ok(counters)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
