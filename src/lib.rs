//! # bunit
//!
//! A small test registration and execution engine. Tests are declared as named,
//! optionally grouped, zero-argument actions; the engine collects them into a
//! [`Registry`], runs each one to completion with its diagnostic output captured
//! into a log sink, keeps going past failures, and reports a single pass/fail
//! exit status.
//!
//! ## Pipeline
//! 1. **Registration**: [`test_case!`] declarations are gathered into a
//!    [`Registry`] by [`collect_tests!`] / [`test_main!`].
//! 2. **Announcing**: test and group counts are printed.
//! 3. **Running**: groups in registration order, each test under a [`Capture`].
//! 4. **Reporting**: `Passed X out of Y tests.` and an [`ExitStatus`].

pub use crate::capture::{Capture, CaptureConfig, LogSink, SharedSink};
pub use crate::cli::ExitStatus;
pub use crate::errors::{Failure, HarnessError, HarnessResult, TestResult};
pub use crate::registry::{Group, Registry};
pub use crate::test::runner::{Runner, RunnerConfig};
pub use crate::test::{Outcome, RunCounters, TestFn, TestUnit, UNGROUPED};

pub mod capture;
pub mod cli;
pub mod errors;
pub mod registry;

#[macro_use]
mod macros;
