//! bunit error handling.
//!
//! Two distinct kinds of failure flow through the engine:
//!
//! - [`Failure`] is the *expected* failure signal a test raises through
//!   [`check!`](crate::check). It never escapes the per-test boundary; the runner
//!   turns it into a recorded outcome.
//! - [`HarnessError`] covers the engine itself: an unusable log sink at startup or
//!   a primary channel that stopped accepting writes. These are fatal and are
//!   rendered with `miette` by the entry point.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

// ============================================================================
// TEST FAILURE SIGNAL
// ============================================================================

/// The failure signal raised by a failed expectation.
///
/// The payload is a short location descriptor, `"<file-basename>:<line>"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed at '{location}'")]
pub struct Failure {
    location: String,
}

impl Failure {
    /// Builds a failure for the given source file and line, keeping only the
    /// file name after the last path separator.
    pub fn at(file: &str, line: u32) -> Self {
        Self {
            location: format!("{}:{}", file_basename(file), line),
        }
    }

    /// Builds a failure from an already formatted location descriptor.
    pub fn with_location(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

/// The outcome of one test action.
pub type TestResult = Result<(), Failure>;

/// Strips everything up to and including the last `/` or `\`.
pub(crate) fn file_basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

// ============================================================================
// HARNESS ERRORS
// ============================================================================

/// Fatal errors raised by the engine itself.
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("unable to open log sink '{}'", .path.display())]
    #[diagnostic(
        code(bunit::log_sink),
        help("check that the directory exists and is writable, or build with the `no-log` feature")
    )]
    LogSink {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write test output")]
    #[diagnostic(code(bunit::output))]
    Output(#[from] io::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_keeps_only_the_file_name() {
        let failure = Failure::at("src/deep/nested/tokenizer.rs", 42);
        assert_eq!(failure.location(), "tokenizer.rs:42");
    }

    #[test]
    fn location_handles_windows_separators() {
        let failure = Failure::at(r"C:\work\tests\parse.rs", 7);
        assert_eq!(failure.location(), "parse.rs:7");
    }

    #[test]
    fn location_without_separator_is_unchanged() {
        assert_eq!(Failure::at("lib.rs", 1).location(), "lib.rs:1");
    }

    #[test]
    fn failure_displays_like_a_status_line() {
        let failure = Failure::with_location("a.rs:3");
        assert_eq!(failure.to_string(), "failed at 'a.rs:3'");
    }
}
