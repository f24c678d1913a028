//! Diagnostic output capture.
//!
//! Tests write incidental output through the diagnostic channel ([`diag!`],
//! [`diagln!`] or [`diagnostic`]). Outside a test that channel is stdout. While the
//! runner executes a test it holds a [`Capture`] guard, which points the channel at
//! the run's log sink and restores the previous target when dropped, on the
//! success path and the failure path alike.
//!
//! The active target is a single process-wide slot, so output from threads a test
//! spawns lands in the same sink. Captures are never nested by the runner; a guard
//! only remembers the one target it replaced.
//!
//! [`diag!`]: crate::diag
//! [`diagln!`]: crate::diagln

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::errors::{HarnessError, HarnessResult};

/// Log file used when no override is configured at build time.
pub const DEFAULT_LOG_FILE: &str = "tests.txt";

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Where captured output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    /// When false, captured bytes are discarded and no log file is created.
    pub enabled: bool,
    pub sink_path: PathBuf,
}

impl Default for CaptureConfig {
    /// Resolved at build time: the `no-log` feature disables the log file and the
    /// `BUNIT_LOG_FILE` environment variable overrides its name.
    fn default() -> Self {
        Self {
            enabled: !cfg!(feature = "no-log"),
            sink_path: PathBuf::from(option_env!("BUNIT_LOG_FILE").unwrap_or(DEFAULT_LOG_FILE)),
        }
    }
}

impl CaptureConfig {
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            enabled: true,
            sink_path: path.into(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Opens the configured sink. Creating the log file truncates any previous run.
    pub fn open_sink(&self) -> HarnessResult<SharedSink> {
        if !self.enabled {
            return Ok(SharedSink::new(LogSink::Discard));
        }
        let sink = LogSink::create(&self.sink_path)?;
        debug!(path = %self.sink_path.display(), "opened log sink");
        Ok(SharedSink::new(sink))
    }
}

// ============================================================================
// SINKS
// ============================================================================

/// A destination for captured output.
#[derive(Debug)]
pub enum LogSink {
    File(BufWriter<File>),
    /// Keeps everything in memory; used when the caller wants to inspect the log.
    Memory(Vec<u8>),
    Discard,
}

impl LogSink {
    pub fn create(path: &Path) -> HarnessResult<Self> {
        let file = File::create(path).map_err(|source| HarnessError::LogSink {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(LogSink::File(BufWriter::new(file)))
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(file) => file.write(buf),
            LogSink::Memory(bytes) => bytes.write(buf),
            LogSink::Discard => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(file) => file.flush(),
            LogSink::Memory(_) | LogSink::Discard => Ok(()),
        }
    }
}

/// A cloneable handle to one [`LogSink`], shared by the runner and the capture slot.
///
/// Clones write to the same underlying sink, from any thread.
#[derive(Debug, Clone)]
pub struct SharedSink(Arc<Mutex<LogSink>>);

impl SharedSink {
    pub fn new(sink: LogSink) -> Self {
        SharedSink(Arc::new(Mutex::new(sink)))
    }

    // A test that panicked mid-write leaves the sink usable.
    fn lock(&self) -> MutexGuard<'_, LogSink> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn memory() -> Self {
        Self::new(LogSink::Memory(Vec::new()))
    }

    pub fn discard() -> Self {
        Self::new(LogSink::Discard)
    }

    /// Contents of a memory sink, lossily decoded. `None` for other sinks.
    pub fn contents(&self) -> Option<String> {
        match &*self.lock() {
            LogSink::Memory(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        }
    }

    fn write_args(&self, args: fmt::Arguments<'_>) {
        let _ = self.lock().write_fmt(args);
    }

    /// Skips the write when the sink is already locked, e.g. by a panic raised
    /// mid-write on this thread.
    fn try_write_args(&self, args: fmt::Arguments<'_>) {
        let mut sink = match self.0.try_lock() {
            Ok(sink) => sink,
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => return,
        };
        let _ = sink.write_fmt(args);
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flush()
    }
}

// ============================================================================
// CAPTURE GUARD
// ============================================================================

static ACTIVE: Lazy<Mutex<Option<SharedSink>>> = Lazy::new(|| Mutex::new(None));

fn active_slot() -> MutexGuard<'static, Option<SharedSink>> {
    ACTIVE.lock().unwrap_or_else(PoisonError::into_inner)
}

fn active_sink() -> Option<SharedSink> {
    active_slot().clone()
}

/// Scoped redirection of the diagnostic channel.
///
/// Created with [`Capture::begin`]; the previous target comes back when the guard
/// is dropped or passed to [`Capture::end`].
#[must_use = "dropping the guard ends the capture immediately"]
#[derive(Debug)]
pub struct Capture {
    previous: Option<SharedSink>,
}

impl Capture {
    pub fn begin(sink: &SharedSink) -> Self {
        let previous = active_slot().replace(sink.clone());
        Capture { previous }
    }

    pub fn end(self) {}
}

impl Drop for Capture {
    fn drop(&mut self) {
        *active_slot() = self.previous.take();
    }
}

/// True while a [`Capture`] is active anywhere in the process.
pub fn is_capturing() -> bool {
    active_slot().is_some()
}

// ============================================================================
// DIAGNOSTIC CHANNEL
// ============================================================================

/// Writes to the diagnostic channel: the active capture sink, or stdout.
///
/// Write errors are dropped; diagnostic output never fails a test.
pub fn write_diagnostic(args: fmt::Arguments<'_>) {
    match active_sink() {
        Some(sink) => sink.write_args(args),
        None => {
            let _ = io::stdout().write_fmt(args);
        }
    }
}

/// [`write_diagnostic`] for the panic hook: never blocks on a sink this thread
/// may already hold.
pub(crate) fn write_diagnostic_from_panic(args: fmt::Arguments<'_>) {
    let active = match ACTIVE.try_lock() {
        Ok(slot) => slot.clone(),
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().clone(),
        Err(TryLockError::WouldBlock) => return,
    };
    match active {
        Some(sink) => sink.try_write_args(args),
        None => {
            let _ = io::stderr().write_fmt(args);
        }
    }
}

/// An `io::Write` handle onto the diagnostic channel, for code that wants a writer.
pub fn diagnostic() -> DiagnosticWriter {
    DiagnosticWriter { _private: () }
}

/// See [`diagnostic`].
#[derive(Debug)]
pub struct DiagnosticWriter {
    _private: (),
}

impl Write for DiagnosticWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match active_sink() {
            Some(mut sink) => sink.write(buf),
            None => io::stdout().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match active_sink() {
            Some(mut sink) => sink.flush(),
            None => io::stdout().flush(),
        }
    }
}
