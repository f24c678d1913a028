//! # bunit test helpers
//!
//! Runs a registry against in-memory channels so tests can inspect both the
//! primary report and the log sink.
//!
//! The diagnostic capture slot is process-wide, so runs inside one test binary
//! take turns through [`serial`].

#![allow(dead_code)]

use std::sync::{Mutex, MutexGuard, PoisonError};

use bunit::{cli, Registry, RunCounters, SharedSink};
use termcolor::NoColor;

static SERIAL: Mutex<()> = Mutex::new(());

/// Holds the capture slot for the calling test. A test that panicked while
/// holding it does not block the others.
pub fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Everything one run produced.
#[derive(Debug)]
pub struct RunOutput {
    pub counters: RunCounters,
    pub primary: String,
    pub log: String,
}

pub fn run(registry: &Registry) -> RunOutput {
    run_with(registry, true)
}

pub fn run_with(registry: &Registry, contain_panics: bool) -> RunOutput {
    let _serial = serial();
    run_unserialized(registry, contain_panics)
}

/// Like [`run_with`], for callers already holding [`serial`].
pub fn run_unserialized(registry: &Registry, contain_panics: bool) -> RunOutput {
    let mut out = NoColor::new(Vec::new());
    let log = SharedSink::memory();
    let counters = cli::execute(registry, &mut out, log.clone(), contain_panics)
        .expect("in-memory run should not raise harness errors");
    RunOutput {
        counters,
        primary: String::from_utf8(out.into_inner()).expect("primary output is utf-8"),
        log: log.contents().expect("memory sink"),
    }
}

/// Index of the first occurrence of `needle`, failing the test if it is missing.
pub fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in:\n{haystack}"))
}
