// Regression tests for the selftest binary: console report, log file and exit code.
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

#[test]
fn mixed_suite_fails_with_summary() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("selftest").unwrap();
    cmd.current_dir(dir.path());
    let assert = cmd.assert().failure().stdout(
        contains("INFO:\tFound 5 tests in 3 groups.")
            .and(contains("Group: 'tokenizing'"))
            .and(contains("'deliberate_failure' failed at 'selftest.rs:"))
            .and(contains("'deliberate_panic' failed at '"))
            .and(contains("Passed 3 out of 5 tests.")),
    );
    #[cfg(unix)]
    assert.code(255);
    #[cfg(not(unix))]
    let _ = assert;
}

#[test]
fn diagnostics_stay_out_of_the_console() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("selftest").unwrap();
    cmd.current_dir(dir.path());
    cmd.assert()
        .stdout(contains("round trip of").not().and(contains("about to fail").not()));
}

#[cfg(not(feature = "no-log"))]
#[test]
fn log_file_collects_test_output() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("selftest").unwrap();
    cmd.current_dir(dir.path());
    cmd.assert().failure();

    let log_path = dir.path().join(option_env!("BUNIT_LOG_FILE").unwrap_or("tests.txt"));
    let log = std::fs::read_to_string(log_path).unwrap();
    assert!(log.contains("Group: 'tokenizing'"));
    assert!(log.contains("Test 'round_trip' log:"));
    assert!(log.contains("round trip of"));
    assert!(log.contains("about to fail"));
    assert!(log.contains("SUMMARY:\n\tPassed 3 out of 5 tests."));
}

#[test]
fn passing_suite_exits_zero() {
    let dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("selftest_passing").unwrap();
    cmd.current_dir(dir.path());
    cmd.assert().success().stdout(
        contains("INFO:\tFound 3 tests in 2 groups.")
            .and(contains("\t[1] : 'splits_on_whitespace' passed."))
            .and(contains("Passed 3 out of 3 tests.")),
    );
}
