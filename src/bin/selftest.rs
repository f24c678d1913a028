// bunit self-test suite: a handful of passing, failing and grouped tests.
// Usage: cargo run --bin selftest   (exits non-zero: two tests fail on purpose)
//
// See `selftest_passing.rs` for a suite where everything passes.

use bunit::{check, check_eq, diagln, test_case, test_main, TestResult};

fn words(s: &str) -> Vec<&str> {
    s.split_whitespace().collect()
}

fn check_round_trip(input: &str) -> TestResult {
    let first = words(input);
    let joined = first.join(" ");
    diagln!("round trip of {:?} -> {:?}", input, joined);
    check!(words(&joined) == first);
    Ok(())
}

test_case!(round_trip, "tokenizing", {
    check_round_trip("alpha  beta\tgamma")?;
    check_round_trip("")?;
});

test_case!(counts_words, "tokenizing", {
    diagln!("counting words");
    check_eq!(words("one two three").len(), 3);
});

test_case!(arithmetic, {
    check!(2 + 2 == 4);
});

test_case!(deliberate_failure, "failing", {
    diagln!("about to fail");
    check!(words("a b").len() == 3);
});

test_case!(deliberate_panic, "failing", {
    let empty: Vec<u32> = Vec::new();
    check!(empty[0] == 0);
});

test_main!(
    round_trip,
    counts_words,
    arithmetic,
    deliberate_failure,
    deliberate_panic
);
