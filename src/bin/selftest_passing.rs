// bunit self-test suite where every test passes.
// Usage: cargo run --bin selftest_passing   (exit code 0)

use bunit::{check, check_eq, diagln, test_case, test_main};

test_case!(splits_on_whitespace, "tokenizing", {
    let words: Vec<&str> = "one two  three".split_whitespace().collect();
    diagln!("words: {:?}", words);
    check_eq!(words, vec!["one", "two", "three"]);
});

test_case!(empty_input_has_no_words, "tokenizing", {
    check!("   ".split_whitespace().next().is_none());
});

test_case!(arithmetic, {
    check!(2 + 2 == 4);
});

test_main!(splits_on_whitespace, empty_input_has_no_words, arithmetic);
