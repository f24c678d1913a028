//! Authoring macros.
//!
//! ```rust,no_run
//! use bunit::{check, diagln, test_case, test_main};
//!
//! fn tokenize(s: &str) -> Vec<&str> {
//!     s.split_whitespace().collect()
//! }
//!
//! test_case!(repeatable_tokenization, "tokenizing", {
//!     let first = tokenize("a  b c");
//!     let joined = first.join(" ");
//!     diagln!("joined: {}", joined);
//!     check!(tokenize(&joined) == first);
//! });
//!
//! test_case!(ungrouped_smoke, {
//!     check!(tokenize("").is_empty());
//! });
//!
//! test_main!(repeatable_tokenization, ungrouped_smoke);
//! ```

/// Fails the current test at this file and line when `cond` is false.
///
/// Usable in a [`test_case!`] body and in any helper returning
/// [`TestResult`](crate::TestResult).
#[macro_export]
macro_rules! check {
    ($cond:expr $(,)?) => {
        if !$cond {
            return ::core::result::Result::Err($crate::Failure::at(
                ::core::file!(),
                ::core::line!(),
            ));
        }
    };
}

/// Shorthand for `check!(left == right)`.
#[macro_export]
macro_rules! check_eq {
    ($left:expr, $right:expr $(,)?) => {
        $crate::check!($left == $right)
    };
}

/// Declares a test, optionally in a named group.
///
/// Expands to a registration function with the test's name. Passing that function
/// to [`collect_tests!`] or [`test_main!`] creates the test's single
/// [`TestUnit`](crate::TestUnit) inside the registry.
#[macro_export]
macro_rules! test_case {
    (@define $name:ident, $group:expr, $body:block) => {
        pub fn $name(registry: &mut $crate::Registry) {
            #[allow(unreachable_code)]
            fn action() -> $crate::TestResult {
                $body
                ::core::result::Result::Ok(())
            }
            registry.add($crate::TestUnit::new(
                ::core::stringify!($name),
                $group,
                action,
            ));
        }
    };
    ($name:ident, $body:block) => {
        $crate::test_case!(@define $name, ::core::option::Option::None, $body);
    };
    ($name:ident, $group:expr, $body:block) => {
        $crate::test_case!(@define $name, ::core::option::Option::Some($group), $body);
    };
}

/// Builds a [`Registry`](crate::Registry) from declared tests, in the given order.
#[macro_export]
macro_rules! collect_tests {
    ($($test:path),* $(,)?) => {{
        let mut registry = $crate::Registry::new();
        $( $test(&mut registry); )*
        registry
    }};
}

/// Defines `main` for a test binary: collects the listed tests, runs them and
/// exits with `0` when all pass, `-1` otherwise.
#[macro_export]
macro_rules! test_main {
    ($($test:path),* $(,)?) => {
        fn main() {
            let registry = $crate::collect_tests!($($test),*);
            $crate::cli::run(registry).exit()
        }
    };
}

/// `print!` onto the diagnostic channel.
#[macro_export]
macro_rules! diag {
    ($($arg:tt)*) => {
        $crate::capture::write_diagnostic(::core::format_args!($($arg)*))
    };
}

/// `println!` onto the diagnostic channel.
#[macro_export]
macro_rules! diagln {
    () => {
        $crate::capture::write_diagnostic(::core::format_args!("\n"))
    };
    ($($arg:tt)*) => {{
        $crate::capture::write_diagnostic(::core::format_args!($($arg)*));
        $crate::capture::write_diagnostic(::core::format_args!("\n"));
    }};
}
