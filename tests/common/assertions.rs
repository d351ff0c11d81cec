//! Logged assertion helpers for tabmark tests.
//!
//! Each helper records the compared values before asserting, so a failing
//! markup comparison leaves the full rendered output in the CI log.

#![allow(dead_code)]

use std::fmt::Debug;

/// Assert equality with detailed logging.
#[track_caller]
pub fn assert_eq_logged<T: PartialEq + Debug>(context: &str, actual: T, expected: T) {
    tracing::debug!(
        context = context,
        expected = ?expected,
        actual = ?actual,
        "asserting equality"
    );

    if actual != expected {
        tracing::error!(
            context = context,
            expected = ?expected,
            actual = ?actual,
            "assertion failed: values not equal"
        );
    }

    assert_eq!(
        actual, expected,
        "{context}: expected {expected:?}, got {actual:?}"
    );
}

/// Assert that rendered markup contains `needle`.
#[track_caller]
pub fn assert_contains_logged(context: &str, haystack: &str, needle: &str) {
    tracing::debug!(context = context, needle = needle, "asserting contains");

    let found = haystack.contains(needle);
    if !found {
        tracing::error!(
            context = context,
            needle = needle,
            haystack = haystack,
            "assertion failed: substring not found"
        );
    }

    assert!(found, "{context}: {needle:?} not found in {haystack:?}");
}

/// Assert how often `needle` occurs in rendered markup.
#[track_caller]
pub fn assert_count_logged(context: &str, haystack: &str, needle: &str, expected: usize) {
    let actual = haystack.matches(needle).count();
    tracing::debug!(
        context = context,
        needle = needle,
        expected = expected,
        actual = actual,
        "asserting occurrence count"
    );

    assert_eq!(
        actual, expected,
        "{context}: expected {expected} occurrences of {needle:?} in {haystack:?}"
    );
}

/// Assert that a result is an error and return it.
#[track_caller]
pub fn assert_err_logged<T: Debug, E: Debug>(context: &str, result: Result<T, E>) -> E {
    match result {
        Ok(value) => {
            tracing::error!(context = context, value = ?value, "assertion failed: expected Err");
            panic!("{context}: expected Err, got Ok({value:?})");
        }
        Err(err) => {
            tracing::debug!(context = context, error = ?err, "got expected error");
            err
        }
    }
}
