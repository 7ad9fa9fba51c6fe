#![allow(dead_code)]

pub use pipemerge_test_utils::builders;
pub use pipemerge_test_utils::{RecordingSink, init_tracing, with_timeout};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Count non-overlapping occurrences of `needle` in `haystack`.
pub fn count_matches(haystack: &str, needle: &str) -> usize {
    let re = regex::Regex::new(&regex::escape(needle)).expect("escaped pattern is valid");
    re.find_iter(haystack).count()
}
