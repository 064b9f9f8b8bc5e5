#![allow(dead_code)]

pub use backlog_compiler_test_utils::builders::{BacklogBuilder, ItemBuilder};
pub use backlog_compiler_test_utils::init_tracing;

/// `["A", "B"]` → `vec!["A".to_string(), "B".to_string()]`.
pub fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

/// Waves as owned strings, for comparing against plan output.
pub fn waves(raw: &[&[&str]]) -> Vec<Vec<String>> {
    raw.iter().map(|w| ids(w)).collect()
}
