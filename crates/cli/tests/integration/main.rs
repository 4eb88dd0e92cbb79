//! Integration tests for packaging runs.

mod common;
mod package_tests;
