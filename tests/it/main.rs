//! Single test binary entry point.
//!
//! All tests compile into one binary to keep linking cheap.
//!
//! Structure:
//! - helpers: editor builders, gesture helpers and a recording persistence layer
//! - integration: multi-component workflow tests driven through `Editor`
//! - unit: single-component unit tests

mod unit;
