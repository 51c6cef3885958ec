//! Unit tests for floorgrid.

mod camera_tests;
mod hit_testing_tests;
mod history_tests;
mod settings_tests;
mod snapshot_tests;
