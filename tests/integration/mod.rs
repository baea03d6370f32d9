//! Integration tests for tile-batch
//!
//! These tests run whole batches against a mock render service.

pub mod batch_scenario_tests;
pub mod error_handling_tests;
