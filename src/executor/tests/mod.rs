//! Tests for the executor
//!
//! Organized by feature area. Every test goes through the full pipeline:
//! parse, validate, serialize round trip, execute.

mod helpers;

mod for_tests;
mod if_tests;
mod scope_tests;
mod while_tests;
