//! Unit tests for the orbdeck CLI
//!
//! These tests use hand-written fakes for `orbctl` and run without spawning
//! the control binary.

mod config_store;
mod helpers;
mod property_tests;
mod tools_service;
