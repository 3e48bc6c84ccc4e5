//! Test modules for Lanai.
//!
//! This module contains the crate-internal test suite:
//! - Configuration loading and validation
//! - Error taxonomy and reporting
//! - Property-based tests for the registry tree
//! - Shared strategies and fixtures

pub mod error_tests;
