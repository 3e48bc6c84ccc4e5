//! Lanai Library
//!
//! Lanai is a hierarchical wildcard registry: values are stored under dotted
//! keys such as `orders.eu.created`, and keys may contain `*` (exactly one
//! segment) or `**` (one or more segments). The registry answers two kinds of
//! questions with one lazy query:
//!
//! - which stored entries match a glob pattern (`orders.*`, `orders.**.created`)
//! - which stored patterns match a concrete key (`**` and `*` matchers)
//!
//! # Architecture
//!
//! - [`data_structures::lanai_glob_tree`] holds the arena-backed segment trie
//!   and its live iterators
//! - [`config`] loads and validates application settings
//! - [`error`] defines the error taxonomy and the global error reporter

pub mod config;
pub mod data_structures;
pub mod error;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for Lanai.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization function.
///
/// Installs the tracing error reporter and loads the default configuration.
pub fn init() -> error::LanaiResult<()> {
    error::set_error_reporter(std::sync::Arc::new(error::TracingErrorReporter));
    config::init_default_config()?;
    Ok(())
}
