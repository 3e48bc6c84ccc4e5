//! Tests for the error module.

use crate::data_structures::{InvalidPathError, LanaiGlobTree};
use crate::error::config::ConfigError;
use crate::error::{
    report_error, set_error_reporter, ErrorContext, ErrorReporter, LanaiError, LanaiResult,
    TracingErrorReporter,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Test that error context can be created and displayed properly.
#[test]
fn test_error_context_display() {
    let error = LanaiError::Custom("test error".to_string());
    let context = ErrorContext::new(error, "test_component").with_details("additional details");

    let display_string = format!("{context}");
    assert!(display_string.contains("test error"));
    assert!(display_string.contains("test_component"));
    assert!(display_string.contains("additional details"));
}

#[test]
fn test_nested_errors() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error = LanaiError::Io(io_error);
    assert!(format!("{error}").contains("file not found"));

    let error = LanaiError::from(ConfigError::ValidationError("bad level".to_string()));
    assert_eq!(
        error.to_string(),
        "Configuration error: Configuration validation error: bad level"
    );
}

/// Insert failures convert into the application error with `?`.
#[test]
fn test_invalid_path_propagates() {
    fn store(tree: &mut LanaiGlobTree<u32>, path: &str) -> LanaiResult<()> {
        tree.insert(path, 1)?;
        Ok(())
    }

    let mut tree = LanaiGlobTree::new();
    assert!(store(&mut tree, "a.b").is_ok());

    match store(&mut tree, "a..b") {
        Err(LanaiError::InvalidPath(InvalidPathError::EmptySegment { path })) => {
            assert_eq!(path, "a..b");
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(tree.len(), 1);
}

#[derive(Debug, Default)]
struct CountingReporter {
    reported: AtomicUsize,
}

impl ErrorReporter for CountingReporter {
    fn report(&self, _context: &ErrorContext) {
        self.reported.fetch_add(1, Ordering::SeqCst);
    }
}

/// Modifies the global reporter; the only test in the crate that does.
#[test]
fn test_global_error_reporter() {
    let reporter = Arc::new(CountingReporter::default());
    set_error_reporter(reporter.clone());

    let context = ErrorContext::new(LanaiError::Custom("test error".to_string()), "test_component");
    report_error(&context);
    report_error(&context);

    assert_eq!(reporter.reported.load(Ordering::SeqCst), 2);
}

#[test]
fn test_tracing_error_reporter() {
    let reporter = TracingErrorReporter;
    let context = ErrorContext::new(LanaiError::Custom("test error".to_string()), "test_component");

    // Just make sure this doesn't panic
    reporter.report(&context);
}
