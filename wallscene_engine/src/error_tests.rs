//! Unit tests for error.rs
//!
//! Tests all Error variants, their Display output and the error macros.

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("shader compilation failed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("shader compilation failed"));
}

#[test]
fn test_out_of_memory_display() {
    let err = Error::OutOfMemory;
    assert_eq!(format!("{}", err), "Out of GPU memory");
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("texture handle is stale".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("stale"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("no scene".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("no scene"));
}

#[test]
fn test_resource_not_found_display() {
    let err = Error::ResourceNotFound("_rt_missing".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Resource not found"));
    assert!(display.contains("_rt_missing"));
}

#[test]
fn test_graph_construction_display() {
    let err = Error::GraphConstruction("cycle between 'a' and 'b'".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Graph construction failed"));
    assert!(display.contains("cycle"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_debug() {
    let debug = format!("{:?}", Error::GraphConstruction("x".to_string()));
    assert!(debug.contains("GraphConstruction"));

    let debug = format!("{:?}", Error::ResourceNotFound("x".to_string()));
    assert!(debug.contains("ResourceNotFound"));
}

#[test]
fn test_error_clone() {
    let err1 = Error::BackendError("test".to_string());
    let err2 = err1.clone();
    assert_eq!(format!("{}", err1), format!("{}", err2));
}

// ============================================================================
// ERROR MACROS
// ============================================================================

#[test]
fn test_engine_err_builds_backend_error() {
    let err = crate::engine_err!("wallscene::test", "value {} is wrong", 7);
    match err {
        Error::BackendError(msg) => assert_eq!(msg, "value 7 is wrong"),
        _ => panic!("Expected BackendError"),
    }
}

#[test]
fn test_engine_bail_returns_early() {
    fn fails(flag: bool) -> Result<u32> {
        if flag {
            crate::engine_bail!("wallscene::test", "bailed out");
        }
        Ok(1)
    }

    assert_eq!(fails(false).unwrap(), 1);
    match fails(true) {
        Err(Error::BackendError(msg)) => assert!(msg.contains("bailed out")),
        _ => panic!("Expected BackendError"),
    }
}

#[test]
fn test_error_propagation_with_question_mark() {
    fn inner() -> Result<i32> {
        Err(Error::OutOfMemory)
    }

    fn outer() -> Result<i32> {
        inner()?;
        Ok(42)
    }

    assert!(outer().is_err());
}
