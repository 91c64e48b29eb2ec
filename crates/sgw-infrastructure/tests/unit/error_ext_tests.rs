//! Error Extension Tests

use sgw_domain::error::{Error, Result};
use sgw_infrastructure::error_ext::ErrorContext;
use std::io;

#[test]
fn test_io_context_keeps_source() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

    let result: Result<()> = Err(io_error).io_context("failed to read file");

    match result {
        Err(Error::Io { message, source }) => {
            assert!(message.contains("failed to read file"));
            assert!(message.contains("file not found"));
            assert!(source.is_some());
        }
        other => panic!("Expected Io error, got {other:?}"),
    }
}

#[test]
fn test_config_context_maps_to_configuration() {
    let parse_error = "abc".parse::<u32>().unwrap_err();

    let result: Result<u32> = Err(parse_error).config_context("bad port");

    assert!(matches!(result, Err(Error::Configuration { .. })));
}

#[test]
fn test_network_context_is_retryable() {
    let io_error = io::Error::new(io::ErrorKind::ConnectionReset, "reset");

    let error = Err::<(), _>(io_error)
        .network_context("provider call")
        .unwrap_err();

    assert!(error.is_retryable());
}

#[test]
fn test_with_context_is_lazy() {
    let ok: std::result::Result<u8, io::Error> = Ok(1);
    let value = ok
        .with_context(|| -> String { panic!("context must not be built on success") })
        .expect("ok value");
    assert_eq!(value, 1);

    let err: std::result::Result<u8, io::Error> = Err(io::Error::other("boom"));
    let error = err.context("loading").unwrap_err();
    assert!(matches!(error, Error::Internal { .. }));
    assert!(error.to_string().contains("loading: boom"));
}
