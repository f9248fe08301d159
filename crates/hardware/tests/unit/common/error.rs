//! # Error Tests
//!
//! This module checks the messages and conversions of the error types.

use offsetpf_core::common::{ConfigError, SimError, TraceError};

#[test]
fn test_config_error_display() {
    assert_eq!(
        ConfigError::LineSize(48).to_string(),
        "line_bytes must be a non-zero power of two, got 48"
    );
    assert_eq!(ConfigError::ZeroWays.to_string(), "ways must be at least 1");
    assert!(
        ConfigError::Geometry {
            size: 1000,
            set_bytes: 512
        }
        .to_string()
        .contains("1000")
    );
    assert!(ConfigError::InitialOffset(7).to_string().contains('7'));
}

#[test]
fn test_trace_error_display() {
    let err = TraceError::Malformed {
        line: 3,
        text: "R zz".to_string(),
    };
    assert_eq!(err.to_string(), "line 3: malformed access \"R zz\"");

    let err = TraceError::UnknownKind {
        line: 9,
        kind: "X".to_string(),
    };
    assert_eq!(err.to_string(), "line 9: unknown access kind \"X\"");
}

#[test]
fn test_sim_error_is_transparent() {
    let err: SimError = ConfigError::ZeroWays.into();
    assert_eq!(err.to_string(), "ways must be at least 1");

    let err: SimError = TraceError::UnknownKind {
        line: 1,
        kind: "Q".to_string(),
    }
    .into();
    assert!(matches!(err, SimError::Trace(TraceError::UnknownKind { line: 1, .. })));
}

#[test]
fn test_io_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: SimError = io.into();
    assert_eq!(err.to_string(), "io: gone");
}
