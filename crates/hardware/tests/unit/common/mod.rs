//! Unit tests for shared definitions.


/// Error messages and conversions.
pub mod error;
