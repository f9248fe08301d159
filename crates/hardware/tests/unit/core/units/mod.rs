//! Functional unit tests.
