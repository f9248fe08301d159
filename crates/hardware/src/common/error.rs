//! Error definitions for configuration, trace input, and simulation.
//!
//! The prefetcher core itself has no failure modes: every table index is
//! bounded by construction and a missing correlation is an ordinary outcome.
//! Errors only arise at the edges of the system:
//! 1. **Configuration:** Malformed JSON or cache geometry that cannot be built.
//! 2. **Trace Input:** Unreadable files or lines that do not parse as accesses.
//! 3. **Simulation:** An umbrella type returned by the simulator entry points.

use thiserror::Error;

/// Errors produced while parsing or validating a [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for the expected schema.
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Cache line size must be a non-zero power of two.
    #[error("line_bytes must be a non-zero power of two, got {0}")]
    LineSize(usize),

    /// Associativity must be at least one way.
    #[error("ways must be at least 1")]
    ZeroWays,

    /// Cache size must hold a whole number of sets.
    #[error("size_bytes {size} is not a non-zero multiple of line_bytes * ways ({set_bytes})")]
    Geometry {
        /// Configured cache size in bytes.
        size: usize,
        /// Bytes occupied by one full set.
        set_bytes: usize,
    },

    /// The seed offset must be disabled (0) or one of the training candidates.
    #[error("initial_offset {0} is neither 0 nor a training candidate")]
    InitialOffset(u64),
}

/// Errors produced while reading an access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be parsed as an access record.
    #[error("line {line}: malformed access {text:?}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// The offending line, trimmed.
        text: String,
    },

    /// A line carried an access kind other than R, W, L or S.
    #[error("line {line}: unknown access kind {kind:?}")]
    UnknownKind {
        /// 1-based line number.
        line: usize,
        /// The unrecognised kind token.
        kind: String,
    },
}

/// Top-level error returned by the simulator entry points.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The trace could not be loaded.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// Any other file-system failure (for example opening a config file).
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
