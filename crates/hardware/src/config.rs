//! Configuration system for the prefetcher simulator.
//!
//! This module defines the configuration structures used to parameterize the
//! simulated cache and the offset prefetcher. It provides:
//! 1. **Defaults:** Baseline cache geometry and prefetch queue parameters.
//! 2. **Structures:** Cache and prefetcher sections of the root [`Config`].
//! 3. **Validation:** Geometry and seed-offset checks performed after parsing.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built with
//! `Config::default()` for the CLI.

use serde::Deserialize;

use crate::common::constants::OFFSET_DISABLED;
use crate::common::error::ConfigError;
use crate::core::units::prefetch::OffsetCandidateSet;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache size in bytes (32 KiB).
    pub const CACHE_SIZE: usize = 32 * 1024;

    /// Default cache line size in bytes.
    ///
    /// Matches typical modern processor cache line sizes and DRAM burst length.
    pub const CACHE_LINE: usize = 64;

    /// Default cache associativity.
    pub const CACHE_WAYS: usize = 8;

    /// Default prefetch fill latency, in accesses (0 = filled before the next access).
    pub const PREFETCH_LATENCY: u64 = 0;

    /// Default limit on outstanding prefetch requests.
    pub const MAX_PENDING: usize = 64;
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use offsetpf_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.cache.line_bytes, 64);
/// assert_eq!(config.prefetcher.initial_offset, 0);
/// ```
///
/// Deserializing from JSON, with omitted fields taking their defaults:
///
/// ```
/// use offsetpf_core::config::Config;
///
/// let json = r#"{
///     "cache": { "size_bytes": 8192, "ways": 4, "prefetch_latency": 10 },
///     "prefetcher": { "initial_offset": 1 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cache.size_bytes, 8192);
/// assert_eq!(config.cache.line_bytes, 64);
/// assert_eq!(config.cache.prefetch_latency, 10);
/// assert!(config.prefetcher.enabled);
/// assert_eq!(config.prefetcher.initial_offset, 1);
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Cache (prefetch host) configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Offset prefetcher configuration
    #[serde(default)]
    pub prefetcher: PrefetcherConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any error reported
    /// by [`Config::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a buildable system.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::LineSize`] if `line_bytes` is zero or not a power of two.
    /// * [`ConfigError::ZeroWays`] if `ways` is zero.
    /// * [`ConfigError::Geometry`] if `size_bytes` is not a non-zero multiple of a set.
    /// * [`ConfigError::InitialOffset`] if the seed offset is not 0 or a candidate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cache.validate()?;
        self.prefetcher.validate()
    }
}

/// Set-associative cache parameters.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Total cache size in bytes
    #[serde(default = "CacheConfig::default_size")]
    pub size_bytes: usize,

    /// Line (block) size in bytes; also the prefetcher's block size
    #[serde(default = "CacheConfig::default_line")]
    pub line_bytes: usize,

    /// Associativity
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Accesses between issuing a prefetch and its fill
    #[serde(default = "CacheConfig::default_prefetch_latency")]
    pub prefetch_latency: u64,

    /// Outstanding prefetch requests; further requests are dropped
    #[serde(default = "CacheConfig::default_max_pending")]
    pub max_pending: usize,
}

impl CacheConfig {
    /// Returns the default cache size in bytes.
    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    /// Returns the default cache line size in bytes.
    fn default_line() -> usize {
        defaults::CACHE_LINE
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Returns the default prefetch fill latency.
    fn default_prefetch_latency() -> u64 {
        defaults::PREFETCH_LATENCY
    }

    /// Returns the default outstanding-request limit.
    fn default_max_pending() -> usize {
        defaults::MAX_PENDING
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::LineSize(self.line_bytes));
        }
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        let geometry = |set_bytes| ConfigError::Geometry {
            size: self.size_bytes,
            set_bytes,
        };
        let set_bytes = self
            .line_bytes
            .checked_mul(self.ways)
            .ok_or_else(|| geometry(usize::MAX))?;
        if self.size_bytes == 0 || self.size_bytes % set_bytes != 0 {
            return Err(geometry(set_bytes));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            line_bytes: defaults::CACHE_LINE,
            ways: defaults::CACHE_WAYS,
            prefetch_latency: defaults::PREFETCH_LATENCY,
            max_pending: defaults::MAX_PENDING,
        }
    }
}

/// Offset prefetcher parameters.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PrefetcherConfig {
    /// When false, accesses reach the cache but the prefetcher never sees them
    #[serde(default = "PrefetcherConfig::default_enabled")]
    pub enabled: bool,

    /// Offset (in blocks) active before the first training phase completes
    #[serde(default)]
    pub initial_offset: u64,
}

impl PrefetcherConfig {
    /// Prefetching is on unless explicitly disabled.
    fn default_enabled() -> bool {
        true
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_offset != OFFSET_DISABLED
            && !OffsetCandidateSet::new().contains(self.initial_offset)
        {
            return Err(ConfigError::InitialOffset(self.initial_offset));
        }
        Ok(())
    }
}

impl Default for PrefetcherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            initial_offset: OFFSET_DISABLED,
        }
    }
}
