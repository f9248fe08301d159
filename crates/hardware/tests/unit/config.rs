//! # Configuration Tests
//!
//! Tests for configuration defaults, JSON deserialization, and validation.

use offsetpf_core::common::ConfigError;
use offsetpf_core::config::*;
use pretty_assertions::assert_eq;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(config.prefetcher.enabled);
    assert_eq!(config.prefetcher.initial_offset, 0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_cache_config_defaults() {
    let cache = CacheConfig::default();
    assert_eq!(cache.size_bytes, 32 * 1024);
    assert_eq!(cache.line_bytes, 64);
    assert_eq!(cache.ways, 8);
    assert_eq!(cache.prefetch_latency, 0);
    assert_eq!(cache.max_pending, 64);
}

#[test]
fn test_empty_json_is_default() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn test_partial_json_keeps_other_defaults() {
    let config = Config::from_json(r#"{ "cache": { "ways": 4 } }"#).unwrap();
    assert_eq!(config.cache.ways, 4);
    assert_eq!(config.cache.size_bytes, 32 * 1024);
    assert_eq!(config.prefetcher, PrefetcherConfig::default());
}

#[test]
fn test_prefetcher_section() {
    let config =
        Config::from_json(r#"{ "prefetcher": { "enabled": false, "initial_offset": 256 } }"#)
            .unwrap();
    assert!(!config.prefetcher.enabled);
    assert_eq!(config.prefetcher.initial_offset, 256);
}

#[test]
fn test_line_size_must_be_power_of_two() {
    let err = Config::from_json(r#"{ "cache": { "line_bytes": 48 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::LineSize(48)));
}

#[test]
fn test_zero_ways_rejected() {
    let err = Config::from_json(r#"{ "cache": { "ways": 0 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroWays));
}

#[test]
fn test_partial_set_rejected() {
    let err = Config::from_json(r#"{ "cache": { "size_bytes": 1000, "ways": 8 } }"#).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Geometry {
            size: 1000,
            set_bytes: 512
        }
    ));
}

#[test]
fn test_initial_offset_must_be_candidate() {
    let err = Config::from_json(r#"{ "prefetcher": { "initial_offset": 7 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InitialOffset(7)));
}

#[test]
fn test_malformed_json() {
    let err = Config::from_json("{ cache: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_set_size_overflow_rejected() {
    let err = Config::from_json(r#"{ "cache": { "line_bytes": 64, "ways": 288230376151711744 } }"#)
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Geometry {
            set_bytes: usize::MAX,
            ..
        }
    ));
}

#[test]
fn test_huge_prefetch_latency_accepted() {
    let config = Config::from_json(r#"{ "cache": { "prefetch_latency": 18446744073709551615 } }"#)
        .unwrap();
    assert_eq!(config.cache.prefetch_latency, u64::MAX);
}
