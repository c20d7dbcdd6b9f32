//! Tests for logging functionality
//!
//! These tests verify that logging initialization works correctly
//! with different configurations. Only one global subscriber can be
//! installed per process, so later calls may fail without panicking.

use classgraph::core::logging::{init_logging, LogFormat, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("xml").is_err());
}

#[test]
fn test_log_format_variants() {
    let variants = LogFormat::variants();
    assert_eq!(variants, &["compact", "pretty", "json"]);
}

#[test]
fn test_env_variable_names() {
    assert_eq!(LOG_LEVEL_ENV, "CLASSGRAPH_LOG_LEVEL");
    assert_eq!(LOG_FORMAT_ENV, "CLASSGRAPH_LOG_FORMAT");
}

#[test]
fn test_init_logging_with_levels() {
    let _ = init_logging(Some("trace"), Some("compact"));
    let _ = init_logging(Some("warn"), Some("compact"));
    let _ = init_logging(Some("off"), Some("compact"));
    let _ = init_logging(Some("classgraph::analysis=debug"), Some("json"));
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_pipeline_runs_with_subscriber_installed() {
    let _ = init_logging(Some("trace"), Some("pretty"));
    let diagram = classgraph::generate(
        "class A {}\nclass B extends A {}",
        &classgraph::EncodeOptions::default(),
    )
    .unwrap();
    assert!(diagram.diagram_text.contains("B --|> A"));
}
