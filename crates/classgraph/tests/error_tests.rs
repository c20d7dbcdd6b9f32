//! Tests for analysis and generation error types

use classgraph::analysis::Analyzer;
use classgraph::{
    encode, generate, AnalysisError, AnalysisErrorCode, AnalysisOptions, AnalysisResult,
    DiagramType, EncodeOptions, Entity, GenerationError, PipelineError, SNIPPET_LIMIT,
};

#[test]
fn test_invalid_options_error() {
    let error = AnalysisError::invalid_options("max_depth must be between 1 and 10, got 0");
    let error_msg = format!("{}", error);
    assert!(error_msg.contains("INVALID_OPTIONS"));
    assert!(error_msg.contains("got 0"));
    assert!(error.snippet.is_empty());
}

#[test]
fn test_parse_error_snippet_is_truncated() {
    let source = "x".repeat(SNIPPET_LIMIT * 2);
    let error = AnalysisError::parse_error("no tree", &source);
    assert_eq!(error.code, AnalysisErrorCode::Parse);
    assert_eq!(error.snippet.len(), SNIPPET_LIMIT + 3);
    assert!(error.snippet.ends_with("..."));
}

#[test]
fn test_language_error_code() {
    let error = AnalysisError::language_error("grammar version mismatch");
    assert_eq!(error.code.as_str(), "LANGUAGE_ERROR");
}

#[test]
fn test_depth_bounds_are_enforced() {
    for depth in [0, 11, 100] {
        let error = Analyzer::default()
            .with_options(AnalysisOptions::new().with_max_depth(depth))
            .analyze("class A {}")
            .unwrap_err();
        assert_eq!(error.code, AnalysisErrorCode::InvalidOptions);
    }
    for depth in [1, 10] {
        assert!(Analyzer::default()
            .with_options(AnalysisOptions::new().with_max_depth(depth))
            .analyze("class A {}")
            .is_ok());
    }
}

#[test]
fn test_unsupported_diagram_type_has_no_text() {
    let result = AnalysisResult::from_parts(vec![Entity::class("A")], Vec::new());
    for diagram_type in [DiagramType::Sequence, DiagramType::Er, DiagramType::State] {
        let error = encode(&result, &EncodeOptions::new(diagram_type)).unwrap_err();
        assert_eq!(error.code(), "INVALID_DIAGRAM_TYPE");
        match error {
            GenerationError::InvalidDiagramType {
                requested,
                supported,
            } => {
                assert_eq!(requested, diagram_type);
                assert_eq!(supported, "class, flowchart");
            }
            other => panic!("Expected InvalidDiagramType, got {other:?}"),
        }
    }
}

#[test]
fn test_pipeline_error_wraps_both_stages() {
    let error = generate("class A {}", &EncodeOptions::new(DiagramType::Er)).unwrap_err();
    assert!(matches!(error, PipelineError::Generation(_)));
    assert_eq!(error.code(), "INVALID_DIAGRAM_TYPE");
}

#[test]
fn test_error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<AnalysisError>();
    assert_error::<GenerationError>();
    assert_error::<PipelineError>();
}
