// Composition tests — the full analysis flow without any network access.
//
// Quick mode runs end to end as-is. Deep mode is exercised in its
// degraded form: the ONNX providers point at an empty model directory
// and the zero-shot provider has no API token, so every ML dimension
// errors and the verdict falls back to pattern evidence alone.

use std::time::Duration;

use litmus::analyzer::{Analyzer, AnalysisRequest, MAX_TEXT_CHARS};
use litmus::config::{Config, ProviderBackend};
use litmus::error::LitmusError;
use litmus::history::HistoryRecord;
use litmus::scoring::trust::TrustIndicator;

fn offline_analyzer() -> Analyzer {
    let config = Config {
        provider_backend: ProviderBackend::Onnx,
        model_dir: std::env::temp_dir().join("litmus-tests-no-models"),
        hf_api_token: String::new(),
        hf_api_url: "http://127.0.0.1:9".to_string(),
        provider_timeout: Duration::from_secs(2),
    };
    Analyzer::new(&config).expect("analyzer should build without model files")
}

// ============================================================
// Quick mode
// ============================================================

#[test]
fn clickbait_text_lands_below_trustworthy() {
    let analyzer = offline_analyzer();
    let result = analyzer
        .quick_analyze("BREAKING: You won't believe what happened next! Share before they delete this!!!")
        .unwrap();

    assert!(result.trust.score < 70);
    assert_ne!(result.trust.indicator, TrustIndicator::Trustworthy);
    assert!(!result.trust.explanation.is_empty());
    assert!(!result.trust.risk_factors.is_empty());
    // No bias keywords in the text, so the assessment stays empty.
    assert!(result.assessment.bias_category.is_none());
}

#[test]
fn plain_factual_text_is_trustworthy() {
    let analyzer = offline_analyzer();
    let result = analyzer
        .quick_analyze("The central bank raised interest rates by 0.5% on Tuesday.")
        .unwrap();

    assert!(result.trust.score >= 70);
    assert_eq!(result.trust.indicator, TrustIndicator::Trustworthy);
    assert!(result.trust.risk_factors.is_empty());
}

#[test]
fn quick_mode_is_idempotent() {
    let analyzer = offline_analyzer();
    let text = "SHOCKING scandal about apc, share this now, urgent!";
    let a = analyzer.quick_analyze(text).unwrap();
    let b = analyzer.quick_analyze(text).unwrap();

    assert_eq!(a.trust.score, b.trust.score);
    assert_eq!(a.trust.explanation, b.trust.explanation);
    assert_eq!(a.trust.tip, b.trust.tip);
}

#[test]
fn quick_mode_never_adds_degradation_notes() {
    let analyzer = offline_analyzer();
    let result = analyzer
        .quick_analyze("You won't believe this shocking scandal")
        .unwrap();
    assert!(result
        .trust
        .explanation
        .iter()
        .all(|line| !line.starts_with("Note:")));
}

// ============================================================
// Input validation
// ============================================================

#[test]
fn empty_text_is_rejected() {
    let analyzer = offline_analyzer();
    let err = analyzer.quick_analyze("").unwrap_err();
    assert!(matches!(err, LitmusError::InvalidInput(_)));
}

#[test]
fn whitespace_only_text_is_rejected() {
    let analyzer = offline_analyzer();
    let err = analyzer.quick_analyze("   \n\t  ").unwrap_err();
    assert!(matches!(err, LitmusError::InvalidInput(_)));
}

#[test]
fn oversized_text_is_rejected() {
    let analyzer = offline_analyzer();
    let text = "a".repeat(MAX_TEXT_CHARS + 1);
    let err = analyzer.quick_analyze(&text).unwrap_err();
    assert!(matches!(err, LitmusError::InvalidInput(_)));
}

#[tokio::test]
async fn deep_mode_rejects_empty_text_too() {
    let analyzer = offline_analyzer();
    let err = analyzer
        .analyze(&AnalysisRequest::new("  "))
        .await
        .unwrap_err();
    assert!(matches!(err, LitmusError::InvalidInput(_)));
}

// ============================================================
// Deep mode, fully degraded
// ============================================================

#[tokio::test]
async fn deep_mode_survives_total_provider_failure() {
    let analyzer = offline_analyzer();
    let text = "BREAKING: You won't believe what happened next! Share before they delete this!!!";

    let analysis = analyzer.analyze(&AnalysisRequest::new(text)).await.unwrap();

    // Every ML dimension is present and explicitly errored, never missing.
    for signal in analysis.signals.iter() {
        assert!(signal.error.is_some(), "{:?} should be errored", signal.kind);
        assert!(!signal.skipped);
    }

    // The verdict still stands on pattern evidence.
    assert!(analysis.trust.score < 70);
    assert!(!analysis.trust.risk_factors.is_empty());

    // One trailing degradation note per errored dimension.
    let notes = analysis
        .trust
        .explanation
        .iter()
        .filter(|line| line.starts_with("Note:"))
        .count();
    assert_eq!(notes, 4);
}

#[tokio::test]
async fn degraded_deep_mode_scores_match_quick_mode() {
    // With every provider errored, deep mode has exactly the evidence
    // quick mode has, so the scores must agree.
    let analyzer = offline_analyzer();
    let text = "SHOCKING scandal about apc, share this now, urgent!";

    let quick = analyzer.quick_analyze(text).unwrap();
    let deep = analyzer.analyze(&AnalysisRequest::new(text)).await.unwrap();

    assert_eq!(quick.trust.score, deep.trust.score);
    assert_eq!(quick.trust.risk_factors, deep.trust.risk_factors);
}

#[tokio::test]
async fn deep_mode_records_timings_for_every_component() {
    let analyzer = offline_analyzer();
    let analysis = analyzer
        .analyze(&AnalysisRequest::new("A perfectly ordinary sentence."))
        .await
        .unwrap();

    let timings = &analysis.metadata.component_timings_ms;
    for key in [
        "pattern_scan",
        "bias_inference",
        "sentiment_analysis",
        "emotion_analysis",
        "toxicity_analysis",
        "bias_type_analysis",
        "trust_score",
    ] {
        assert!(timings.contains_key(key), "missing timing: {key}");
    }
    assert!(analysis.metadata.overall_ms >= 0.0);
    assert_eq!(analysis.metadata.text_length, 30);
    assert!(analysis.metadata.loaded_models.is_empty());
}

#[tokio::test]
async fn history_rows_are_shaped_from_a_finished_analysis() {
    let analyzer = offline_analyzer();
    let text = "BREAKING: shocking scandal exposed, share this now!";
    let analysis = analyzer.analyze(&AnalysisRequest::new(text)).await.unwrap();

    let row = HistoryRecord::from_analysis("user-42", text, &analysis);
    assert_eq!(row.user_id, "user-42");
    assert_eq!(row.original_text, text);
    assert_eq!(row.trust_score, analysis.trust.score);
    assert!(row.misinformation_flag);
    // Degraded dimensions still produce well-formed rows.
    assert_eq!(row.sentiment, "unknown");
    assert!(row.emotional_language.is_empty());
    assert!(!row.explanation.is_empty());
    assert_eq!(row.created_at, analysis.metadata.analysis_timestamp);
}

#[tokio::test]
async fn headline_comparison_is_skipped_when_sentiment_is_degraded() {
    let analyzer = offline_analyzer();
    let mut request = AnalysisRequest::new("The council approved the budget without debate.");
    request.headline = Some("Council in chaos!".to_string());

    let analysis = analyzer.analyze(&request).await.unwrap();
    assert!(analysis.headline_comparison.is_none());
}
