// JSON handlers for the analysis API.
//
// Error policy: InvalidInput maps to 422 with a human-readable reason.
// Provider failures are already folded into the result as degraded
// dimensions and never change the status code.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::analyzer::{
    Analysis, AnalysisMetadata, AnalysisRequest, HeadlineComparison, QuickAnalysis,
};
use crate::bias::BiasAssessment;
use crate::error::LitmusError;
use crate::patterns::PatternReport;
use crate::providers::SubSignal;
use crate::web::AppState;

/// GET / — health check, always 200.
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
}

#[derive(Deserialize)]
pub struct QuickAnalyzeRequest {
    pub text: String,
}

#[derive(Serialize)]
pub struct QuickAnalyzeResponse {
    pub score: u8,
    pub indicator: &'static str,
    pub glyph: &'static str,
    pub explanation: Vec<String>,
    pub tip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inferred_bias_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias_target: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matched_keywords: Vec<String>,
}

impl From<QuickAnalysis> for QuickAnalyzeResponse {
    fn from(analysis: QuickAnalysis) -> Self {
        Self {
            score: analysis.trust.score,
            indicator: analysis.trust.indicator.as_str(),
            glyph: analysis.trust.indicator.glyph(),
            explanation: analysis.trust.explanation,
            tip: analysis.trust.tip,
            inferred_bias_type: analysis.assessment.inferred_bias_type,
            bias_category: analysis.assessment.bias_category,
            bias_target: analysis.assessment.bias_target,
            matched_keywords: analysis.assessment.matched_keywords,
        }
    }
}

/// POST /quick_analyze — pattern-only fast path.
pub async fn quick_analyze(
    State(state): State<AppState>,
    Json(request): Json<QuickAnalyzeRequest>,
) -> Response {
    match state.analyzer.quick_analyze(&request.text) {
        Ok(analysis) => {
            (StatusCode::OK, Json(QuickAnalyzeResponse::from(analysis))).into_response()
        }
        Err(e) => error_response(e),
    }
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub trust_score: u8,
    pub indicator: &'static str,
    pub glyph: &'static str,
    pub explanation: Vec<String>,
    pub tip: String,
    pub primary_bias_type: Option<String>,
    pub trust_level: &'static str,
    pub risk_factors: Vec<&'static str>,
    pub summary: &'static str,
    pub metadata: AnalysisMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_sub_analyses: Option<DetailedSubAnalyses>,
}

#[derive(Serialize)]
pub struct DetailedSubAnalyses {
    pub sentiment: SubSignal,
    pub emotion: SubSignal,
    pub toxicity: SubSignal,
    pub bias_type: SubSignal,
    pub bias_assessment: BiasAssessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<PatternReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headline_comparison: Option<HeadlineComparison>,
}

fn shape_analysis(analysis: Analysis, request: &AnalysisRequest) -> AnalyzeResponse {
    let detailed = if request.include_detailed_results {
        Some(DetailedSubAnalyses {
            sentiment: analysis.signals.sentiment,
            emotion: analysis.signals.emotion,
            toxicity: analysis.signals.toxicity,
            bias_type: analysis.signals.bias_type,
            bias_assessment: analysis.assessment,
            patterns: request.include_patterns.then_some(analysis.report),
            headline_comparison: analysis.headline_comparison,
        })
    } else {
        None
    };

    AnalyzeResponse {
        trust_score: analysis.trust.score,
        indicator: analysis.trust.indicator.as_str(),
        glyph: analysis.trust.indicator.glyph(),
        explanation: analysis.trust.explanation,
        tip: analysis.trust.tip,
        primary_bias_type: analysis.trust.primary_bias_type,
        trust_level: analysis.trust.trust_level,
        risk_factors: analysis.trust.risk_factors,
        summary: analysis.trust.summary,
        metadata: analysis.metadata,
        detailed_sub_analyses: detailed,
    }
}

/// POST /analyze — full model-backed analysis.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalysisRequest>,
) -> Response {
    match state.analyzer.analyze(&request).await {
        Ok(analysis) => {
            (StatusCode::OK, Json(shape_analysis(analysis, &request))).into_response()
        }
        Err(e) => error_response(e),
    }
}

fn error_response(error: LitmusError) -> Response {
    let status = match error {
        LitmusError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        LitmusError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(serde_json::json!({ "error": error.reason() })),
    )
        .into_response()
}
