// Analysis orchestrator.
//
// Owns one request's lifecycle: validate input, run the pattern scan and
// keyword bias inference (always), fan out to the ML signal providers
// (deep mode only), and feed everything into the trust score engine.
// Quick and deep mode share the identical engine and weights; quick mode
// simply scores with every provider dimension marked skipped.
//
// Provider failures and timeouts degrade a single dimension and never
// abort the request — a total provider blackout still yields a valid
// pattern-only result with degradation notes.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::bias::{self, BiasAssessment};
use crate::config::{Config, ProviderBackend};
use crate::error::LitmusError;
use crate::patterns::{PatternReport, PatternSet};
use crate::providers::onnx::{OnnxSignalProvider, EMOTION_MODEL, SENTIMENT_MODEL, TOXICITY_MODEL};
use crate::providers::registry::ModelRegistry;
use crate::providers::remote::{RemoteClassifier, ZeroShotBiasProvider};
use crate::providers::{SignalKind, SignalProvider, SignalSet, SubSignal};
use crate::scoring::trust::{compute_trust_score, TrustScoreResult, TrustWeights};

/// Maximum accepted text length, in characters.
pub const MAX_TEXT_CHARS: usize = 10_000;

/// A deep-mode analysis request.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
    pub headline: Option<String>,
    #[serde(default = "default_true")]
    pub include_patterns: bool,
    #[serde(default)]
    pub include_detailed_results: bool,
}

fn default_true() -> bool {
    true
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            headline: None,
            include_patterns: true,
            include_detailed_results: false,
        }
    }
}

/// Headline-vs-content sentiment comparison (deep mode, headline given).
#[derive(Debug, Clone, Serialize)]
pub struct HeadlineComparison {
    pub headline_sentiment: String,
    pub content_sentiment: String,
    pub mismatch: bool,
}

/// Timing and provenance recorded around a deep analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisMetadata {
    /// Per-component wall time in milliseconds, keyed by component name.
    pub component_timings_ms: BTreeMap<String, f64>,
    pub overall_ms: f64,
    pub text_length: usize,
    pub analysis_timestamp: DateTime<Utc>,
    pub table_version: &'static str,
    pub loaded_models: Vec<&'static str>,
}

/// The immutable result of a deep analysis. Constructed fresh per
/// request, never mutated after assembly.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub trust: TrustScoreResult,
    pub signals: SignalSet,
    pub report: PatternReport,
    pub assessment: BiasAssessment,
    pub headline_comparison: Option<HeadlineComparison>,
    pub metadata: AnalysisMetadata,
}

/// Quick-mode result: pattern scan plus keyword bias inference only.
#[derive(Debug, Clone, Serialize)]
pub struct QuickAnalysis {
    pub trust: TrustScoreResult,
    pub assessment: BiasAssessment,
    pub report: PatternReport,
}

pub struct Analyzer {
    patterns: PatternSet,
    providers: Vec<Arc<dyn SignalProvider>>,
    registry: Arc<ModelRegistry>,
    provider_timeout: Duration,
    weights: TrustWeights,
}

impl Analyzer {
    /// Build the analyzer: compile pattern tables (fatal on a malformed
    /// table) and assemble the provider roster for the configured
    /// backend. Model weights themselves lazy-load on first classify.
    pub fn new(config: &Config) -> Result<Self, LitmusError> {
        let patterns = PatternSet::compile()?;
        let registry = Arc::new(ModelRegistry::new());

        let mut providers: Vec<Arc<dyn SignalProvider>> = Vec::new();
        match config.provider_backend {
            ProviderBackend::Onnx => {
                for (kind, spec) in [
                    (SignalKind::Sentiment, &SENTIMENT_MODEL),
                    (SignalKind::Emotion, &EMOTION_MODEL),
                    (SignalKind::Toxicity, &TOXICITY_MODEL),
                ] {
                    providers.push(Arc::new(OnnxSignalProvider::new(
                        kind,
                        spec,
                        Arc::clone(&registry),
                        config.model_dir.clone(),
                    )));
                }
            }
            ProviderBackend::Remote => {
                for (kind, spec) in [
                    (SignalKind::Sentiment, &SENTIMENT_MODEL),
                    (SignalKind::Emotion, &EMOTION_MODEL),
                    (SignalKind::Toxicity, &TOXICITY_MODEL),
                ] {
                    providers.push(Arc::new(RemoteClassifier::new(
                        kind,
                        spec.repo,
                        config.hf_api_url.clone(),
                        config.hf_api_token.clone(),
                    )));
                }
            }
        }
        // Zero-shot bias type has no local model; always remote.
        providers.push(Arc::new(ZeroShotBiasProvider::new(
            config.hf_api_url.clone(),
            config.hf_api_token.clone(),
        )));

        Ok(Self {
            patterns,
            providers,
            registry,
            provider_timeout: config.provider_timeout,
            weights: TrustWeights::default(),
        })
    }

    /// Quick mode: pattern scan + keyword bias inference, no ML.
    /// Synchronous and sub-millisecond.
    pub fn quick_analyze(&self, text: &str) -> Result<QuickAnalysis, LitmusError> {
        let text = validate_text(text)?;

        let report = self.patterns.scan(text);
        let assessment = bias::infer(&report, text);
        let signals = SignalSet::all_skipped();
        let trust = compute_trust_score(&signals, &report, &assessment, false, &self.weights);

        Ok(QuickAnalysis {
            trust,
            assessment,
            report,
        })
    }

    /// Deep mode: everything quick mode does, plus all signal providers
    /// dispatched concurrently with per-call timeouts.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<Analysis, LitmusError> {
        let text = validate_text(&request.text)?;

        let overall_start = Instant::now();
        let mut timings: BTreeMap<String, f64> = BTreeMap::new();

        let step = Instant::now();
        let report = self.patterns.scan(text);
        timings.insert("pattern_scan".to_string(), elapsed_ms(step));

        let step = Instant::now();
        let assessment = bias::infer(&report, text);
        timings.insert("bias_inference".to_string(), elapsed_ms(step));

        // Fan out to all providers; absence stays explicit because every
        // outcome (ok, error, timeout) lands in its SignalSet slot.
        let mut signals = SignalSet::all_skipped();
        let outcomes = join_all(self.providers.iter().map(|provider| {
            let provider = Arc::clone(provider);
            async move {
                let start = Instant::now();
                let signal = self.call_provider(provider.as_ref(), text).await;
                (signal, elapsed_ms(start))
            }
        }))
        .await;

        for (signal, ms) in outcomes {
            timings.insert(format!("{}_analysis", signal.kind.as_str()), ms);
            signals.insert(signal);
        }

        // Optional headline comparison, using the sentiment provider.
        let step = Instant::now();
        let headline_comparison = match request.headline.as_deref() {
            Some(headline) if !headline.trim().is_empty() => {
                let comparison = self.compare_headline(headline, &signals.sentiment).await;
                timings.insert("headline_comparison".to_string(), elapsed_ms(step));
                comparison
            }
            _ => None,
        };

        let step = Instant::now();
        let trust = compute_trust_score(
            &signals,
            &report,
            &assessment,
            headline_comparison.as_ref().map(|c| c.mismatch).unwrap_or(false),
            &self.weights,
        );
        timings.insert("trust_score".to_string(), elapsed_ms(step));

        let degraded = signals.degraded().len();
        info!(
            score = trust.score,
            indicator = trust.indicator.as_str(),
            degraded_dimensions = degraded,
            "analysis complete"
        );

        Ok(Analysis {
            trust,
            signals,
            report,
            assessment,
            headline_comparison,
            metadata: AnalysisMetadata {
                component_timings_ms: timings,
                overall_ms: elapsed_ms(overall_start),
                text_length: text.chars().count(),
                analysis_timestamp: Utc::now(),
                table_version: crate::patterns::tables::TABLE_VERSION,
                loaded_models: self.registry.loaded_models(),
            },
        })
    }

    /// Call one provider with the configured timeout. Failures become
    /// error-tagged SubSignals — nothing propagates.
    async fn call_provider(&self, provider: &dyn SignalProvider, text: &str) -> SubSignal {
        let kind = provider.kind();
        match tokio::time::timeout(self.provider_timeout, provider.classify(text)).await {
            Ok(Ok(signal)) => signal,
            Ok(Err(e)) => {
                warn!(kind = kind.as_str(), error = %e, "signal provider failed");
                SubSignal::errored(kind, e.to_string())
            }
            Err(_) => {
                warn!(kind = kind.as_str(), "signal provider timed out");
                SubSignal::errored(
                    kind,
                    format!("timed out after {} ms", self.provider_timeout.as_millis()),
                )
            }
        }
    }

    /// Classify the headline's sentiment and compare against the content.
    /// Skipped (None) whenever either side is unavailable.
    async fn compare_headline(
        &self,
        headline: &str,
        content_sentiment: &SubSignal,
    ) -> Option<HeadlineComparison> {
        if !content_sentiment.is_usable() {
            return None;
        }
        let sentiment_provider = self
            .providers
            .iter()
            .find(|p| p.kind() == SignalKind::Sentiment)?;

        let headline_signal = self
            .call_provider(sentiment_provider.as_ref(), headline)
            .await;
        if !headline_signal.is_usable() {
            return None;
        }

        Some(HeadlineComparison {
            mismatch: headline_signal.label != content_sentiment.label,
            headline_sentiment: headline_signal.label,
            content_sentiment: content_sentiment.label.clone(),
        })
    }
}

/// Fail fast on empty or oversized input, before any analysis runs.
fn validate_text(text: &str) -> Result<&str, LitmusError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LitmusError::InvalidInput(
            "text must be non-empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_TEXT_CHARS {
        return Err(LitmusError::InvalidInput(format!(
            "text exceeds the {MAX_TEXT_CHARS} character limit"
        )));
    }
    Ok(trimmed)
}

fn elapsed_ms(start: Instant) -> f64 {
    (start.elapsed().as_secs_f64() * 1000.0 * 100.0).round() / 100.0
}
