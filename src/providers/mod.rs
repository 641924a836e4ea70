// ML signal providers — trait-based abstraction for swappable classifiers.
//
// Each provider wraps one pretrained classifier (sentiment, emotion,
// toxicity, bias type) behind the same capability: classify text, return
// a label plus confidence. Providers fail independently and their failures
// are data (an error-tagged SubSignal), never exceptions crossing the
// aggregation boundary.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod download;
pub mod onnx;
pub mod registry;
pub mod remote;

/// The analysis dimension a provider covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Sentiment,
    Emotion,
    Toxicity,
    BiasType,
}

impl SignalKind {
    pub const ALL: [SignalKind; 4] = [
        SignalKind::Sentiment,
        SignalKind::Emotion,
        SignalKind::Toxicity,
        SignalKind::BiasType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::Sentiment => "sentiment",
            SignalKind::Emotion => "emotion",
            SignalKind::Toxicity => "toxicity",
            SignalKind::BiasType => "bias_type",
        }
    }
}

/// The output contract of one provider: label plus native confidence.
///
/// `error` set means the provider failed or timed out and this dimension
/// is degraded (unknown, not clean). `skipped` means the dimension was
/// deliberately not run (quick mode) — no deduction, no degradation note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubSignal {
    pub kind: SignalKind,
    pub label: String,
    /// Provider-native confidence, clamped to [0,1]. Confidences are not
    /// calibrated across model families — the aggregator only compares
    /// them against per-kind thresholds, never against each other.
    pub confidence: f64,
    pub detected: bool,
    pub error: Option<String>,
    pub skipped: bool,
}

impl SubSignal {
    pub fn ok(kind: SignalKind, label: impl Into<String>, confidence: f64, detected: bool) -> Self {
        Self {
            kind,
            label: label.into(),
            confidence: clamp_confidence(confidence),
            detected,
            error: None,
            skipped: false,
        }
    }

    pub fn errored(kind: SignalKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            label: "unknown".to_string(),
            confidence: 0.0,
            detected: false,
            error: Some(message.into()),
            skipped: false,
        }
    }

    pub fn skipped(kind: SignalKind) -> Self {
        Self {
            kind,
            label: "unavailable".to_string(),
            confidence: 0.0,
            detected: false,
            error: None,
            skipped: true,
        }
    }

    /// Whether the aggregator may base deductions on this signal.
    pub fn is_usable(&self) -> bool {
        self.error.is_none() && !self.skipped
    }
}

/// Out-of-range or NaN provider scores are pulled into [0,1] rather
/// than propagated.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Toxicity probability at or above this counts as a detection.
pub const TOXICITY_THRESHOLD: f64 = 0.6;

/// Per-kind detection rule applied to a classified label+confidence.
/// Shared by the local and remote backends so both produce identical
/// SubSignals for the same model output.
pub fn detection_rule(kind: SignalKind, label: &str, confidence: f64) -> bool {
    match kind {
        SignalKind::Sentiment => label != "neutral",
        SignalKind::Emotion => crate::scoring::trust::is_emotionally_charged(label, confidence),
        SignalKind::Toxicity => label == "toxic" && confidence >= TOXICITY_THRESHOLD,
        SignalKind::BiasType => label != "no bias",
    }
}

/// Trait for classifying text into one signal dimension. Implementations
/// must be async because providers are either HTTP calls or CPU-bound
/// inference offloaded through spawn_blocking.
#[async_trait]
pub trait SignalProvider: Send + Sync {
    /// Which dimension this provider covers.
    fn kind(&self) -> SignalKind;

    /// Classify a single text. Errors are caught by the orchestrator and
    /// turned into error-tagged SubSignals.
    async fn classify(&self, text: &str) -> Result<SubSignal>;
}

/// The complete signal set the trust engine scores. Every dimension is
/// always present — absence is an explicit skipped or errored SubSignal,
/// never a missing key.
#[derive(Debug, Clone, Serialize)]
pub struct SignalSet {
    pub sentiment: SubSignal,
    pub emotion: SubSignal,
    pub toxicity: SubSignal,
    pub bias_type: SubSignal,
}

impl SignalSet {
    /// All dimensions deliberately skipped — the quick-mode signal set.
    pub fn all_skipped() -> Self {
        Self {
            sentiment: SubSignal::skipped(SignalKind::Sentiment),
            emotion: SubSignal::skipped(SignalKind::Emotion),
            toxicity: SubSignal::skipped(SignalKind::Toxicity),
            bias_type: SubSignal::skipped(SignalKind::BiasType),
        }
    }

    /// Place a collected signal into its slot.
    pub fn insert(&mut self, signal: SubSignal) {
        match signal.kind {
            SignalKind::Sentiment => self.sentiment = signal,
            SignalKind::Emotion => self.emotion = signal,
            SignalKind::Toxicity => self.toxicity = signal,
            SignalKind::BiasType => self.bias_type = signal,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubSignal> {
        [&self.sentiment, &self.emotion, &self.toxicity, &self.bias_type].into_iter()
    }

    /// Dimensions that attempted to run and failed, in fixed kind order.
    pub fn degraded(&self) -> Vec<SignalKind> {
        self.iter()
            .filter(|s| s.error.is_some())
            .map(|s| s.kind)
            .collect()
    }
}
