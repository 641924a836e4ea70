// HuggingFace inference API providers.
//
// The remote backend mirrors the local models over HTTP (same repos,
// same labels), and the zero-shot bias-type provider has no local
// counterpart — bart-large-mnli is too large to ship, so bias-type
// classification is always remote. Failures degrade to an error-tagged
// SubSignal upstream; this module just reports them.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{clamp_confidence, detection_rule, SignalKind, SignalProvider, SubSignal};

/// Candidate labels for zero-shot bias-type classification.
const BIAS_TYPE_LABELS: [&str; 6] = [
    "political bias",
    "ethnic bias",
    "religious bias",
    "gender bias",
    "social bias",
    "no bias",
];

/// Text-classification provider backed by the HF inference API.
pub struct RemoteClassifier {
    client: Client,
    base_url: String,
    api_token: String,
    repo: &'static str,
    kind: SignalKind,
}

impl RemoteClassifier {
    pub fn new(kind: SignalKind, repo: &'static str, base_url: String, api_token: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_token,
            repo,
            kind,
        }
    }
}

#[async_trait]
impl SignalProvider for RemoteClassifier {
    fn kind(&self) -> SignalKind {
        self.kind
    }

    async fn classify(&self, text: &str) -> Result<SubSignal> {
        let url = format!("{}/models/{}", self.base_url, self.repo);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&ClassifyRequest { inputs: text })
            .send()
            .await
            .with_context(|| format!("Failed to call inference API for {}", self.repo))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Inference API returned {} for {}: {}", status, self.repo, body);
        }

        // Response shape: [[{"label": ..., "score": ...}, ...]]
        let scored: Vec<Vec<LabelScore>> = response
            .json()
            .await
            .context("Failed to parse inference API response")?;

        let top = scored
            .first()
            .and_then(|row| {
                row.iter()
                    .max_by(|a, b| a.score.total_cmp(&b.score))
            })
            .context("Inference API returned no predictions")?;

        let label = top.label.to_lowercase();
        let confidence = clamp_confidence(top.score);
        let detected = detection_rule(self.kind, &label, confidence);

        debug!(
            kind = self.kind.as_str(),
            label = %label,
            confidence,
            "Remote classifier scored text"
        );

        Ok(SubSignal::ok(self.kind, label, confidence, detected))
    }
}

/// Zero-shot bias-type provider (facebook/bart-large-mnli).
pub struct ZeroShotBiasProvider {
    client: Client,
    base_url: String,
    api_token: String,
}

impl ZeroShotBiasProvider {
    pub fn new(base_url: String, api_token: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
            api_token,
        }
    }
}

#[async_trait]
impl SignalProvider for ZeroShotBiasProvider {
    fn kind(&self) -> SignalKind {
        SignalKind::BiasType
    }

    async fn classify(&self, text: &str) -> Result<SubSignal> {
        if self.api_token.is_empty() {
            anyhow::bail!("HF_API_TOKEN not set — bias-type classification unavailable");
        }

        let url = format!("{}/models/facebook/bart-large-mnli", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_token)
            .json(&ZeroShotRequest {
                inputs: text,
                parameters: ZeroShotParameters {
                    candidate_labels: &BIAS_TYPE_LABELS,
                },
            })
            .send()
            .await
            .context("Failed to call zero-shot inference API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Zero-shot API returned {}: {}", status, body);
        }

        let result: ZeroShotResponse = response
            .json()
            .await
            .context("Failed to parse zero-shot response")?;

        let (label, score) = result
            .labels
            .first()
            .zip(result.scores.first())
            .context("Zero-shot API returned no labels")?;

        let confidence = clamp_confidence(*score);
        // High-confidence "no bias" collapses to neutral; anything else
        // keeps the predicted type.
        let label = if label == "no bias" && confidence > 0.7 {
            "neutral".to_string()
        } else {
            label.clone()
        };
        let detected = detection_rule(SignalKind::BiasType, &label, confidence) && label != "neutral";

        debug!(label = %label, confidence, "Zero-shot bias type scored");

        Ok(SubSignal::ok(SignalKind::BiasType, label, confidence, detected))
    }
}

// --- inference API request/response types ---

#[derive(Serialize)]
struct ClassifyRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [&'a str],
}

#[derive(Deserialize)]
struct ZeroShotResponse {
    labels: Vec<String>,
    scores: Vec<f64>,
}
