// Local ONNX text classifiers.
//
// One generic single-label sequence classifier covers all three local
// models: sentiment (3 labels), emotion (6 labels), and toxicity
// (2 labels). Inference runs entirely on the local CPU — no API calls,
// no rate limits, no network dependency.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::debug;

use super::registry::ModelRegistry;
use super::{detection_rule, SignalKind, SignalProvider, SubSignal};

/// Everything needed to locate, load, and interpret one classifier.
pub struct ModelSpec {
    /// Registry key and subdirectory name under the model dir.
    pub name: &'static str,
    /// HuggingFace repo the files come from.
    pub repo: &'static str,
    /// Output labels in the order the model emits logits.
    pub labels: &'static [&'static str],
    /// Token id used for right-padding (1 for RoBERTa, 0 for DistilBERT).
    pub pad_id: i64,
}

/// cardiffnlp/twitter-roberta-base-sentiment-latest
pub const SENTIMENT_MODEL: ModelSpec = ModelSpec {
    name: "twitter-roberta-base-sentiment-latest",
    repo: "cardiffnlp/twitter-roberta-base-sentiment-latest",
    labels: &["negative", "neutral", "positive"],
    pad_id: 1,
};

/// bhadresh-savani/distilbert-base-uncased-emotion
pub const EMOTION_MODEL: ModelSpec = ModelSpec {
    name: "distilbert-base-uncased-emotion",
    repo: "bhadresh-savani/distilbert-base-uncased-emotion",
    labels: &["sadness", "joy", "love", "anger", "fear", "surprise"],
    pad_id: 0,
};

/// martin-ha/toxic-comment-model
pub const TOXICITY_MODEL: ModelSpec = ModelSpec {
    name: "toxic-comment-model",
    repo: "martin-ha/toxic-comment-model",
    labels: &["non-toxic", "toxic"],
    pad_id: 0,
};

pub const LOCAL_MODELS: [&ModelSpec; 3] = [&SENTIMENT_MODEL, &EMOTION_MODEL, &TOXICITY_MODEL];

/// A loaded single-label classifier. Session sits behind Arc<Mutex> because
/// ort::Session::run takes &mut self and the classifier is shared across
/// requests via the registry.
pub struct OnnxTextClassifier {
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
    labels: &'static [&'static str],
    pad_id: i64,
}

impl OnnxTextClassifier {
    /// Load the model and tokenizer from `<model_dir>/<spec.name>/`.
    ///
    /// Expects `model.onnx` and `tokenizer.json` to exist. Run
    /// `litmus download-model` first if they don't.
    pub fn load(model_dir: &Path, spec: &ModelSpec) -> Result<Self> {
        let dir = model_dir.join(spec.name);
        let model_path = dir.join("model.onnx");
        let tokenizer_path = dir.join("tokenizer.json");

        if !model_path.exists() {
            anyhow::bail!(
                "Model file not found: {}\nRun `litmus download-model` to download it.",
                model_path.display()
            );
        }
        if !tokenizer_path.exists() {
            anyhow::bail!(
                "Tokenizer file not found: {}\nRun `litmus download-model` to download it.",
                tokenizer_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        debug!(model = spec.name, "Loaded ONNX classifier from {}", dir.display());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
            labels: spec.labels,
            pad_id: spec.pad_id,
        })
    }

    /// Tokenize, run one forward pass, and softmax the logits.
    /// Blocking — callers offload through spawn_blocking.
    pub fn classify_blocking(&self, text: &str) -> Result<(String, f64)> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

        let ids = encoding.get_ids();
        let mask = encoding.get_attention_mask();
        let seq_len = ids.len().max(1);

        let mut input_ids: Vec<i64> = ids.iter().map(|&id| id as i64).collect();
        let mut attention_mask: Vec<i64> = mask.iter().map(|&m| m as i64).collect();
        if input_ids.is_empty() {
            input_ids.push(self.pad_id);
            attention_mask.push(0);
        }

        let shape = [1i64, seq_len as i64];
        let input_ids_tensor =
            Tensor::from_array((shape, input_ids)).context("Failed to create input_ids tensor")?;
        let attention_mask_tensor = Tensor::from_array((shape, attention_mask))
            .context("Failed to create attention_mask tensor")?;

        let logits = {
            let mut session = self
                .session
                .lock()
                .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

            let outputs = session
                .run(ort::inputs! {
                    "input_ids" => input_ids_tensor,
                    "attention_mask" => attention_mask_tensor
                })
                .context("ONNX inference failed")?;

            // Output shape: [1, num_labels] — raw logits
            let (_shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .context("Failed to extract output tensor")?;
            data.to_vec()
        };

        if logits.len() < self.labels.len() {
            anyhow::bail!(
                "Model returned {} logits, expected {}",
                logits.len(),
                self.labels.len()
            );
        }

        let probs = softmax(&logits[..self.labels.len()]);
        let (top_idx, top_prob) = probs
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .expect("labels are never empty");

        Ok((self.labels[top_idx].to_string(), *top_prob))
    }
}

/// Softmax over raw logits, in f64 for stable exponentials.
fn softmax(logits: &[f32]) -> Vec<f64> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max) as f64;
    let exps: Vec<f64> = logits.iter().map(|&l| (l as f64 - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

/// SignalProvider backed by a lazily-loaded local ONNX model.
pub struct OnnxSignalProvider {
    kind: SignalKind,
    spec: &'static ModelSpec,
    registry: Arc<ModelRegistry>,
    model_dir: PathBuf,
}

impl OnnxSignalProvider {
    pub fn new(
        kind: SignalKind,
        spec: &'static ModelSpec,
        registry: Arc<ModelRegistry>,
        model_dir: PathBuf,
    ) -> Self {
        Self {
            kind,
            spec,
            registry,
            model_dir,
        }
    }
}

#[async_trait]
impl SignalProvider for OnnxSignalProvider {
    fn kind(&self) -> SignalKind {
        self.kind
    }

    async fn classify(&self, text: &str) -> Result<SubSignal> {
        let kind = self.kind;
        let spec = self.spec;
        let registry = Arc::clone(&self.registry);
        let model_dir = self.model_dir.clone();
        let text = text.to_string();

        // Model load (first call only) and inference are both CPU-bound;
        // keep them off the async runtime.
        tokio::task::spawn_blocking(move || {
            let classifier = registry.get_or_load(&model_dir, spec)?;
            let (label, confidence) = classifier.classify_blocking(&text)?;
            let detected = detection_rule(kind, &label, confidence);

            debug!(
                kind = kind.as_str(),
                label = %label,
                confidence,
                detected,
                text_preview = %crate::output::truncate_chars(&text, 50),
                "ONNX classified text"
            );

            Ok(SubSignal::ok(kind, label, confidence, detected))
        })
        .await
        .context("spawn_blocking panicked")?
    }
}
