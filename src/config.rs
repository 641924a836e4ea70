use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;

/// Which classifier backend powers the ML signal providers.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderBackend {
    /// Local ONNX models (default) — no API key needed, no rate limits
    Onnx,
    /// HuggingFace inference API — requires HF_API_TOKEN
    Remote,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
/// Everything has a default except the HF token, which is only needed
/// for the remote backend and the zero-shot bias-type provider.
pub struct Config {
    /// Which ML backend to use for sentiment/emotion/toxicity (default: Onnx)
    pub provider_backend: ProviderBackend,
    /// Directory containing downloaded ONNX model files
    pub model_dir: PathBuf,
    /// HuggingFace API token (empty string when unset)
    pub hf_api_token: String,
    /// HuggingFace inference API base URL
    pub hf_api_url: String,
    /// Per-provider call timeout; on expiry the dimension degrades
    pub provider_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let provider_backend = match env::var("LITMUS_SCORER").as_deref() {
            Ok("remote") => ProviderBackend::Remote,
            // "onnx" or unset both default to local ONNX
            _ => ProviderBackend::Onnx,
        };

        let model_dir = env::var("LITMUS_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::providers::download::default_model_dir());

        let timeout_ms = env::var("LITMUS_PROVIDER_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10_000);

        Ok(Self {
            provider_backend,
            model_dir,
            hf_api_token: env::var("HF_API_TOKEN").unwrap_or_default(),
            hf_api_url: env::var("HF_API_URL")
                .unwrap_or_else(|_| "https://api-inference.huggingface.co".to_string()),
            provider_timeout: Duration::from_millis(timeout_ms),
        })
    }

    /// Check that the HF token is configured.
    /// Call this before any operation that goes through the inference API.
    pub fn require_hf_token(&self) -> Result<()> {
        if self.hf_api_token.is_empty() {
            anyhow::bail!(
                "HF_API_TOKEN not set. Add it to your .env file to use the \
                 remote backend or the zero-shot bias-type provider."
            );
        }
        Ok(())
    }

    /// Validate that the chosen backend has what it needs.
    /// For ONNX: model files must exist (or the user should run download-model).
    /// For remote: the API token must be set.
    pub fn require_backend(&self) -> Result<()> {
        match self.provider_backend {
            ProviderBackend::Onnx => {
                if !crate::providers::download::model_files_present(&self.model_dir) {
                    anyhow::bail!(
                        "ONNX model files not found in {}\n\
                         Run `litmus download-model` to download them.\n\
                         Or set LITMUS_SCORER=remote to use the HuggingFace API instead.",
                        self.model_dir.display()
                    );
                }
                Ok(())
            }
            ProviderBackend::Remote => self.require_hf_token(),
        }
    }
}
