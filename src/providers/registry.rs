// Process-wide model cache.
//
// Model weights load once and are shared read-only by every subsequent
// request. The map mutex doubles as the load-once guard: if two first
// requests race for the same model, the second blocks until the first
// load finishes and then reuses it — concurrent identical loads cannot
// corrupt the cache.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::info;

use super::onnx::{ModelSpec, OnnxTextClassifier};

#[derive(Default)]
pub struct ModelRegistry {
    models: Mutex<HashMap<&'static str, Arc<OnnxTextClassifier>>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a loaded classifier, loading it on first use.
    ///
    /// Blocking (file IO + session build on a miss) — call from
    /// spawn_blocking, never directly on the async runtime.
    pub fn get_or_load(
        &self,
        model_dir: &Path,
        spec: &'static ModelSpec,
    ) -> Result<Arc<OnnxTextClassifier>> {
        let mut models = self
            .models
            .lock()
            .map_err(|e| anyhow::anyhow!("Model registry lock poisoned: {}", e))?;

        if let Some(classifier) = models.get(spec.name) {
            return Ok(Arc::clone(classifier));
        }

        info!(model = spec.name, "Loading classifier (first use)");
        let classifier = Arc::new(OnnxTextClassifier::load(model_dir, spec)?);
        models.insert(spec.name, Arc::clone(&classifier));
        Ok(classifier)
    }

    /// Names of models loaded so far, for analysis metadata.
    pub fn loaded_models(&self) -> Vec<&'static str> {
        match self.models.lock() {
            Ok(models) => {
                let mut names: Vec<&'static str> = models.keys().copied().collect();
                names.sort_unstable();
                names
            }
            Err(_) => Vec::new(),
        }
    }
}
