// Model download helper for the local ONNX classifiers.
//
// Downloads each model's ONNX export and tokenizer from HuggingFace into
// a platform-appropriate directory (~/.local/share/litmus/models/ on
// Linux) so they persist across runs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::onnx::{ModelSpec, LOCAL_MODELS};

const MODEL_FILE: &str = "model.onnx";
const TOKENIZER_FILE: &str = "tokenizer.json";

/// Returns the default directory for storing model files.
pub fn default_model_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("litmus")
        .join("models")
}

/// Check that every local model has both required files on disk.
pub fn model_files_present(dir: &Path) -> bool {
    LOCAL_MODELS.iter().all(|spec| {
        let model_dir = dir.join(spec.name);
        model_dir.join(MODEL_FILE).exists() && model_dir.join(TOKENIZER_FILE).exists()
    })
}

/// Download all local classifier models. Shows progress bars for the
/// large files and skips anything that already exists.
pub async fn download_models(dir: &Path) -> Result<()> {
    for spec in LOCAL_MODELS {
        download_one(dir, spec).await?;
    }
    Ok(())
}

async fn download_one(dir: &Path, spec: &ModelSpec) -> Result<()> {
    println!("\n{} ({}):", spec.name, spec.repo);

    let model_dir = dir.join(spec.name);
    std::fs::create_dir_all(&model_dir)
        .with_context(|| format!("Failed to create model directory: {}", model_dir.display()))?;

    let base = format!("https://huggingface.co/{}/resolve/main", spec.repo);

    let tokenizer_path = model_dir.join(TOKENIZER_FILE);
    if tokenizer_path.exists() {
        info!(model = spec.name, "Tokenizer already exists, skipping");
        println!("  {} (already exists)", TOKENIZER_FILE);
    } else {
        println!("  Downloading {}...", TOKENIZER_FILE);
        download_file(&format!("{base}/{TOKENIZER_FILE}"), &tokenizer_path, false).await?;
    }

    let model_path = model_dir.join(MODEL_FILE);
    if model_path.exists() {
        info!(model = spec.name, "Model already exists, skipping");
        println!("  {} (already exists)", MODEL_FILE);
    } else {
        println!("  Downloading {}...", MODEL_FILE);
        download_file(&format!("{base}/onnx/{MODEL_FILE}"), &model_path, true).await?;
    }

    Ok(())
}

/// Download a single file from a URL to a local path.
/// If `show_progress` is true, display a progress bar.
async fn download_file(url: &str, dest: &Path, show_progress: bool) -> Result<()> {
    let client = reqwest::Client::new();
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to download {}", url))?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status {}: {}", response.status(), url);
    }

    let total_size = response.content_length();

    let pb = if show_progress {
        let pb = if let Some(size) = total_size {
            let pb = ProgressBar::new(size);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("    [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
                    .expect("valid template")
                    .progress_chars("=> "),
            );
            pb
        } else {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("    {spinner} {bytes}")
                    .expect("valid template"),
            );
            pb
        };
        Some(pb)
    } else {
        None
    };

    let bytes = response
        .bytes()
        .await
        .context("Failed to read response body")?;

    if let Some(ref pb) = pb {
        pb.set_position(bytes.len() as u64);
    }

    std::fs::write(dest, &bytes).with_context(|| format!("Failed to write {}", dest.display()))?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    info!("Downloaded {} to {}", url, dest.display());
    Ok(())
}
