use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use litmus::analyzer::{Analyzer, AnalysisRequest};
use litmus::config::Config;

/// Litmus: trust scoring and manipulation detection for news text.
///
/// Scores a snippet of text (article, post, tweet) for credibility by
/// fusing ML classifier signals with rule-based pattern detection into
/// one bounded, explainable trust score.
#[derive(Parser)]
#[command(name = "litmus", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis: patterns plus all ML signal providers
    Analyze {
        /// Text to analyze
        text: String,

        /// Optional headline, compared against the content for mismatch
        #[arg(long)]
        headline: Option<String>,

        /// Print the raw sub-analysis details as JSON
        #[arg(long)]
        detailed: bool,
    },

    /// Quick analysis: pattern scan and keyword bias inference only
    Quick {
        /// Text to analyze
        text: String,
    },

    /// Start the JSON API server
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },

    /// Download the local ONNX classifier models
    DownloadModel,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before anything reads the environment
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("litmus=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            text,
            headline,
            detailed,
        } => {
            let config = Config::load()?;
            config.require_backend()?;
            let analyzer = Analyzer::new(&config)?;

            let mut request = AnalysisRequest::new(text);
            request.headline = headline;
            request.include_detailed_results = detailed;

            let analysis = analyzer.analyze(&request).await?;
            litmus::output::display_analysis(&analysis);

            if detailed {
                println!("{}", serde_json::to_string_pretty(&analysis.signals)?);
            }
        }

        Commands::Quick { text } => {
            let config = Config::load()?;
            let analyzer = Analyzer::new(&config)?;

            let analysis = analyzer.quick_analyze(&text)?;
            litmus::output::display_quick(&analysis);
        }

        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            if let Err(e) = config.require_backend() {
                // The server still starts — deep analysis degrades to
                // pattern-only until models are available.
                println!("{} {e:#}", "Warning:".yellow());
            }
            let analyzer = Arc::new(Analyzer::new(&config)?);
            litmus::web::run_server(analyzer, port, &bind).await?;
        }

        Commands::DownloadModel => {
            let config = Config::load()?;
            println!(
                "Downloading classifier models to {}",
                config.model_dir.display()
            );
            litmus::providers::download::download_models(&config.model_dir).await?;
            println!("\n{}", "All models downloaded.".green());
        }
    }

    Ok(())
}
