use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mixsense::{
    adapt_emotion_results, adapt_language_results, build_router, correlate_results,
    parse_batch_file, read_emotion_payload, read_language_payload, AnalysisReport,
    AnalyzerConfig, AppState, GeminiClient, GeminiConfig, HumanSummary, HumeClient, HumeConfig,
    LinkerConfig, MixedAnalyzer,
};

#[derive(Parser)]
#[command(name = "mixsense")]
#[command(author, version, about = "Mixed emotion-language analysis for voice research responses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the analysis HTTP API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Address to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Maximum responses analyzed at once per batch
        #[arg(long, default_value = "8")]
        max_concurrent: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze a single response
    Analyze {
        /// URL of the response's audio recording
        #[arg(long)]
        audio_url: String,

        /// Transcription of the response
        #[arg(long)]
        transcription: String,

        /// Output file for the JSON report (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for a plain-text summary
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Analyze a batch file of responses and aggregate the results
    Batch {
        /// Input file: {"responses": [...]} or a bare array of {audioUrl, transcription}
        #[arg(short, long)]
        input: PathBuf,

        /// Output file for the JSON report (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for a plain-text summary
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Maximum responses analyzed at once
        #[arg(long, default_value = "8")]
        max_concurrent: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run the engine on saved collaborator payloads, without network access
    Replay {
        /// Saved voice-emotion payload (JSON)
        #[arg(long)]
        emotion: PathBuf,

        /// Saved text-sentiment payload (JSON)
        #[arg(long)]
        language: PathBuf,

        /// Output file for the JSON report (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output file for a plain-text summary
        #[arg(long)]
        human_readable: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            host,
            max_concurrent,
            verbose,
        } => {
            setup_logging(verbose);
            serve(&host, port, max_concurrent).await
        }
        Commands::Analyze {
            audio_url,
            transcription,
            output,
            human_readable,
            verbose,
        } => {
            setup_logging(verbose);
            let analyzer = build_analyzer(AnalyzerConfig::default())?;
            let bundle = analyzer.analyze_response(&audio_url, &transcription).await?;

            if let Some(path) = &human_readable {
                HumanSummary::for_single(&bundle).write_file(path)?;
                info!("Summary written to {:?}", path);
            }
            emit_report(&AnalysisReport::single(bundle), output.as_deref())
        }
        Commands::Batch {
            input,
            output,
            human_readable,
            max_concurrent,
            verbose,
        } => {
            setup_logging(verbose);
            info!("Loading batch from {:?}", input);
            let responses = parse_batch_file(&input).context("Failed to load batch input")?;

            let analyzer = build_analyzer(AnalyzerConfig {
                max_concurrent_responses: max_concurrent,
                ..Default::default()
            })?;
            let aggregated = analyzer.analyze_multiple_responses(&responses).await?;

            if let Some(path) = &human_readable {
                HumanSummary::for_batch(&aggregated).write_file(path)?;
                info!("Summary written to {:?}", path);
            }
            emit_report(&AnalysisReport::batch(aggregated), output.as_deref())
        }
        Commands::Replay {
            emotion,
            language,
            output,
            human_readable,
            verbose,
        } => {
            setup_logging(verbose);
            info!("Replaying payloads {:?} and {:?}", emotion, language);
            let emotion_results = adapt_emotion_results(read_emotion_payload(&emotion)?)?;
            let language_results = adapt_language_results(read_language_payload(&language)?)?;
            let bundle =
                correlate_results(emotion_results, language_results, &LinkerConfig::default());

            if let Some(path) = &human_readable {
                HumanSummary::for_single(&bundle).write_file(path)?;
                info!("Summary written to {:?}", path);
            }
            emit_report(&AnalysisReport::single(bundle), output.as_deref())
        }
    }
}

/// Install the global subscriber; `RUST_LOG` takes precedence over `--verbose`
fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

/// Build an analyzer backed by the Hume and Gemini clients configured from env
fn build_analyzer(config: AnalyzerConfig) -> Result<MixedAnalyzer> {
    let voice = HumeClient::new(HumeConfig::from_env()?)?;
    let text = GeminiClient::new(GeminiConfig::from_env()?)?;
    Ok(MixedAnalyzer::new(Arc::new(voice), Arc::new(text), config))
}

async fn serve(host: &str, port: u16, max_concurrent: usize) -> Result<()> {
    let analyzer = build_analyzer(AnalyzerConfig {
        max_concurrent_responses: max_concurrent,
        ..Default::default()
    })?;
    let app = build_router(AppState::new(analyzer));

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address: {}:{}", host, port))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Starting HTTP server on {}", addr);
    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;
    Ok(())
}

/// Write a report to `output`, or pretty-print it to stdout
fn emit_report<T: Serialize>(report: &AnalysisReport<T>, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            report.write_json(path)?;
            info!("Report written to {:?}", path);
        }
        None => {
            let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
            println!("{}", json);
        }
    }
    Ok(())
}
