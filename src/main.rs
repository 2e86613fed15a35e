//! MailShield - Phishing Detection CLI

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use mailshield_core::constants;
use mailshield_core::logic::samples;
use mailshield_core::{DetectorConfig, EmailRecord, PhishingDetector};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Detector config file (JSON); defaults to $MAILSHIELD_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Linear model file (JSON); overrides the config and $MAILSHIELD_MODEL_PATH
    #[arg(long, global = true)]
    model: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one email (JSON object, `-` for stdin)
    Analyze {
        input: String,
        /// Include the named feature map in the report
        #[arg(long)]
        features: bool,
    },
    /// Analyze many emails (JSON array or JSONL)
    Batch { input: String },
    /// Print the feature vector of one email
    Features { input: String },
    /// Score the detector against a labeled corpus
    Evaluate {
        /// JSONL corpus; the built-in samples when omitted
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
    /// Show the active model and feature layout
    ModelInfo,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(constants::get_log_filter()),
    )
    .init();

    let cli = Cli::parse();
    log::debug!("{} v{}", constants::APP_NAME, constants::APP_VERSION);

    let detector = build_detector(cli.config.as_deref(), cli.model.as_deref())?;

    match cli.command {
        Commands::Analyze { input, features } => {
            let email: EmailRecord = serde_json::from_str(&read_input(&input)?)
                .with_context(|| format!("invalid email JSON in {}", input))?;
            let report = if features {
                detector.analyze_detailed(&email)
            } else {
                detector.analyze(&email)
            }
            .context("analysis failed")?;
            print_json(&report)
        }
        Commands::Batch { input } => {
            let emails = parse_emails(&read_input(&input)?)
                .with_context(|| format!("invalid email list in {}", input))?;
            print_json(&detector.analyze_batch(&emails))
        }
        Commands::Features { input } => {
            let email: EmailRecord = serde_json::from_str(&read_input(&input)?)
                .with_context(|| format!("invalid email JSON in {}", input))?;
            print_json(&detector.extract_features(&email).to_log_entry())
        }
        Commands::Evaluate { corpus } => {
            let report = match corpus {
                Some(path) => {
                    let samples = samples::load_corpus(&path)
                        .with_context(|| format!("failed to load corpus {}", path.display()))?;
                    samples::evaluate(&detector, &samples)
                }
                None => samples::evaluate(&detector, samples::sample_corpus()),
            };
            print_json(&report)
        }
        Commands::ModelInfo => print_json(&serde_json::json!({
            "model": detector.model_info(),
            "status": detector.status(),
        })),
    }
}

/// Config file, then model override, then heuristic fallback
fn build_detector(config: Option<&Path>, model: Option<&Path>) -> Result<PhishingDetector> {
    let config_path = config
        .map(Path::to_path_buf)
        .or_else(|| constants::get_config_path().map(PathBuf::from));

    let mut config = match &config_path {
        Some(path) => DetectorConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DetectorConfig::default(),
    };

    if let Some(path) = model
        .map(Path::to_path_buf)
        .or_else(|| constants::get_model_path().map(PathBuf::from))
    {
        config.model_path = Some(path);
    }

    PhishingDetector::from_config(&config).context("failed to initialize detector")
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input))
    }
}

/// JSON array, or one JSON object per line
fn parse_emails(content: &str) -> Result<Vec<EmailRecord>> {
    if content.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(content)?);
    }
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("line {}", i + 1))
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
