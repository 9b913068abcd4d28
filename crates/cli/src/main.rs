//! # eta
//!
//! Command-line interface for the delivery time model: train an artifact
//! from the Olist CSV export, inspect it, score a request offline or serve it
//! over HTTP.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use artifact::ModelArtifact;
use clap::{Parser, Subcommand, ValueEnum};
use prediction_facade::{DeliveryPredictor, PredictionRequest, PredictionService};
use regressor_facade::SplitStrategy;
use server::ServerConfig;
use tracing::{info, warn};
use trainer::{OlistDataset, TrainingConfig, TrainingJob};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "eta=info,server=info,trainer=info,artifact=info,\
features_core=info,anomaly_core=info,regressor_core=info,tower_http=info";

#[derive(Parser)]
#[command(name = "eta")]
#[command(about = "Delivery time estimation and logistics anomaly detection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a model artifact from the Olist CSV export
    Train {
        /// Directory holding the olist_*.csv files
        #[arg(short, long)]
        data: PathBuf,

        /// Artifact file to write
        #[arg(short, long, default_value = server::config::DEFAULT_MODEL_PATH)]
        output: PathBuf,

        /// JSON training configuration (optional)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Held-out split strategy (overrides the configuration)
        #[arg(long, value_enum)]
        split: Option<SplitArg>,

        /// Keep rows flagged as anomalous when fitting the regressor
        #[arg(long)]
        keep_anomalies: bool,
    },

    /// Print the metrics, training summary and feature importances of an artifact
    Inspect {
        /// Artifact file
        #[arg(short, long, env = "DELIVERY_MODEL_PATH", default_value = server::config::DEFAULT_MODEL_PATH)]
        model: PathBuf,

        /// Number of importances to show
        #[arg(short, long, default_value = "13")]
        top: usize,
    },

    /// Score one JSON request without starting the server
    Predict {
        /// Artifact file
        #[arg(short, long, env = "DELIVERY_MODEL_PATH", default_value = server::config::DEFAULT_MODEL_PATH)]
        model: PathBuf,

        /// Request file, or "-" for stdin
        #[arg(short, long, default_value = "-")]
        request: PathBuf,
    },

    /// Start the REST API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value_t = server::config::DEFAULT_PORT)]
        port: u16,

        /// Host to bind to
        #[arg(long, env = "HOST", default_value = server::config::DEFAULT_HOST)]
        host: String,

        /// Artifact file
        #[arg(short, long, env = "DELIVERY_MODEL_PATH", default_value = server::config::DEFAULT_MODEL_PATH)]
        model: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SplitArg {
    Chronological,
    Shuffled,
}

impl From<SplitArg> for SplitStrategy {
    fn from(arg: SplitArg) -> Self {
        match arg {
            SplitArg::Chronological => SplitStrategy::Chronological,
            SplitArg::Shuffled => SplitStrategy::Shuffled,
        }
    }
}

/// Training configuration from an optional file, with command-line overrides applied.
fn training_config(
    config: Option<&Path>,
    split: Option<SplitArg>,
    keep_anomalies: bool,
) -> anyhow::Result<TrainingConfig> {
    let mut config = match config {
        Some(path) => {
            info!(path = %path.display(), "reading training configuration");
            TrainingConfig::from_file(path)?
        }
        None => TrainingConfig::default(),
    };
    if let Some(split) = split {
        config.evaluation.split = split.into();
    }
    if keep_anomalies {
        config.exclude_anomalies = false;
    }
    Ok(config)
}

fn run_train(
    data: &Path,
    output: &Path,
    config: Option<&Path>,
    split: Option<SplitArg>,
    keep_anomalies: bool,
) -> anyhow::Result<()> {
    let config = training_config(config, split, keep_anomalies)?;

    info!(data = %data.display(), "loading Olist dataset");
    let dataset = OlistDataset::load(data)
        .with_context(|| format!("Failed to load dataset from {}", data.display()))?;
    info!(
        records = dataset.records.len(),
        split = ?config.evaluation.split,
        exclude_anomalies = config.exclude_anomalies,
        "training delivery model"
    );
    let artifact = TrainingJob::new(config).run(&dataset.records, dataset.geo)?;
    artifact.save(output)?;

    print_summary(&artifact);
    println!("\nArtifact written to {}", output.display());
    Ok(())
}

fn run_inspect(model: &Path, top: usize) -> anyhow::Result<()> {
    let artifact = ModelArtifact::load(model)?;
    println!("Artifact: {} (format v{})", model.display(), artifact.format_version);
    print_summary(&artifact);

    println!("\nFeature importance:");
    for (rank, item) in artifact.feature_importance()?.iter().take(top).enumerate() {
        println!("  {:>2}. {:<28} {:.4}", rank + 1, item.feature, item.importance);
    }
    Ok(())
}

fn print_summary(artifact: &ModelArtifact) {
    let summary = &artifact.summary;
    let metrics = &artifact.metrics;

    println!("\n=== Training Summary ===");
    println!("Trained at: {}", summary.trained_at.to_rfc3339());
    println!("Order records: {}", summary.total_records);
    println!("Excluded: {}", summary.exclusions.total());
    println!("  no delivery date: {}", summary.exclusions.missing_target);
    println!("  delivered before purchase: {}", summary.exclusions.negative_target);
    println!("  unknown zip prefix: {}", summary.exclusions.missing_location);
    println!("  invalid attributes: {}", summary.exclusions.invalid_attributes);
    println!("Training records: {}", summary.training_records);
    println!("Anomalies flagged: {}", summary.anomalies_flagged);
    println!("Regressor records: {}", summary.regressor_records);
    println!("Trees: {}", artifact.regressor.trees().len());

    println!("\n=== Held-out Evaluation ===");
    println!("Test records: {}", metrics.test_records);
    println!("MAE: {:.2} days", metrics.mae);
    println!("RMSE: {:.2} days", metrics.rmse);
    println!("R^2: {:.4}", metrics.r2_score);
    println!("Within 3 days: {:.2}%", metrics.business_accuracy * 100.0);
    if let Some(best) = metrics.best_iteration {
        println!("Best iteration: {}", best);
    }
}

fn read_request(path: &Path) -> anyhow::Result<PredictionRequest> {
    let text = if path == Path::new("-") {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        text
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?
    };
    serde_json::from_str(&text).context("Request is not a valid prediction payload")
}

fn run_predict(model: &Path, request: &Path) -> anyhow::Result<()> {
    let service = PredictionService::load(model)?;
    let request = read_request(request)?;
    let response = service.predict(&request)?;
    if !response.warnings.is_empty() {
        warn!(count = response.warnings.len(), "prediction returned warnings");
    }
    info!(predicted_days = response.predicted_days, "scored request");
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn run_serve(host: String, port: u16, model: PathBuf) -> anyhow::Result<()> {
    let config = ServerConfig::default()
        .with_host(host)
        .with_port(port)
        .with_model_path(model);
    let service = PredictionService::load(&config.model_path)
        .with_context(|| format!("Cannot serve {}", config.model_path.display()))?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(&config, Arc::new(service)))?;
    Ok(())
}

fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_FILTER.into()),
        )
        .init();

    let result = match cli.command {
        Commands::Train {
            data,
            output,
            config,
            split,
            keep_anomalies,
        } => run_train(&data, &output, config.as_deref(), split, keep_anomalies),

        Commands::Inspect { model, top } => run_inspect(&model, top),

        Commands::Predict { model, request } => run_predict(&model, &request),

        Commands::Serve { port, host, model } => run_serve(host, port, model),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
