use autoprice::application::ml::onnx_model::OnnxModel;
use autoprice::application::ml::predictor::PriceModel;
use autoprice::application::ml::smartcore_model::SmartCoreModel;
use autoprice::config::{Config, ModelBackend};
use autoprice::infrastructure::dataset::ReferenceDataset;
use autoprice::interfaces::cli::Cli;
use clap::Parser;

use tracing::{Level, info};
use tracing_subscriber::prelude::*;

fn main() -> anyhow::Result<()> {
    // Load .env before reading any configuration
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let dataset = ReferenceDataset::load(&config.dataset_path)?;

    // Dataset and model are loaded once here and passed by reference; they
    // stay immutable for the life of the process.
    let model: Box<dyn PriceModel> = match config.model_backend {
        ModelBackend::SmartCore => Box::new(SmartCoreModel::load(&config.model_path)?),
        ModelBackend::Onnx => Box::new(OnnxModel::load(&config.model_path)?),
    };
    info!("Price model ready: {}", model.name());

    cli.run(&dataset, model.as_ref())
}
