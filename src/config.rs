use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Which serialized model artifact format to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelBackend {
    SmartCore,
    Onnx,
}

impl FromStr for ModelBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smartcore" => Ok(ModelBackend::SmartCore),
            "onnx" => Ok(ModelBackend::Onnx),
            _ => anyhow::bail!(
                "Invalid MODEL_BACKEND: {}. Must be 'smartcore' or 'onnx'",
                s
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub dataset_path: PathBuf,
    pub model_path: PathBuf,
    pub model_backend: ModelBackend,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let dataset_path = env::var("DATASET_PATH")
            .unwrap_or_else(|_| "data/car_listings.csv".to_string())
            .into();

        let model_path = env::var("MODEL_PATH")
            .unwrap_or_else(|_| "data/car_price_model.json".to_string())
            .into();

        let backend_str = env::var("MODEL_BACKEND").unwrap_or_else(|_| "smartcore".to_string());
        let model_backend = ModelBackend::from_str(&backend_str)?;

        Ok(Self {
            dataset_path,
            model_path,
            model_backend,
        })
    }
}
