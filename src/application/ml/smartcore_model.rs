use super::predictor::PriceModel;
use anyhow::Context;
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

/// A random-forest price regressor deserialized from a serde_json artifact.
///
/// The artifact carries no input column names, so `feature_names` stays
/// `None` and callers use the built-in schema.
#[derive(Debug)]
pub struct SmartCoreModel {
    model: RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>,
}

impl SmartCoreModel {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("failed to open model file {}", path.display()))?;
        let model = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("failed to deserialize model from {}", path.display()))?;
        info!("Loaded SmartCore price model from {}", path.display());
        Ok(Self { model })
    }
}

impl PriceModel for SmartCoreModel {
    fn predict(&self, row: &[f64]) -> Result<f64, String> {
        let input_matrix = DenseMatrix::from_2d_vec(&vec![row.to_vec()])
            .map_err(|e| format!("matrix creation failed: {}", e))?;

        let predictions = self
            .model
            .predict(&input_matrix)
            .map_err(|e| format!("prediction failed: {}", e))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| "no prediction returned".to_string())
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_artifact_fails_load() {
        let err = SmartCoreModel::load(&PathBuf::from("non_existent.json")).unwrap_err();
        assert!(err.to_string().contains("non_existent.json"));
    }
}
