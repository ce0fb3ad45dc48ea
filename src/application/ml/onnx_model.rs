use super::predictor::PriceModel;
use ort::session::Session;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// An exported price regressor behind an ONNX Runtime session.
///
/// Export pipelines stamp the training column order into the artifact's
/// `feature_names` custom metadata key (comma separated); when present it
/// becomes the authoritative input schema.
#[derive(Debug)]
pub struct OnnxModel {
    session: Mutex<Session>,
    feature_names: Option<Vec<String>>,
}

impl OnnxModel {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            anyhow::bail!("ONNX model file not found at {}", path.display());
        }

        let session = Session::builder()?.commit_from_file(path)?;
        let feature_names = Self::read_feature_names(&session);
        match &feature_names {
            Some(names) => info!(
                "Loaded ONNX price model from {} ({} input columns)",
                path.display(),
                names.len()
            ),
            None => info!(
                "Loaded ONNX price model from {} (no input column metadata)",
                path.display()
            ),
        }

        Ok(Self {
            session: Mutex::new(session),
            feature_names,
        })
    }

    fn read_feature_names(session: &Session) -> Option<Vec<String>> {
        let metadata = session.metadata().ok()?;
        let raw = metadata.custom("feature_names")?;
        let names: Vec<String> = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if names.is_empty() { None } else { Some(names) }
    }
}

impl PriceModel for OnnxModel {
    fn predict(&self, row: &[f64]) -> Result<f64, String> {
        let mut session = self
            .session
            .lock()
            .map_err(|e| format!("mutex lock failed: {}", e))?;

        let input: Vec<f32> = row.iter().map(|v| *v as f32).collect();
        let array = ndarray::Array2::from_shape_vec((1, row.len()), input)
            .map_err(|e| format!("input shaping failed: {}", e))?;
        let input_value = ort::value::Value::from_array(array)
            .map_err(|e| format!("input value creation failed: {}", e))?;

        let inputs = ort::inputs![input_value];

        match session.run(inputs) {
            Ok(outputs) => {
                let output_value = outputs
                    .iter()
                    .next()
                    .map(|(_, v)| v)
                    .ok_or("no output found")?;
                let data = output_value
                    .try_extract_tensor::<f32>()
                    .map_err(|e| e.to_string())?;
                Ok(*data.1.iter().next().ok_or("empty output")? as f64)
            }
            Err(e) => Err(e.to_string()),
        }
    }

    fn feature_names(&self) -> Option<Vec<String>> {
        self.feature_names.clone()
    }

    fn name(&self) -> &str {
        "ONNX Runtime"
    }
}
