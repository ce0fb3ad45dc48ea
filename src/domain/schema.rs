use crate::domain::errors::PredictionError;
use crate::domain::fields::Field;

/// Input columns in training order.
/// Used when the loaded model artifact does not report its own input names.
/// Any change here is a breaking change for deployed models.
pub const FALLBACK_FEATURE_NAMES: &[&str] = &[
    "city",
    "Body Type",
    "Kms_Driven",
    "oem",
    "model",
    "modelYear",
    "Fuel Type",
    "Ownership",
    "Transmission",
    "Mileage",
    "Engine Type",
    "Max Power",
    "Acceleration",
];

/// Ordered list of the fields a model expects as input.
///
/// The order is authoritative: rows handed to the model follow it exactly,
/// with no extra and no missing columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    fields: Vec<Field>,
}

impl FeatureSchema {
    /// Schema from the built-in training column order.
    pub fn fallback() -> Self {
        let fields = FALLBACK_FEATURE_NAMES
            .iter()
            .map(|name| Field::from_name(name).expect("fallback name is a known field"))
            .collect();
        Self { fields }
    }

    /// Schema from model-reported input names. Every name must resolve to a
    /// known field, and no field may appear twice.
    pub fn from_names<I, S>(names: I) -> Result<Self, PredictionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut fields: Vec<Field> = Vec::new();
        for name in names {
            let name = name.as_ref();
            let field = Field::from_name(name).ok_or_else(|| PredictionError::SchemaMismatch {
                reason: format!("model reports unknown input column {:?}", name),
            })?;
            if fields.contains(&field) {
                return Err(PredictionError::SchemaMismatch {
                    reason: format!("model reports duplicate input column {:?}", name),
                });
            }
            fields.push(field);
        }
        if fields.is_empty() {
            return Err(PredictionError::SchemaMismatch {
                reason: "model reports an empty input schema".to_string(),
            });
        }
        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }

    pub fn position(&self, field: Field) -> Option<usize> {
        self.fields.iter().position(|f| *f == field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
