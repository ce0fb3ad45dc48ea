use crate::application::encoder::CategoryIndex;
use crate::application::ml::predictor::PriceModel;
use crate::domain::errors::PredictionError;
use crate::domain::fields::{Field, FieldKind, FieldValue};
use crate::domain::money::format_inr;
use crate::domain::schema::FeatureSchema;
use crate::infrastructure::dataset::ReferenceDataset;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Raw operator input for one prediction request. Created fresh per request
/// and discarded after use.
#[derive(Debug, Clone, Default)]
pub struct InputAssembly {
    values: BTreeMap<Field, FieldValue>,
}

impl InputAssembly {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, value: impl Into<FieldValue>) -> &mut Self {
        self.values.insert(field, value.into());
        self
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.values.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One fully aligned model input row, in schema order, plus the fields whose
/// values were substituted with the default.
#[derive(Debug, Clone)]
pub struct AlignedRow {
    values: Vec<f64>,
    defaulted: Vec<Field>,
}

impl AlignedRow {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn defaulted(&self) -> &[Field] {
        &self.defaulted
    }
}

/// A finished prediction: the price, its display form, and any fields the
/// pipeline had to default so the caller can surface a warning.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub price: Decimal,
    pub display: String,
    pub defaulted: Vec<Field>,
}

/// Aligns operator-chosen values into the exact numeric row the trained
/// model expects, then runs the prediction.
///
/// Holds shared references to the process-wide dataset and model; both are
/// immutable after startup, so the whole request reads one consistent
/// snapshot.
pub struct PricePipeline<'a> {
    dataset: &'a ReferenceDataset,
    model: &'a dyn PriceModel,
    schema: FeatureSchema,
}

impl<'a> PricePipeline<'a> {
    pub fn new(
        dataset: &'a ReferenceDataset,
        model: &'a dyn PriceModel,
    ) -> Result<Self, PredictionError> {
        let schema = Self::determine_schema(model)?;
        Ok(Self {
            dataset,
            model,
            schema,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// The model's self-reported input names win; the built-in training
    /// order is only a fallback.
    fn determine_schema(model: &dyn PriceModel) -> Result<FeatureSchema, PredictionError> {
        match model.feature_names() {
            Some(names) => {
                info!("Using {} input columns reported by {}", names.len(), model.name());
                FeatureSchema::from_names(names)
            }
            None => {
                info!(
                    "{} does not report input columns, using built-in order",
                    model.name()
                );
                Ok(FeatureSchema::fallback())
            }
        }
    }

    /// Builds the final ordered row. Fields absent from the input get the
    /// default 0.0 and are recorded; fields outside the schema are rejected
    /// before any encoding happens.
    pub fn assemble_row(&self, input: &InputAssembly) -> Result<AlignedRow, PredictionError> {
        for field in input.fields() {
            if !self.schema.contains(field) {
                return Err(PredictionError::SchemaMismatch {
                    reason: format!("{} is not part of the model's input schema", field),
                });
            }
        }

        let mut values = Vec::with_capacity(self.schema.len());
        let mut defaulted = Vec::new();
        for &field in self.schema.fields() {
            match input.get(field) {
                Some(value) => values.push(self.align_value(field, value)?),
                None => {
                    defaulted.push(field);
                    values.push(0.0);
                }
            }
        }

        Ok(AlignedRow { values, defaulted })
    }

    fn align_value(&self, field: Field, value: &FieldValue) -> Result<f64, PredictionError> {
        match field.kind() {
            FieldKind::Categorical => {
                let FieldValue::Text(text) = value else {
                    return Err(PredictionError::SchemaMismatch {
                        reason: format!("{} expects a category label, got {}", field, value),
                    });
                };
                // Codes come from the dataset as loaded; nothing cached that
                // could go stale against it.
                let index = CategoryIndex::from_dataset(self.dataset, field);
                Ok(index.encode(text)? as f64)
            }
            FieldKind::Numeric => match value {
                FieldValue::Int(i) => Ok(*i as f64),
                FieldValue::Float(f) if f.is_finite() => Ok(*f),
                FieldValue::Float(f) => Err(PredictionError::MalformedNumericInput {
                    field,
                    value: f.to_string(),
                }),
                FieldValue::Text(text) => text
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .ok_or_else(|| PredictionError::MalformedNumericInput {
                        field,
                        value: text.clone(),
                    }),
            },
        }
    }

    /// Full request: align, invoke the model once, validate and format the
    /// result. Pure in (input, dataset, model); no retries.
    pub fn predict(&self, input: &InputAssembly) -> Result<Prediction, PredictionError> {
        let row = self.assemble_row(input)?;
        if !row.defaulted().is_empty() {
            let names: Vec<&str> = row.defaulted().iter().map(|f| f.name()).collect();
            warn!("No value supplied for {}; defaults substituted", names.join(", "));
        }

        let raw = self
            .model
            .predict(row.values())
            .map_err(|reason| PredictionError::ModelInvocationFailure { reason })?;

        if !raw.is_finite() || raw < 0.0 {
            return Err(PredictionError::ModelInvocationFailure {
                reason: format!("model returned out-of-range price {}", raw),
            });
        }
        let price = Decimal::from_f64(raw).ok_or_else(|| {
            PredictionError::ModelInvocationFailure {
                reason: format!("model returned unrepresentable price {}", raw),
            }
        })?;

        Ok(Prediction {
            display: format_inr(price),
            price,
            defaulted: row.defaulted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
city,oem,model,modelYear,Fuel Type,Ownership,Transmission,Mileage,Engine Type,Kms_Driven,Max Power,Acceleration,Body Type,price
Pune,Maruti,Swift,2018,Petrol,1st Owner,Manual,18.5,1200 CC,\"45,000\",85.0 bhp,12.0,Hatchback,450000
Chennai,Hyundai,i20,2019,Petrol,2nd Owner,Manual,17.0,1200 CC,\"30,000\",82.0 bhp,13.1,Hatchback,520000
Delhi,Tata,Nexon,2021,Diesel,1st Owner,Automatic,16.8,1500 CC,\"20,000\",113.4 bhp,11.2,SUV,1450000
";

    struct FixedModel {
        price: f64,
        names: Option<Vec<String>>,
    }

    impl PriceModel for FixedModel {
        fn predict(&self, _row: &[f64]) -> Result<f64, String> {
            Ok(self.price)
        }

        fn feature_names(&self) -> Option<Vec<String>> {
            self.names.clone()
        }

        fn name(&self) -> &str {
            "Fixed"
        }
    }

    fn dataset() -> ReferenceDataset {
        ReferenceDataset::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_row_follows_schema_order() {
        let ds = dataset();
        let model = FixedModel {
            price: 450000.0,
            names: None,
        };
        let pipeline = PricePipeline::new(&ds, &model).unwrap();

        let mut input = InputAssembly::new();
        input.set(Field::City, "Pune");
        input.set(Field::Oem, "Maruti");
        input.set(Field::KmsDriven, 45000i64);

        let row = pipeline.assemble_row(&input).unwrap();
        assert_eq!(row.values().len(), pipeline.schema().len());
        // Fallback order: city first, Kms_Driven third, oem fourth.
        assert_eq!(row.values()[0], 2.0); // Chennai, Delhi, Pune
        assert_eq!(row.values()[2], 45000.0);
        assert_eq!(row.values()[3], 1.0); // Hyundai, Maruti, Tata
    }

    #[test]
    fn test_missing_fields_default_and_flag() {
        let ds = dataset();
        let model = FixedModel {
            price: 450000.0,
            names: None,
        };
        let pipeline = PricePipeline::new(&ds, &model).unwrap();

        let mut input = InputAssembly::new();
        input.set(Field::City, "Pune");

        let row = pipeline.assemble_row(&input).unwrap();
        assert_eq!(row.defaulted().len(), pipeline.schema().len() - 1);
        assert!(row.defaulted().contains(&Field::Acceleration));
        let acc_pos = pipeline.schema().position(Field::Acceleration).unwrap();
        assert_eq!(row.values()[acc_pos], 0.0);
    }

    #[test]
    fn test_model_reported_schema_wins() {
        let ds = dataset();
        let model = FixedModel {
            price: 450000.0,
            names: Some(vec![
                "oem".to_string(),
                "model".to_string(),
                "Kms_Driven".to_string(),
            ]),
        };
        let pipeline = PricePipeline::new(&ds, &model).unwrap();
        assert_eq!(pipeline.schema().len(), 3);

        let mut input = InputAssembly::new();
        input.set(Field::Oem, "Tata");
        input.set(Field::Model, "Nexon");
        input.set(Field::KmsDriven, 20000i64);
        let row = pipeline.assemble_row(&input).unwrap();
        // oem sorted: Hyundai, Maruti, Tata; model sorted: Nexon, Swift, i20
        assert_eq!(row.values(), &[2.0, 0.0, 20000.0]);
    }

    #[test]
    fn test_field_outside_schema_rejected() {
        let ds = dataset();
        let model = FixedModel {
            price: 450000.0,
            names: Some(vec!["oem".to_string()]),
        };
        let pipeline = PricePipeline::new(&ds, &model).unwrap();

        let mut input = InputAssembly::new();
        input.set(Field::City, "Pune");
        let err = pipeline.assemble_row(&input).unwrap_err();
        assert!(matches!(err, PredictionError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_numeric_text_is_parsed() {
        let ds = dataset();
        let model = FixedModel {
            price: 450000.0,
            names: None,
        };
        let pipeline = PricePipeline::new(&ds, &model).unwrap();

        let mut input = InputAssembly::new();
        input.set(Field::Mileage, "18.5");
        let row = pipeline.assemble_row(&input).unwrap();
        let pos = pipeline.schema().position(Field::Mileage).unwrap();
        assert_eq!(row.values()[pos], 18.5);
    }

    #[test]
    fn test_non_numeric_text_rejected_for_numeric_field() {
        let ds = dataset();
        let model = FixedModel {
            price: 450000.0,
            names: None,
        };
        let pipeline = PricePipeline::new(&ds, &model).unwrap();

        let mut input = InputAssembly::new();
        input.set(Field::KmsDriven, "lots");
        let err = pipeline.assemble_row(&input).unwrap_err();
        match err {
            PredictionError::MalformedNumericInput { field, value } => {
                assert_eq!(field, Field::KmsDriven);
                assert_eq!(value, "lots");
            }
            other => panic!("expected MalformedNumericInput, got {:?}", other),
        }
    }

    #[test]
    fn test_number_for_categorical_field_rejected() {
        let ds = dataset();
        let model = FixedModel {
            price: 450000.0,
            names: None,
        };
        let pipeline = PricePipeline::new(&ds, &model).unwrap();

        let mut input = InputAssembly::new();
        input.set(Field::City, 3i64);
        let err = pipeline.assemble_row(&input).unwrap_err();
        assert!(matches!(err, PredictionError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_predict_formats_currency() {
        let ds = dataset();
        let model = FixedModel {
            price: 450000.0,
            names: None,
        };
        let pipeline = PricePipeline::new(&ds, &model).unwrap();

        let mut input = InputAssembly::new();
        input.set(Field::City, "Pune");
        let prediction = pipeline.predict(&input).unwrap();
        assert_eq!(prediction.display, "₹450,000.00");
    }

    #[test]
    fn test_out_of_range_model_output_rejected() {
        let ds = dataset();
        for bad in [f64::NAN, f64::INFINITY, -1.0] {
            let model = FixedModel {
                price: bad,
                names: None,
            };
            let pipeline = PricePipeline::new(&ds, &model).unwrap();
            let err = pipeline.predict(&InputAssembly::new()).unwrap_err();
            assert!(matches!(
                err,
                PredictionError::ModelInvocationFailure { .. }
            ));
        }
    }
}
