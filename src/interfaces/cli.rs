use crate::application::ml::predictor::PriceModel;
use crate::application::pipeline::{InputAssembly, PricePipeline};
use crate::domain::fields::{Field, FieldKind, FieldValue};
use crate::infrastructure::dataset::ReferenceDataset;
use clap::{Args, Parser, Subcommand};

/// Used-car price estimation from historical listings.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the values observed for a field
    Values {
        /// Column name, e.g. "oem" or "Fuel Type"
        field: String,

        /// Narrow to rows matching another field, e.g. --where oem=Maruti
        #[arg(long = "where", value_name = "FIELD=VALUE")]
        filter: Option<String>,
    },

    /// Predict a price from car attributes
    Predict(PredictArgs),
}

#[derive(Args, Debug)]
struct PredictArgs {
    #[arg(long)]
    city: Option<String>,

    /// Manufacturer
    #[arg(long)]
    oem: Option<String>,

    #[arg(long)]
    model: Option<String>,

    #[arg(long = "model-year")]
    model_year: Option<i64>,

    #[arg(long = "fuel-type")]
    fuel_type: Option<String>,

    #[arg(long)]
    ownership: Option<String>,

    #[arg(long)]
    transmission: Option<String>,

    /// Mileage in km/l
    #[arg(long)]
    mileage: Option<f64>,

    #[arg(long = "engine-type")]
    engine_type: Option<String>,

    #[arg(long = "kms-driven")]
    kms_driven: Option<i64>,

    /// Max power in bhp
    #[arg(long = "max-power")]
    max_power: Option<f64>,

    /// 0-100 km/h time in seconds
    #[arg(long)]
    acceleration: Option<f64>,

    #[arg(long = "body-type")]
    body_type: Option<String>,
}

impl Cli {
    pub fn run(self, dataset: &ReferenceDataset, model: &dyn PriceModel) -> anyhow::Result<()> {
        match self.command {
            Command::Values { field, filter } => run_values(dataset, &field, filter.as_deref()),
            Command::Predict(args) => run_predict(dataset, model, args),
        }
    }
}

fn run_values(
    dataset: &ReferenceDataset,
    field_name: &str,
    filter: Option<&str>,
) -> anyhow::Result<()> {
    let Some(field) = Field::from_name(field_name) else {
        let known: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
        println!(
            "Unknown field {:?}. Known fields: {}",
            field_name,
            known.join(", ")
        );
        return Ok(());
    };

    let values = match filter {
        None => dataset.distinct_values(field),
        Some(expr) => {
            let Some((by_name, wanted)) = expr.split_once('=') else {
                println!("Filter must look like FIELD=VALUE, got {:?}", expr);
                return Ok(());
            };
            let Some(by) = Field::from_name(by_name) else {
                println!("Unknown filter field {:?}", by_name);
                return Ok(());
            };
            let wanted = parse_filter_value(by, wanted);
            dataset.distinct_values_where(field, by, &wanted)
        }
    };

    for value in values {
        println!("{}", value);
    }
    Ok(())
}

fn parse_filter_value(field: Field, raw: &str) -> FieldValue {
    match field.kind() {
        FieldKind::Categorical => FieldValue::Text(raw.to_string()),
        FieldKind::Numeric => match raw.trim().parse::<f64>() {
            Ok(v) => FieldValue::Float(v),
            Err(_) => FieldValue::Text(raw.to_string()),
        },
    }
}

fn run_predict(
    dataset: &ReferenceDataset,
    model: &dyn PriceModel,
    args: PredictArgs,
) -> anyhow::Result<()> {
    let pipeline = match PricePipeline::new(dataset, model) {
        Ok(p) => p,
        Err(e) => {
            println!("Cannot predict: {}", e);
            return Ok(());
        }
    };

    let mut input = InputAssembly::new();
    if let Some(v) = args.city {
        input.set(Field::City, v);
    }
    if let Some(v) = args.oem {
        input.set(Field::Oem, v);
    }
    if let Some(v) = args.model {
        input.set(Field::Model, v);
    }
    if let Some(v) = args.model_year {
        input.set(Field::ModelYear, v);
    }
    if let Some(v) = args.fuel_type {
        input.set(Field::FuelType, v);
    }
    if let Some(v) = args.ownership {
        input.set(Field::Ownership, v);
    }
    if let Some(v) = args.transmission {
        input.set(Field::Transmission, v);
    }
    if let Some(v) = args.mileage {
        input.set(Field::Mileage, v);
    }
    if let Some(v) = args.engine_type {
        input.set(Field::EngineType, v);
    }
    if let Some(v) = args.kms_driven {
        input.set(Field::KmsDriven, v);
    }
    if let Some(v) = args.max_power {
        input.set(Field::MaxPower, v);
    }
    if let Some(v) = args.acceleration {
        input.set(Field::Acceleration, v);
    }
    if let Some(v) = args.body_type {
        input.set(Field::BodyType, v);
    }

    match pipeline.predict(&input) {
        Ok(prediction) => {
            for field in &prediction.defaulted {
                println!("note: no value given for {}, substituted a default", field);
            }
            println!("Estimated price: {}", prediction.display);
        }
        Err(e) => {
            println!("Prediction failed: {}", e);
        }
    }
    Ok(())
}
