use crate::domain::fields::{Field, FieldValue};
use serde::Deserialize;

/// One row of the reference dataset as it appears on disk.
///
/// Kms_Driven and Max Power arrive as free text and are normalized exactly
/// once, at load time, before anything else touches them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawListing {
    pub city: String,
    pub oem: String,
    pub model: String,
    #[serde(rename = "modelYear")]
    pub model_year: i32,
    #[serde(rename = "Fuel Type")]
    pub fuel_type: String,
    #[serde(rename = "Ownership")]
    pub ownership: String,
    #[serde(rename = "Transmission")]
    pub transmission: String,
    #[serde(rename = "Mileage")]
    pub mileage: f64,
    #[serde(rename = "Engine Type")]
    pub engine_type: String,
    #[serde(rename = "Kms_Driven")]
    pub kms_driven: Option<String>,
    #[serde(rename = "Max Power")]
    pub max_power: Option<String>,
    #[serde(rename = "Acceleration")]
    pub acceleration: f64,
    #[serde(rename = "Body Type")]
    pub body_type: String,
    pub price: f64,
}

/// A normalized historical listing.
#[derive(Debug, Clone)]
pub struct Listing {
    pub city: String,
    pub body_type: String,
    pub kms_driven: i64,
    pub oem: String,
    pub model: String,
    pub model_year: i32,
    pub fuel_type: String,
    pub ownership: String,
    pub transmission: String,
    pub mileage: f64,
    pub engine_type: String,
    pub max_power: f64,
    pub acceleration: f64,
    pub price: f64,
}

impl Listing {
    pub fn from_raw(raw: RawListing) -> Result<Self, String> {
        let kms_driven = parse_kms_driven(raw.kms_driven.as_deref())?;
        let max_power = parse_max_power(raw.max_power.as_deref())?;
        Ok(Self {
            city: raw.city,
            body_type: raw.body_type,
            kms_driven,
            oem: raw.oem,
            model: raw.model,
            model_year: raw.model_year,
            fuel_type: raw.fuel_type,
            ownership: raw.ownership,
            transmission: raw.transmission,
            mileage: raw.mileage,
            engine_type: raw.engine_type,
            max_power,
            acceleration: raw.acceleration,
            price: raw.price,
        })
    }

    pub fn value(&self, field: Field) -> FieldValue {
        match field {
            Field::City => FieldValue::Text(self.city.clone()),
            Field::BodyType => FieldValue::Text(self.body_type.clone()),
            Field::KmsDriven => FieldValue::Int(self.kms_driven),
            Field::Oem => FieldValue::Text(self.oem.clone()),
            Field::Model => FieldValue::Text(self.model.clone()),
            Field::ModelYear => FieldValue::Int(self.model_year as i64),
            Field::FuelType => FieldValue::Text(self.fuel_type.clone()),
            Field::Ownership => FieldValue::Text(self.ownership.clone()),
            Field::Transmission => FieldValue::Text(self.transmission.clone()),
            Field::Mileage => FieldValue::Float(self.mileage),
            Field::EngineType => FieldValue::Text(self.engine_type.clone()),
            Field::MaxPower => FieldValue::Float(self.max_power),
            Field::Acceleration => FieldValue::Float(self.acceleration),
        }
    }
}

/// Normalizes a kilometers-driven cell: thousands separators stripped,
/// missing or empty means 0.
pub fn parse_kms_driven(raw: Option<&str>) -> Result<i64, String> {
    let Some(text) = raw else {
        return Ok(0);
    };
    let cleaned: String = text.chars().filter(|c| *c != ',' && *c != ' ').collect();
    if cleaned.is_empty() {
        return Ok(0);
    }
    cleaned
        .parse::<i64>()
        .map_err(|_| format!("expected a kilometre count, got {:?}", text))
}

/// Normalizes a max-power cell by extracting its first numeric token,
/// e.g. "120.5 bhp" -> 120.5. Missing or empty means 0.0; text without any
/// numeric token is an error.
pub fn parse_max_power(raw: Option<&str>) -> Result<f64, String> {
    let Some(text) = raw else {
        return Ok(0.0);
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    let start = trimmed
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| format!("no numeric token in max power value {:?}", text))?;
    let mut end = start;
    let mut seen_dot = false;
    for (offset, c) in trimmed[start..].char_indices() {
        if c.is_ascii_digit() {
            end = start + offset + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
        } else {
            break;
        }
    }
    trimmed[start..end]
        .parse::<f64>()
        .map_err(|_| format!("no numeric token in max power value {:?}", text))
}
