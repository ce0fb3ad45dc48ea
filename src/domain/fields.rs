use std::fmt;

/// The thirteen input columns the pricing model knows about.
///
/// `name()` returns the exact column spelling used by the reference dataset
/// and by trained model artifacts. Resolving the other way goes through
/// `from_name`; unknown column names are never accepted silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    City,
    BodyType,
    KmsDriven,
    Oem,
    Model,
    ModelYear,
    FuelType,
    Ownership,
    Transmission,
    Mileage,
    EngineType,
    MaxPower,
    Acceleration,
}

/// How a field's raw values are interpreted during row assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Labels drawn from the reference dataset; encoded to category codes.
    Categorical,
    /// Passed through to the model as-is.
    Numeric,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::City,
        Field::BodyType,
        Field::KmsDriven,
        Field::Oem,
        Field::Model,
        Field::ModelYear,
        Field::FuelType,
        Field::Ownership,
        Field::Transmission,
        Field::Mileage,
        Field::EngineType,
        Field::MaxPower,
        Field::Acceleration,
    ];

    /// Column name as spelled in the reference dataset header.
    pub fn name(self) -> &'static str {
        match self {
            Field::City => "city",
            Field::BodyType => "Body Type",
            Field::KmsDriven => "Kms_Driven",
            Field::Oem => "oem",
            Field::Model => "model",
            Field::ModelYear => "modelYear",
            Field::FuelType => "Fuel Type",
            Field::Ownership => "Ownership",
            Field::Transmission => "Transmission",
            Field::Mileage => "Mileage",
            Field::EngineType => "Engine Type",
            Field::MaxPower => "Max Power",
            Field::Acceleration => "Acceleration",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::City
            | Field::BodyType
            | Field::Oem
            | Field::Model
            | Field::FuelType
            | Field::Ownership
            | Field::Transmission
            | Field::EngineType => FieldKind::Categorical,
            Field::KmsDriven
            | Field::ModelYear
            | Field::Mileage
            | Field::MaxPower
            | Field::Acceleration => FieldKind::Numeric,
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A raw value for one field, as supplied by an operator or held by a
/// reference listing.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl FieldValue {
    /// Numeric view of the value. Text never converts here; parsing text
    /// into numbers is the pipeline's job so it can report the field.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Text(_) => None,
            FieldValue::Int(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}
