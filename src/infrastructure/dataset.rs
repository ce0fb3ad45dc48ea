use crate::domain::errors::DatasetError;
use crate::domain::fields::{Field, FieldKind, FieldValue};
use crate::domain::listing::{Listing, RawListing};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use tracing::info;

/// The historical listings table, loaded once at startup and read-only for
/// the rest of the process.
///
/// Used only to enumerate the values a presentation layer may offer and to
/// derive category codes; nothing here retrains or mutates anything.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    listings: Vec<Listing>,
}

impl ReferenceDataset {
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let dataset = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} listings from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Reads and normalizes CSV rows. Header line is line 1, so the first
    /// record is reported as line 2.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut listings = Vec::new();
        for (i, result) in rdr.deserialize().enumerate() {
            let line = i + 2;
            let raw: RawListing = result.map_err(|e| DatasetError::Malformed {
                line,
                reason: e.to_string(),
            })?;
            let listing =
                Listing::from_raw(raw).map_err(|reason| DatasetError::Malformed { line, reason })?;
            listings.push(listing);
        }
        if listings.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(Self { listings })
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    /// Sorted, deduplicated values observed for a field: the universe a
    /// selection widget offers.
    pub fn distinct_values(&self, field: Field) -> Vec<FieldValue> {
        Self::distinct(self.listings.iter(), field)
    }

    /// Like `distinct_values`, narrowed to rows where another field holds
    /// the given value (e.g. models of one manufacturer).
    pub fn distinct_values_where(
        &self,
        field: Field,
        by: Field,
        equals: &FieldValue,
    ) -> Vec<FieldValue> {
        Self::distinct(
            self.listings
                .iter()
                .filter(|l| value_matches(&l.value(by), equals)),
            field,
        )
    }

    /// Sorted distinct labels of a categorical column. Numeric columns have
    /// no labels and yield nothing.
    pub fn distinct_categories(&self, field: Field) -> Vec<String> {
        if field.kind() != FieldKind::Categorical {
            return Vec::new();
        }
        let set: BTreeSet<String> = self
            .listings
            .iter()
            .filter_map(|l| l.value(field).as_text().map(str::to_string))
            .collect();
        set.into_iter().collect()
    }

    fn distinct<'a, I: Iterator<Item = &'a Listing>>(iter: I, field: Field) -> Vec<FieldValue> {
        let mut values: Vec<FieldValue> = iter.map(|l| l.value(field)).collect();
        values.sort_by(compare_values);
        values.dedup();
        values
    }
}

fn compare_values(a: &FieldValue, b: &FieldValue) -> std::cmp::Ordering {
    match (a, b) {
        (FieldValue::Text(x), FieldValue::Text(y)) => x.cmp(y),
        _ => a
            .as_f64()
            .unwrap_or(f64::NEG_INFINITY)
            .total_cmp(&b.as_f64().unwrap_or(f64::NEG_INFINITY)),
    }
}

fn value_matches(candidate: &FieldValue, wanted: &FieldValue) -> bool {
    match (candidate, wanted) {
        (FieldValue::Text(a), FieldValue::Text(b)) => a == b,
        _ => match (candidate.as_f64(), wanted.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
city,oem,model,modelYear,Fuel Type,Ownership,Transmission,Mileage,Engine Type,Kms_Driven,Max Power,Acceleration,Body Type,price
Pune,Maruti,Swift,2018,Petrol,1st Owner,Manual,18.5,1200 CC,\"45,000\",85.0 bhp,12.0,Hatchback,450000
Chennai,Hyundai,i20,2019,Petrol,2nd Owner,Manual,17.0,1200 CC,\"30,000\",82.0 bhp,13.1,Hatchback,520000
Pune,Maruti,Baleno,2020,Petrol,1st Owner,Automatic,21.0,1200 CC,\"1,234\",88.5 bhp,12.4,Hatchback,610000
Delhi,Hyundai,Creta,2021,Diesel,1st Owner,Automatic,16.8,1500 CC,,113.4 bhp,11.2,SUV,1450000
";

    fn dataset() -> ReferenceDataset {
        ReferenceDataset::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_load_normalizes_kms_at_load_time() {
        let ds = dataset();
        let kms: Vec<i64> = ds
            .listings()
            .iter()
            .map(|l| l.kms_driven)
            .collect();
        assert_eq!(kms, vec![45000, 30000, 1234, 0]);
    }

    #[test]
    fn test_load_normalizes_max_power() {
        let ds = dataset();
        assert_eq!(ds.listings()[0].max_power, 85.0);
        assert_eq!(ds.listings()[3].max_power, 113.4);
    }

    #[test]
    fn test_distinct_values_sorted_and_deduped() {
        let ds = dataset();
        let cities = ds.distinct_values(Field::City);
        assert_eq!(
            cities,
            vec![
                FieldValue::Text("Chennai".to_string()),
                FieldValue::Text("Delhi".to_string()),
                FieldValue::Text("Pune".to_string()),
            ]
        );
        let years = ds.distinct_values(Field::ModelYear);
        assert_eq!(
            years,
            vec![
                FieldValue::Int(2018),
                FieldValue::Int(2019),
                FieldValue::Int(2020),
                FieldValue::Int(2021),
            ]
        );
    }

    #[test]
    fn test_distinct_values_where_narrows_by_oem() {
        let ds = dataset();
        let models = ds.distinct_values_where(
            Field::Model,
            Field::Oem,
            &FieldValue::Text("Maruti".to_string()),
        );
        assert_eq!(
            models,
            vec![
                FieldValue::Text("Baleno".to_string()),
                FieldValue::Text("Swift".to_string()),
            ]
        );
    }

    #[test]
    fn test_distinct_categories_only_for_categorical() {
        let ds = dataset();
        assert_eq!(ds.distinct_categories(Field::FuelType), vec!["Diesel", "Petrol"]);
        assert!(ds.distinct_categories(Field::Mileage).is_empty());
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let header_only = "city,oem,model,modelYear,Fuel Type,Ownership,Transmission,Mileage,Engine Type,Kms_Driven,Max Power,Acceleration,Body Type,price\n";
        let err = ReferenceDataset::from_reader(header_only.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Empty));
    }

    #[test]
    fn test_malformed_row_names_line() {
        let bad = "\
city,oem,model,modelYear,Fuel Type,Ownership,Transmission,Mileage,Engine Type,Kms_Driven,Max Power,Acceleration,Body Type,price
Pune,Maruti,Swift,2018,Petrol,1st Owner,Manual,18.5,1200 CC,lots,85.0 bhp,12.0,Hatchback,450000
";
        let err = ReferenceDataset::from_reader(bad.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }
}
