use crate::domain::errors::PredictionError;
use crate::domain::fields::Field;
use crate::infrastructure::dataset::ReferenceDataset;

/// How many valid labels an unknown-category error carries as guidance.
const EXAMPLE_LIMIT: usize = 5;

/// Zero-based category codes for one categorical column, derived from the
/// lexicographically sorted distinct labels of the reference dataset.
///
/// Codes must match what the model saw in training, which encoded the same
/// way; an unseen label is an operator error, never a sentinel code.
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    field: Field,
    categories: Vec<String>,
}

impl CategoryIndex {
    pub fn from_dataset(dataset: &ReferenceDataset, field: Field) -> Self {
        Self {
            field,
            categories: dataset.distinct_categories(field),
        }
    }

    pub fn encode(&self, value: &str) -> Result<usize, PredictionError> {
        self.categories
            .binary_search_by(|c| c.as_str().cmp(value))
            .map_err(|_| PredictionError::UnknownCategory {
                field: self.field,
                value: value.to_string(),
                examples: self.categories.iter().take(EXAMPLE_LIMIT).cloned().collect(),
            })
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
