use std::collections::HashSet;

use serde::Deserialize;

use crate::scoring::domain::{ApplicantRecord, ColumnValue};
use crate::scoring::pipeline::PredictionError;

const NUMERIC_PREFIX: &str = "num";
const CATEGORICAL_PREFIX: &str = "cat";

/// Standard-scaled numeric column.
#[derive(Debug, Clone, Deserialize)]
pub struct ScaledColumn {
    pub column: String,
    pub mean: f64,
    pub scale: f64,
}

/// One-hot encoded column. Categories not in the list encode as all zeros.
#[derive(Debug, Clone, Deserialize)]
pub struct OneHotColumn {
    pub column: String,
    pub categories: Vec<String>,
}

/// Fitted preprocessing stage: scaled numerics first, then one-hot blocks.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnTransformer {
    #[serde(default)]
    numeric: Vec<ScaledColumn>,
    #[serde(default)]
    categorical: Vec<OneHotColumn>,
}

impl ColumnTransformer {
    pub fn new(numeric: Vec<ScaledColumn>, categorical: Vec<OneHotColumn>) -> Self {
        Self {
            numeric,
            categorical,
        }
    }

    pub fn output_width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(|column| column.categories.len())
                .sum::<usize>()
    }

    pub fn feature_names_out(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.output_width());
        for scaled in &self.numeric {
            names.push(format!("{NUMERIC_PREFIX}__{}", scaled.column));
        }
        for encoded in &self.categorical {
            for category in &encoded.categories {
                names.push(format!("{CATEGORICAL_PREFIX}__{}_{}", encoded.column, category));
            }
        }
        names
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.output_width() == 0 {
            return Err("transformer has no output features".to_string());
        }

        let mut seen = HashSet::new();
        for scaled in &self.numeric {
            if !seen.insert(scaled.column.as_str()) {
                return Err(format!("column '{}' configured twice", scaled.column));
            }
            if !scaled.mean.is_finite() {
                return Err(format!("column '{}' has a non-finite mean", scaled.column));
            }
            if !scaled.scale.is_finite() || scaled.scale == 0.0 {
                return Err(format!(
                    "column '{}' has an unusable scale {}",
                    scaled.column, scaled.scale
                ));
            }
        }

        for encoded in &self.categorical {
            if !seen.insert(encoded.column.as_str()) {
                return Err(format!("column '{}' configured twice", encoded.column));
            }
            if encoded.categories.is_empty() {
                return Err(format!("column '{}' has no categories", encoded.column));
            }
            let unique: HashSet<&str> = encoded.categories.iter().map(String::as_str).collect();
            if unique.len() != encoded.categories.len() {
                return Err(format!(
                    "column '{}' lists a category more than once",
                    encoded.column
                ));
            }
        }

        Ok(())
    }

    pub fn transform(&self, record: &ApplicantRecord) -> Result<Vec<f64>, PredictionError> {
        let mut row = Vec::with_capacity(self.output_width());

        for scaled in &self.numeric {
            match record.column(&scaled.column) {
                Some(ColumnValue::Numeric(value)) => {
                    row.push((value - scaled.mean) / scaled.scale);
                }
                Some(ColumnValue::Categorical(_)) => {
                    return Err(PredictionError::SchemaMismatch(format!(
                        "column '{}' is categorical but the transformer scales it",
                        scaled.column
                    )));
                }
                None => return Err(missing_column(&scaled.column)),
            }
        }

        for encoded in &self.categorical {
            let label = match record.column(&encoded.column) {
                Some(ColumnValue::Categorical(label)) => label,
                Some(ColumnValue::Numeric(_)) => {
                    return Err(PredictionError::SchemaMismatch(format!(
                        "column '{}' is numeric but the transformer one-hot encodes it",
                        encoded.column
                    )));
                }
                None => return Err(missing_column(&encoded.column)),
            };
            row.extend(
                encoded
                    .categories
                    .iter()
                    .map(|category| if category == label { 1.0 } else { 0.0 }),
            );
        }

        Ok(row)
    }
}

fn missing_column(column: &str) -> PredictionError {
    PredictionError::SchemaMismatch(format!("record has no column '{column}'"))
}
