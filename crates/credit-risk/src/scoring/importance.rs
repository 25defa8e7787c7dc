use std::io::Write;

use serde::{Deserialize, Serialize};

/// Rows shown in the importance table and chart.
pub const TOP_FEATURE_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

impl FeatureImportance {
    pub fn percent(&self) -> f64 {
        self.importance * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankingError {
    #[error("{names} feature names but {scores} importance scores")]
    LengthMismatch { names: usize, scores: usize },
    #[error("feature '{feature}' has a non-finite importance ({score})")]
    NonFinite { feature: String, score: f64 },
}

/// Feature importances sorted descending. Equal scores keep their input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportanceRanking {
    ranked: Vec<FeatureImportance>,
}

impl FeatureImportanceRanking {
    pub fn rank(names: &[String], scores: &[f64]) -> Result<Self, RankingError> {
        if names.len() != scores.len() {
            return Err(RankingError::LengthMismatch {
                names: names.len(),
                scores: scores.len(),
            });
        }

        if let Some((feature, score)) = names
            .iter()
            .zip(scores)
            .find(|(_, score)| !score.is_finite())
        {
            return Err(RankingError::NonFinite {
                feature: feature.clone(),
                score: *score,
            });
        }

        let mut ranked: Vec<FeatureImportance> = names
            .iter()
            .zip(scores)
            .map(|(feature, importance)| FeatureImportance {
                feature: feature.clone(),
                importance: *importance,
            })
            .collect();

        // `sort_by` is stable.
        ranked.sort_by(|a, b| b.importance.total_cmp(&a.importance));

        Ok(Self { ranked })
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn all(&self) -> &[FeatureImportance] {
        &self.ranked
    }

    pub fn top(&self, limit: usize) -> &[FeatureImportance] {
        &self.ranked[..limit.min(self.ranked.len())]
    }

    pub fn top_features(&self) -> &[FeatureImportance] {
        self.top(TOP_FEATURE_COUNT)
    }

    /// The single most important feature, highlighted on the dashboard.
    pub fn leading(&self) -> Option<&FeatureImportance> {
        self.ranked.first()
    }

    /// Writes `feature,importance` rows for the first `limit` entries.
    pub fn write_csv<W: Write>(&self, writer: W, limit: usize) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for entry in self.top(limit) {
            csv_writer.serialize(entry)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
