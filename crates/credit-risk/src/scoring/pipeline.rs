use super::domain::ApplicantRecord;

/// Failures while running a validated record through the pretrained pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictionError {
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
    #[error("classifier produced a non-finite probability ({0})")]
    NonFiniteProbability(f64),
}

/// The pretrained preprocessing + classification pair.
///
/// Implementations are loaded once and shared read-only for the life of the
/// process, hence `Send + Sync` and `&self` everywhere.
pub trait InferencePipeline: Send + Sync {
    /// Encodes the record into the dense vector the classifier expects.
    fn transform(&self, record: &ApplicantRecord) -> Result<Vec<f64>, PredictionError>;

    /// Probability of the default class for one encoded row.
    fn predict_probability(&self, features: &[f64]) -> Result<f64, PredictionError>;

    /// Output feature names of the transformer, aligned with `feature_importances`.
    fn feature_names(&self) -> &[String];

    fn feature_importances(&self) -> &[f64];

    fn predict_record(&self, record: &ApplicantRecord) -> Result<f64, PredictionError> {
        let features = self.transform(record)?;
        self.predict_probability(&features)
    }
}
