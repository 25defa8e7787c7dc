use std::path::PathBuf;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::scoring::domain::{ApplicantRecord, ApplicantSubmission, CheckingAccount, SavingAccounts};
use crate::scoring::model::ModelArtifact;
use crate::scoring::pipeline::{InferencePipeline, PredictionError};
use crate::scoring::service::CreditRiskService;

/// Probability the shipped artifact assigns to the default submission:
/// the mean of 20/90, 30/80 and 20/100.
pub(super) const DEFAULT_RECORD_PROBABILITY: f64 = 287.0 / 1080.0;

pub(super) fn artifact_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../model/credit_risk_model.json")
}

pub(super) fn shipped_artifact() -> ModelArtifact {
    ModelArtifact::load(artifact_path()).expect("shipped artifact loads")
}

pub(super) fn artifact_service() -> Arc<CreditRiskService<ModelArtifact>> {
    let service = CreditRiskService::new(Arc::new(shipped_artifact())).expect("ranking builds");
    Arc::new(service)
}

pub(super) fn default_record() -> ApplicantRecord {
    ApplicantRecord::from_submission(&ApplicantSubmission::default()).expect("defaults are valid")
}

/// Long, large loan for an applicant with thin savings and checking.
pub(super) fn high_risk_submission() -> ApplicantSubmission {
    ApplicantSubmission {
        age: 40,
        credit_amount: 20_000,
        duration: 60,
        saving_accounts: SavingAccounts::Little,
        checking_account: CheckingAccount::Little,
        ..ApplicantSubmission::default()
    }
}

/// Pipeline double returning a fixed probability.
pub(super) struct FixedPipeline {
    pub(super) probability: f64,
    pub(super) names: Vec<String>,
    pub(super) importances: Vec<f64>,
}

impl FixedPipeline {
    pub(super) fn new(probability: f64) -> Self {
        Self {
            probability,
            names: vec!["num__Age".to_string(), "num__Duration".to_string()],
            importances: vec![0.4, 0.6],
        }
    }
}

impl InferencePipeline for FixedPipeline {
    fn transform(&self, record: &ApplicantRecord) -> Result<Vec<f64>, PredictionError> {
        Ok(vec![f64::from(record.age()), f64::from(record.duration())])
    }

    fn predict_probability(&self, _features: &[f64]) -> Result<f64, PredictionError> {
        Ok(self.probability)
    }

    fn feature_names(&self) -> &[String] {
        &self.names
    }

    fn feature_importances(&self) -> &[f64] {
        &self.importances
    }
}

/// Pipeline double whose transformer expects a column the record lacks.
pub(super) struct MismatchedPipeline {
    names: Vec<String>,
    importances: Vec<f64>,
}

impl Default for MismatchedPipeline {
    fn default() -> Self {
        Self {
            names: vec!["num__Income".to_string()],
            importances: vec![1.0],
        }
    }
}

impl InferencePipeline for MismatchedPipeline {
    fn transform(&self, _record: &ApplicantRecord) -> Result<Vec<f64>, PredictionError> {
        Err(PredictionError::SchemaMismatch(
            "record has no column 'Income'".to_string(),
        ))
    }

    fn predict_probability(&self, _features: &[f64]) -> Result<f64, PredictionError> {
        unreachable!("transform always fails")
    }

    fn feature_names(&self) -> &[String] {
        &self.names
    }

    fn feature_importances(&self) -> &[f64] {
        &self.importances
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
