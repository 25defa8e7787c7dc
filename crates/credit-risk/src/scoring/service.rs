use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use super::domain::{ApplicantRecord, ApplicantSubmission};
use super::importance::{FeatureImportanceRanking, RankingError};
use super::intake::{IntakeViolation, SubmissionPayload};
use super::pipeline::{InferencePipeline, PredictionError};
use super::risk::RiskAssessment;

/// Process-wide scoring service. Built once at startup around the loaded
/// pipeline and shared read-only between requests.
pub struct CreditRiskService<P> {
    pipeline: Arc<P>,
    importances: FeatureImportanceRanking,
}

impl<P> CreditRiskService<P>
where
    P: InferencePipeline + 'static,
{
    /// Ranks the pipeline's feature importances once; they never change
    /// for a given artifact.
    pub fn new(pipeline: Arc<P>) -> Result<Self, RankingError> {
        let importances = FeatureImportanceRanking::rank(
            pipeline.feature_names(),
            pipeline.feature_importances(),
        )?;

        Ok(Self {
            pipeline,
            importances,
        })
    }

    /// Validate, bin, encode, classify and segment one submission.
    pub fn assess(
        &self,
        submission: &ApplicantSubmission,
    ) -> Result<CreditAssessment, AssessmentError> {
        let record = ApplicantRecord::from_submission(submission).map_err(rejected)?;

        let risk = self.score(&record).map_err(|err| {
            error!(error = %err, "prediction failed");
            err
        })?;

        info!(
            probability = risk.probability_of_default,
            decision = risk.decision.label(),
            segment = risk.segment.label(),
            "applicant scored"
        );

        Ok(CreditAssessment { record, risk })
    }

    /// Parses the option labels of an HTTP payload, then assesses it.
    pub fn assess_payload(
        &self,
        payload: SubmissionPayload,
    ) -> Result<CreditAssessment, AssessmentError> {
        let submission = ApplicantSubmission::try_from(payload).map_err(rejected)?;
        self.assess(&submission)
    }

    pub fn score(&self, record: &ApplicantRecord) -> Result<RiskAssessment, PredictionError> {
        let probability = self.pipeline.predict_record(record)?;
        Ok(RiskAssessment::from_probability(probability))
    }

    pub fn feature_importances(&self) -> &FeatureImportanceRanking {
        &self.importances
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }
}

fn rejected(violation: IntakeViolation) -> IntakeViolation {
    warn!(field = violation.field(), error = %violation, "submission rejected");
    violation
}

/// Result of one submitted form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreditAssessment {
    pub record: ApplicantRecord,
    pub risk: RiskAssessment,
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}
