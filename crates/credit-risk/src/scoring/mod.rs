//! Credit default risk scoring: applicant intake and binning, inference
//! through the pretrained pipeline, risk segmentation and feature
//! importance ranking.

pub mod binning;
pub mod dashboard;
pub mod domain;
pub mod form;
pub mod importance;
pub mod intake;
pub mod model;
pub mod pipeline;
pub mod risk;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use binning::{bin_features, AgeBand, BinningError, CreditBand, DurationBand, FeatureBins};
pub use dashboard::{DashboardView, ImportanceSummary, SIMULATION_CAPTION};
pub use domain::{
    ApplicantRecord, ApplicantSubmission, CheckingAccount, ColumnValue, Housing, Purpose,
    SavingAccounts, Sex,
};
pub use importance::{FeatureImportance, FeatureImportanceRanking, RankingError, TOP_FEATURE_COUNT};
pub use intake::{IntakeViolation, SubmissionPayload};
pub use model::{ModelArtifact, ModelLoadError, DEFAULT_ARTIFACT_PATH};
pub use pipeline::{InferencePipeline, PredictionError};
pub use risk::{CreditDecision, RiskAssessment, RiskSegment, DEFAULT_PROBABILITY_THRESHOLD};
pub use router::assessment_router;
pub use service::{AssessmentError, CreditAssessment, CreditRiskService};
