use std::sync::Arc;

use super::common::*;
use crate::scoring::dashboard::{DashboardView, SIMULATION_CAPTION};
use crate::scoring::domain::ApplicantSubmission;
use crate::scoring::pipeline::PredictionError;
use crate::scoring::risk::{CreditDecision, RiskSegment};
use crate::scoring::service::{AssessmentError, CreditRiskService};

#[test]
fn default_submission_scores_low_risk() {
    let service = artifact_service();
    let assessment = service
        .assess(&ApplicantSubmission::default())
        .expect("assessment succeeds");

    assert!((assessment.risk.probability_of_default - DEFAULT_RECORD_PROBABILITY).abs() < 1e-12);
    assert_eq!(assessment.risk.decision, CreditDecision::Good);
    assert_eq!(assessment.risk.segment, RiskSegment::Low);
    assert_eq!(assessment.record, default_record());
}

#[test]
fn repeated_assessments_are_identical() {
    let service = artifact_service();
    let first = service
        .assess(&ApplicantSubmission::default())
        .expect("assessment succeeds");

    for _ in 0..10 {
        let again = service
            .assess(&ApplicantSubmission::default())
            .expect("assessment succeeds");
        assert_eq!(again.record.bins(), first.record.bins());
        assert_eq!(
            again.risk.probability_of_default.to_bits(),
            first.risk.probability_of_default.to_bits()
        );
    }
}

#[test]
fn long_large_loans_score_high_risk() {
    let service = artifact_service();
    let assessment = service
        .assess(&high_risk_submission())
        .expect("assessment succeeds");

    let expected = (45.0 / 65.0 + 35.0 / 50.0 + 30.0 / 40.0) / 3.0;
    assert!((assessment.risk.probability_of_default - expected).abs() < 1e-12);
    assert_eq!(assessment.risk.decision, CreditDecision::Bad);
    assert_eq!(assessment.risk.segment, RiskSegment::High);
}

#[test]
fn younger_applicant_lands_in_medium_segment() {
    let service = artifact_service();
    let submission = ApplicantSubmission {
        age: 22,
        ..high_risk_submission()
    };
    let assessment = service.assess(&submission).expect("assessment succeeds");

    assert_eq!(assessment.risk.decision, CreditDecision::Bad);
    assert_eq!(assessment.risk.segment, RiskSegment::Medium);
}

#[test]
fn intake_violations_short_circuit_inference() {
    let service = CreditRiskService::new(Arc::new(MismatchedPipeline::default()))
        .expect("ranking builds");
    let submission = ApplicantSubmission {
        age: 101,
        ..ApplicantSubmission::default()
    };

    let err = service.assess(&submission).expect_err("age out of range");
    assert!(matches!(err, AssessmentError::Intake(_)));
}

#[test]
fn schema_mismatch_surfaces_as_prediction_error() {
    let service = CreditRiskService::new(Arc::new(MismatchedPipeline::default()))
        .expect("ranking builds");

    let err = service
        .assess(&ApplicantSubmission::default())
        .expect_err("transformer rejects record");
    assert!(matches!(
        err,
        AssessmentError::Prediction(PredictionError::SchemaMismatch(_))
    ));
}

#[test]
fn threshold_applies_to_pipeline_output() {
    let service = CreditRiskService::new(Arc::new(FixedPipeline::new(0.54))).expect("ranking");
    let assessment = service
        .assess(&ApplicantSubmission::default())
        .expect("assessment succeeds");
    assert_eq!(assessment.risk.decision, CreditDecision::Bad);
    assert_eq!(assessment.risk.segment, RiskSegment::Medium);
}

#[test]
fn mismatched_importances_fail_service_construction() {
    let mut pipeline = FixedPipeline::new(0.1);
    pipeline.importances.push(0.0);
    assert!(CreditRiskService::new(Arc::new(pipeline)).is_err());
}

#[test]
fn shipped_ranking_highlights_credit_amount() {
    let service = artifact_service();
    let ranking = service.feature_importances();

    let top: Vec<&str> = ranking
        .top_features()
        .iter()
        .map(|entry| entry.feature.as_str())
        .collect();
    assert_eq!(
        top,
        [
            "num__Credit amount",
            "num__Duration",
            "num__Age",
            "cat__Checking account_little",
            "cat__Saving accounts_little",
            "cat__duration_bin_>48",
            "num__Job",
            "cat__Checking account_Unknown",
            "cat__Housing_own",
            "cat__Saving accounts_Unknown",
        ]
    );
}

#[test]
fn dashboard_view_carries_every_rendered_element() {
    let service = artifact_service();
    let assessment = service
        .assess(&ApplicantSubmission::default())
        .expect("assessment succeeds");
    let view = DashboardView::build(&assessment, service.feature_importances());

    assert_eq!(view.metrics.probability_display, "0.266");
    assert_eq!(view.metrics.prediction, CreditDecision::Good);
    let top = view.top_feature.as_ref().expect("top feature present");
    assert_eq!(top.feature, "num__Credit amount");
    assert_eq!(top.percent_display, "18.00 %");
    assert_eq!(view.feature_importances.len(), 10);
    assert_eq!(view.chart.len(), 10);
    assert_eq!(view.chart.last().map(|bar| bar.feature.as_str()), Some("num__Credit amount"));
    assert_eq!(view.chart[0].feature, "cat__Saving accounts_Unknown");
    assert_eq!(view.caption, SIMULATION_CAPTION);
}

#[test]
fn pipeline_with_nan_importance_cannot_build_a_service() {
    let mut pipeline = FixedPipeline::new(0.3);
    pipeline.importances = vec![0.4, f64::NAN];

    let result = CreditRiskService::new(Arc::new(pipeline));
    assert!(matches!(
        result,
        Err(crate::scoring::importance::RankingError::NonFinite { .. })
    ));
}

#[test]
fn payload_labels_parse_before_assessment() {
    let service = artifact_service();
    let mut payload = crate::scoring::intake::SubmissionPayload::from(&ApplicantSubmission::default());
    payload.housing = "Own".to_string();
    let assessment = service.assess_payload(payload.clone()).expect("case-insensitive label");
    assert_eq!(assessment.record, default_record());

    payload.housing = "castle".to_string();
    match service.assess_payload(payload) {
        Err(AssessmentError::Intake(violation)) => assert_eq!(violation.field(), "Housing"),
        other => panic!("expected intake violation, got {other:?}"),
    }
}
