//! View models for everything the dashboard renders after a submission.

use serde::Serialize;

use super::domain::ApplicantRecord;
use super::importance::{FeatureImportance, FeatureImportanceRanking};
use super::risk::{CreditDecision, RiskSegment};
use super::service::CreditAssessment;

pub const SIMULATION_CAPTION: &str = "Model: Random Forest + preprocessing pipeline. \
Prediction is a simulation only, not a final credit decision.";

#[derive(Debug, Clone, Serialize)]
pub struct HeadlineMetrics {
    pub probability_of_default: f64,
    pub probability_display: String,
    pub risk_segment: RiskSegment,
    pub prediction: CreditDecision,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopFeatureView {
    pub feature: String,
    pub importance: f64,
    pub percent_display: String,
}

impl From<&FeatureImportance> for TopFeatureView {
    fn from(entry: &FeatureImportance) -> Self {
        Self {
            feature: entry.feature.clone(),
            importance: entry.importance,
            percent_display: format!("{:.2} %", entry.percent()),
        }
    }
}

/// One bar of the horizontal chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub feature: String,
    pub importance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportanceSummary {
    pub top_feature: Option<TopFeatureView>,
    pub features: Vec<FeatureImportance>,
}

impl ImportanceSummary {
    pub fn from_ranking(ranking: &FeatureImportanceRanking, limit: usize) -> Self {
        Self {
            top_feature: ranking.leading().map(TopFeatureView::from),
            features: ranking.top(limit).to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub metrics: HeadlineMetrics,
    pub record: ApplicantRecord,
    pub top_feature: Option<TopFeatureView>,
    pub feature_importances: Vec<FeatureImportance>,
    /// Bars from least to most important so the largest is drawn on top.
    pub chart: Vec<ChartBar>,
    pub caption: &'static str,
}

impl DashboardView {
    pub fn build(assessment: &CreditAssessment, ranking: &FeatureImportanceRanking) -> Self {
        let risk = &assessment.risk;
        let top = ranking.top_features();

        Self {
            metrics: HeadlineMetrics {
                probability_of_default: risk.probability_of_default,
                probability_display: format!("{:.3}", risk.probability_of_default),
                risk_segment: risk.segment,
                prediction: risk.decision,
            },
            record: assessment.record.clone(),
            top_feature: ranking.leading().map(TopFeatureView::from),
            feature_importances: top.to_vec(),
            chart: top
                .iter()
                .rev()
                .map(|entry| ChartBar {
                    feature: entry.feature.clone(),
                    importance: entry.importance,
                })
                .collect(),
            caption: SIMULATION_CAPTION,
        }
    }
}
