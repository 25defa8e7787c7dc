use crate::scoring::risk::{CreditDecision, RiskAssessment, RiskSegment};

fn assess(probability: f64) -> (CreditDecision, RiskSegment) {
    let assessment = RiskAssessment::from_probability(probability);
    assert_eq!(assessment.probability_of_default, probability);
    (assessment.decision, assessment.segment)
}

#[test]
fn threshold_boundaries_match_the_scoring_contract() {
    assert_eq!(assess(0.53), (CreditDecision::Good, RiskSegment::Medium));
    assert_eq!(assess(0.54), (CreditDecision::Bad, RiskSegment::Medium));
    assert_eq!(assess(0.39), (CreditDecision::Good, RiskSegment::Low));
    assert_eq!(assess(0.70), (CreditDecision::Bad, RiskSegment::High));
}

#[test]
fn segment_floors_are_inclusive() {
    assert_eq!(RiskSegment::from_probability(0.4), RiskSegment::Medium);
    assert_eq!(RiskSegment::from_probability(0.399_999), RiskSegment::Low);
    assert_eq!(RiskSegment::from_probability(0.699_999), RiskSegment::Medium);
    assert_eq!(RiskSegment::from_probability(0.7), RiskSegment::High);
}

#[test]
fn extremes_are_scored() {
    assert_eq!(assess(0.0), (CreditDecision::Good, RiskSegment::Low));
    assert_eq!(assess(1.0), (CreditDecision::Bad, RiskSegment::High));
}

#[test]
fn labels_match_dashboard_wording() {
    let json = serde_json::to_value(RiskAssessment::from_probability(0.8)).expect("serializes");
    assert_eq!(json["decision"], "BAD");
    assert_eq!(json["segment"], "High");
    assert_eq!(CreditDecision::Good.to_string(), "GOOD");
}
