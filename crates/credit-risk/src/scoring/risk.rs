use std::fmt;

use serde::{Deserialize, Serialize};

/// Probability at or above which an applicant is classified BAD.
pub const DEFAULT_PROBABILITY_THRESHOLD: f64 = 0.54;
/// Lowest probability in the Medium segment.
pub const MEDIUM_RISK_FLOOR: f64 = 0.4;
/// Lowest probability in the High segment.
pub const HIGH_RISK_FLOOR: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CreditDecision {
    Good,
    Bad,
}

impl CreditDecision {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "GOOD",
            Self::Bad => "BAD",
        }
    }
}

impl fmt::Display for CreditDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskSegment {
    Low,
    Medium,
    High,
}

impl RiskSegment {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn from_probability(probability: f64) -> Self {
        if probability < MEDIUM_RISK_FLOOR {
            Self::Low
        } else if probability < HIGH_RISK_FLOOR {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl fmt::Display for RiskSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Decision and segment for one probability of default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub probability_of_default: f64,
    pub decision: CreditDecision,
    pub segment: RiskSegment,
}

impl RiskAssessment {
    pub fn from_probability(probability_of_default: f64) -> Self {
        let decision = if probability_of_default >= DEFAULT_PROBABILITY_THRESHOLD {
            CreditDecision::Bad
        } else {
            CreditDecision::Good
        };

        Self {
            probability_of_default,
            decision,
            segment: RiskSegment::from_probability(probability_of_default),
        }
    }
}
