//! Discretization of the raw numeric applicant attributes into the categorical
//! bands the scoring pipeline was trained on.
//!
//! Edges and labels are fixed. A label that drifts from the training-time
//! string does not fail anywhere downstream; the one-hot encoder simply
//! treats it as an unseen category. Boundary behavior is covered by tests.

use serde::{Deserialize, Serialize};

/// Age edges. Intervals are right-closed, `(a, b]`; the lowest edge (18) is
/// included in the first interval.
pub const AGE_EDGES: [f64; 8] = [18.0, 25.0, 30.0, 35.0, 40.0, 50.0, 60.0, 100.0];

/// Credit amount edges. Intervals are left-closed, `[a, b)`.
pub const CREDIT_EDGES: [f64; 5] = [0.0, 2000.0, 5000.0, 10000.0, 1e10];

/// Duration edges in months. Intervals are right-closed, `(a, b]`.
pub const DURATION_EDGES: [f64; 6] = [0.0, 12.0, 24.0, 36.0, 48.0, 100.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "(18, 25]")]
    From18To25,
    #[serde(rename = "(25, 30]")]
    From25To30,
    #[serde(rename = "(30, 35]")]
    From30To35,
    #[serde(rename = "(35, 40]")]
    From35To40,
    #[serde(rename = "(40, 50]")]
    From40To50,
    #[serde(rename = "(50, 60]")]
    From50To60,
    #[serde(rename = "(60, 100]")]
    From60To100,
}

impl AgeBand {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::From18To25,
            Self::From25To30,
            Self::From30To35,
            Self::From35To40,
            Self::From40To50,
            Self::From50To60,
            Self::From60To100,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::From18To25 => "(18, 25]",
            Self::From25To30 => "(25, 30]",
            Self::From30To35 => "(30, 35]",
            Self::From35To40 => "(35, 40]",
            Self::From40To50 => "(40, 50]",
            Self::From50To60 => "(50, 60]",
            Self::From60To100 => "(60, 100]",
        }
    }

    pub fn from_age(age: f64) -> Option<Self> {
        right_closed_index(&AGE_EDGES, age, true).map(|index| Self::ordered()[index])
    }
}

/// Credit bands, ordered by severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CreditBand {
    #[serde(rename = "very low")]
    VeryLow,
    #[serde(rename = "low")]
    Low,
    #[serde(rename = "mid")]
    Mid,
    #[serde(rename = "high")]
    High,
}

impl CreditBand {
    pub const fn ordered() -> [Self; 4] {
        [Self::VeryLow, Self::Low, Self::Mid, Self::High]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryLow => "very low",
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        }
    }

    pub fn from_amount(amount: f64) -> Option<Self> {
        left_closed_index(&CREDIT_EDGES, amount).map(|index| Self::ordered()[index])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DurationBand {
    #[serde(rename = "<=12")]
    UpTo12,
    #[serde(rename = "13-24")]
    From13To24,
    #[serde(rename = "25-36")]
    From25To36,
    #[serde(rename = "37-48")]
    From37To48,
    #[serde(rename = ">48")]
    Over48,
}

impl DurationBand {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::UpTo12,
            Self::From13To24,
            Self::From25To36,
            Self::From37To48,
            Self::Over48,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UpTo12 => "<=12",
            Self::From13To24 => "13-24",
            Self::From25To36 => "25-36",
            Self::From37To48 => "37-48",
            Self::Over48 => ">48",
        }
    }

    pub fn from_months(months: f64) -> Option<Self> {
        right_closed_index(&DURATION_EDGES, months, false).map(|index| Self::ordered()[index])
    }
}

/// The three derived bands for one applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureBins {
    pub age: AgeBand,
    pub credit: CreditBand,
    pub duration: DurationBand,
}

impl FeatureBins {
    pub fn labels(&self) -> [&'static str; 3] {
        [self.age.label(), self.credit.label(), self.duration.label()]
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BinningError {
    #[error("{field} value {value} falls outside every bin")]
    OutOfRange { field: &'static str, value: f64 },
}

/// Maps (age, credit amount, duration) onto their bands.
pub fn bin_features(
    age: f64,
    credit_amount: f64,
    duration: f64,
) -> Result<FeatureBins, BinningError> {
    let age_band = AgeBand::from_age(age).ok_or(BinningError::OutOfRange {
        field: "Age",
        value: age,
    })?;
    let credit_band = CreditBand::from_amount(credit_amount).ok_or(BinningError::OutOfRange {
        field: "Credit amount",
        value: credit_amount,
    })?;
    let duration_band = DurationBand::from_months(duration).ok_or(BinningError::OutOfRange {
        field: "Duration",
        value: duration,
    })?;

    Ok(FeatureBins {
        age: age_band,
        credit: credit_band,
        duration: duration_band,
    })
}

fn right_closed_index(edges: &[f64], value: f64, include_lowest: bool) -> Option<usize> {
    let (first, last) = (*edges.first()?, *edges.last()?);
    if !value.is_finite() || value < first || value > last {
        return None;
    }
    if value == first {
        return include_lowest.then_some(0);
    }
    edges.windows(2).position(|pair| value <= pair[1])
}

fn left_closed_index(edges: &[f64], value: f64) -> Option<usize> {
    let (first, last) = (*edges.first()?, *edges.last()?);
    if !value.is_finite() || value < first || value >= last {
        return None;
    }
    edges.windows(2).position(|pair| value < pair[1])
}
