use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::binning::{bin_features, BinningError};
use super::domain::{columns, ApplicantRecord, ApplicantSubmission};

pub const AGE_RANGE: RangeInclusive<i64> = 18..=100;
pub const JOB_RANGE: RangeInclusive<i64> = 0..=3;
pub const CREDIT_AMOUNT_RANGE: RangeInclusive<i64> = 0..=50_000;
pub const DURATION_RANGE: RangeInclusive<i64> = 1..=100;

/// Validation errors raised while turning a form submission into a record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("{field} must be between {min} and {max} (found {found})")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        found: i64,
    },
    #[error("{field} does not accept '{value}'")]
    UnknownOption { field: &'static str, value: String },
    #[error(transparent)]
    Binning(#[from] BinningError),
}

impl IntakeViolation {
    pub fn field(&self) -> &'static str {
        match self {
            IntakeViolation::OutOfRange { field, .. }
            | IntakeViolation::UnknownOption { field, .. } => field,
            IntakeViolation::Binning(BinningError::OutOfRange { field, .. }) => field,
        }
    }
}

/// JSON shape for rejected submissions.
#[derive(Debug, Clone, Serialize)]
pub struct IntakeViolationView {
    pub error: String,
    pub field: &'static str,
}

impl From<&IntakeViolation> for IntakeViolationView {
    fn from(violation: &IntakeViolation) -> Self {
        Self {
            error: violation.to_string(),
            field: violation.field(),
        }
    }
}

/// Submission as it arrives over HTTP. Option fields stay free text until
/// intake parses them, so an unknown label is reported against its field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub age: i64,
    pub sex: String,
    pub job: i64,
    pub housing: String,
    pub saving_accounts: String,
    pub checking_account: String,
    pub credit_amount: i64,
    pub duration: i64,
    pub purpose: String,
}

impl From<&ApplicantSubmission> for SubmissionPayload {
    fn from(submission: &ApplicantSubmission) -> Self {
        Self {
            age: submission.age,
            sex: submission.sex.label().to_string(),
            job: submission.job,
            housing: submission.housing.label().to_string(),
            saving_accounts: submission.saving_accounts.label().to_string(),
            checking_account: submission.checking_account.label().to_string(),
            credit_amount: submission.credit_amount,
            duration: submission.duration,
            purpose: submission.purpose.label().to_string(),
        }
    }
}

impl TryFrom<SubmissionPayload> for ApplicantSubmission {
    type Error = IntakeViolation;

    fn try_from(payload: SubmissionPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            age: payload.age,
            sex: payload.sex.parse()?,
            job: payload.job,
            housing: payload.housing.parse()?,
            saving_accounts: payload.saving_accounts.parse()?,
            checking_account: payload.checking_account.parse()?,
            credit_amount: payload.credit_amount,
            duration: payload.duration,
            purpose: payload.purpose.parse()?,
        })
    }
}

fn within(
    field: &'static str,
    range: &RangeInclusive<i64>,
    found: i64,
) -> Result<i64, IntakeViolation> {
    if range.contains(&found) {
        Ok(found)
    } else {
        Err(IntakeViolation::OutOfRange {
            field,
            min: *range.start(),
            max: *range.end(),
            found,
        })
    }
}

impl ApplicantRecord {
    /// Validates ranges, derives the bins and assembles the immutable record.
    pub fn from_submission(submission: &ApplicantSubmission) -> Result<Self, IntakeViolation> {
        let age = within(columns::AGE, &AGE_RANGE, submission.age)?;
        let job = within(columns::JOB, &JOB_RANGE, submission.job)?;
        let credit_amount = within(
            columns::CREDIT_AMOUNT,
            &CREDIT_AMOUNT_RANGE,
            submission.credit_amount,
        )?;
        let duration = within(columns::DURATION, &DURATION_RANGE, submission.duration)?;

        let bins = bin_features(age as f64, credit_amount as f64, duration as f64)?;

        Ok(ApplicantRecord::assemble(
            age as u8,
            submission.sex,
            job as u8,
            submission.housing,
            submission.saving_accounts,
            submission.checking_account,
            credit_amount as u32,
            duration as u8,
            submission.purpose,
            bins,
        ))
    }
}

impl TryFrom<ApplicantSubmission> for ApplicantRecord {
    type Error = IntakeViolation;

    fn try_from(submission: ApplicantSubmission) -> Result<Self, Self::Error> {
        ApplicantRecord::from_submission(&submission)
    }
}
