use serde::Serialize;

use super::domain::{
    ApplicantSubmission, CheckingAccount, Housing, Purpose, SavingAccounts, Sex,
};
use super::intake::{AGE_RANGE, CREDIT_AMOUNT_RANGE, DURATION_RANGE, JOB_RANGE};

/// Input widget description for one form field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldInput {
    Integer { min: i64, max: i64, default: i64 },
    Choice {
        options: Vec<&'static str>,
        default: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    /// Key in the submission payload.
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub input: FieldInput,
}

fn integer(
    name: &'static str,
    label: &'static str,
    range: std::ops::RangeInclusive<i64>,
    default: i64,
) -> FormField {
    FormField {
        name,
        label,
        input: FieldInput::Integer {
            min: *range.start(),
            max: *range.end(),
            default,
        },
    }
}

fn choice<T: Copy>(
    name: &'static str,
    label: &'static str,
    options: &[T],
    to_label: fn(T) -> &'static str,
    default: T,
) -> FormField {
    FormField {
        name,
        label,
        input: FieldInput::Choice {
            options: options.iter().copied().map(to_label).collect(),
            default: to_label(default),
        },
    }
}

/// The nine applicant inputs, pre-filled with the default submission.
pub fn applicant_form() -> Vec<FormField> {
    let defaults = ApplicantSubmission::default();

    vec![
        integer("age", "Age", AGE_RANGE, defaults.age),
        choice("sex", "Sex", &Sex::ordered(), Sex::label, defaults.sex),
        integer(
            "job",
            "Job (0=unskilled, 3=highly skilled)",
            JOB_RANGE,
            defaults.job,
        ),
        choice(
            "housing",
            "Housing",
            &Housing::ordered(),
            Housing::label,
            defaults.housing,
        ),
        choice(
            "saving_accounts",
            "Saving accounts",
            &SavingAccounts::ordered(),
            SavingAccounts::label,
            defaults.saving_accounts,
        ),
        choice(
            "checking_account",
            "Checking account",
            &CheckingAccount::ordered(),
            CheckingAccount::label,
            defaults.checking_account,
        ),
        integer(
            "credit_amount",
            "Credit amount",
            CREDIT_AMOUNT_RANGE,
            defaults.credit_amount,
        ),
        integer(
            "duration",
            "Duration (months)",
            DURATION_RANGE,
            defaults.duration,
        ),
        choice(
            "purpose",
            "Purpose",
            &Purpose::ordered(),
            Purpose::label,
            defaults.purpose,
        ),
    ]
}
