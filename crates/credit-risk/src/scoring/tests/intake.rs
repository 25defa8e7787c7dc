use crate::scoring::binning::{AgeBand, CreditBand, DurationBand};
use crate::scoring::domain::{
    columns, ApplicantRecord, ApplicantSubmission, CheckingAccount, ColumnValue, Purpose,
    SavingAccounts, Sex,
};
use crate::scoring::intake::IntakeViolation;

#[test]
fn default_submission_assembles_with_bins() {
    let record = ApplicantRecord::from_submission(&ApplicantSubmission::default())
        .expect("defaults are valid");

    let bins = record.bins();
    assert_eq!(bins.age, AgeBand::From30To35);
    assert_eq!(bins.credit, CreditBand::Low);
    assert_eq!(bins.duration, DurationBand::UpTo12);
    assert_eq!(record.column(columns::AGE), Some(ColumnValue::Numeric(35.0)));
    assert_eq!(
        record.column(columns::PURPOSE),
        Some(ColumnValue::Categorical("radio/TV"))
    );
    assert_eq!(record.column("Income"), None);
}

#[test]
fn rejects_values_outside_form_ranges() {
    let cases = [
        (
            ApplicantSubmission {
                age: 17,
                ..ApplicantSubmission::default()
            },
            "Age",
        ),
        (
            ApplicantSubmission {
                job: 4,
                ..ApplicantSubmission::default()
            },
            "Job",
        ),
        (
            ApplicantSubmission {
                credit_amount: 50_001,
                ..ApplicantSubmission::default()
            },
            "Credit amount",
        ),
        (
            ApplicantSubmission {
                duration: 0,
                ..ApplicantSubmission::default()
            },
            "Duration",
        ),
    ];

    for (submission, field) in cases {
        let err = ApplicantRecord::from_submission(&submission).expect_err("out of range");
        assert!(matches!(err, IntakeViolation::OutOfRange { .. }));
        assert_eq!(err.field(), field);
    }
}

#[test]
fn range_edges_are_accepted() {
    let low = ApplicantSubmission {
        age: 18,
        job: 0,
        credit_amount: 0,
        duration: 1,
        ..ApplicantSubmission::default()
    };
    let high = ApplicantSubmission {
        age: 100,
        job: 3,
        credit_amount: 50_000,
        duration: 100,
        ..ApplicantSubmission::default()
    };

    let low = ApplicantRecord::try_from(low).expect("lower edges valid");
    let high = ApplicantRecord::try_from(high).expect("upper edges valid");
    assert_eq!(low.bins().labels(), ["(18, 25]", "very low", "<=12"]);
    assert_eq!(high.bins().labels(), ["(60, 100]", "high", ">48"]);
}

#[test]
fn option_labels_parse_case_insensitively() {
    assert_eq!("Male".parse::<Sex>(), Ok(Sex::Male));
    assert_eq!("quite rich".parse::<SavingAccounts>(), Ok(SavingAccounts::QuiteRich));
    assert_eq!("unknown".parse::<CheckingAccount>(), Ok(CheckingAccount::Unknown));
    assert_eq!(
        "domestic appliances".parse::<Purpose>(),
        Ok(Purpose::DomesticAppliances)
    );

    let err = "boat".parse::<Purpose>().expect_err("not a purpose");
    assert_eq!(err.field(), "Purpose");
}

#[test]
fn submission_accepts_training_labels_and_aliases() {
    let payload = serde_json::json!({
        "age": 29,
        "sex": "female",
        "job": 1,
        "housing": "rent",
        "saving_accounts": "unknown",
        "checking_account": "Unknown",
        "credit_amount": 7500,
        "duration": 30,
        "purpose": "furniture/equipment"
    });

    let submission: ApplicantSubmission = serde_json::from_value(payload).expect("deserializes");
    assert_eq!(submission.saving_accounts, SavingAccounts::Unknown);
    assert_eq!(submission.checking_account, CheckingAccount::Unknown);

    let record = ApplicantRecord::from_submission(&submission).expect("valid");
    let table = serde_json::to_value(&record).expect("serializes");
    assert_eq!(table["Saving accounts"], "Unknown");
    assert_eq!(table["Credit amount"], 7500);
    assert_eq!(table["age_bin"], "(25, 30]");
    assert_eq!(table["credit_bin"], "mid");
    assert_eq!(table["duration_bin"], "25-36");
}

#[test]
fn cells_follow_training_column_order() {
    let record = ApplicantRecord::from_submission(&ApplicantSubmission::default())
        .expect("defaults are valid");
    let names: Vec<&str> = record.cells().iter().map(|(name, _)| *name).collect();
    assert_eq!(names, columns::ALL);
}
