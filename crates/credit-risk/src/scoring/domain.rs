use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::binning::{AgeBand, CreditBand, DurationBand, FeatureBins};
use super::intake::IntakeViolation;

/// Column names as the preprocessing stage saw them during training.
pub mod columns {
    pub const AGE: &str = "Age";
    pub const SEX: &str = "Sex";
    pub const JOB: &str = "Job";
    pub const HOUSING: &str = "Housing";
    pub const SAVING_ACCOUNTS: &str = "Saving accounts";
    pub const CHECKING_ACCOUNT: &str = "Checking account";
    pub const CREDIT_AMOUNT: &str = "Credit amount";
    pub const DURATION: &str = "Duration";
    pub const PURPOSE: &str = "Purpose";
    pub const AGE_BIN: &str = "age_bin";
    pub const CREDIT_BIN: &str = "credit_bin";
    pub const DURATION_BIN: &str = "duration_bin";

    pub const ALL: [&str; 12] = [
        AGE,
        SEX,
        JOB,
        HOUSING,
        SAVING_ACCOUNTS,
        CHECKING_ACCOUNT,
        CREDIT_AMOUNT,
        DURATION,
        PURPOSE,
        AGE_BIN,
        CREDIT_BIN,
        DURATION_BIN,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(try_from = "String")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const fn ordered() -> [Self; 2] {
        [Self::Male, Self::Female]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(try_from = "String")]
pub enum Housing {
    Own,
    Rent,
    Free,
}

impl Housing {
    pub const fn ordered() -> [Self; 3] {
        [Self::Own, Self::Rent, Self::Free]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Own => "own",
            Self::Rent => "rent",
            Self::Free => "free",
        }
    }
}

/// Savings balance bracket. Missing data was encoded as `Unknown` in training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum SavingAccounts {
    #[serde(rename = "little")]
    Little,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "quite rich")]
    QuiteRich,
    #[serde(rename = "rich")]
    Rich,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl SavingAccounts {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Little,
            Self::Moderate,
            Self::QuiteRich,
            Self::Rich,
            Self::Unknown,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Little => "little",
            Self::Moderate => "moderate",
            Self::QuiteRich => "quite rich",
            Self::Rich => "rich",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum CheckingAccount {
    #[serde(rename = "little")]
    Little,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "rich")]
    Rich,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl CheckingAccount {
    pub const fn ordered() -> [Self; 4] {
        [Self::Little, Self::Moderate, Self::Rich, Self::Unknown]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Little => "little",
            Self::Moderate => "moderate",
            Self::Rich => "rich",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Purpose {
    #[serde(rename = "radio/TV")]
    RadioTv,
    #[serde(rename = "car")]
    Car,
    #[serde(rename = "furniture/equipment")]
    FurnitureEquipment,
    #[serde(rename = "business")]
    Business,
    #[serde(rename = "education")]
    Education,
    #[serde(rename = "vacation/others")]
    VacationOthers,
    #[serde(rename = "repairs")]
    Repairs,
    #[serde(rename = "domestic appliances")]
    DomesticAppliances,
}

impl Purpose {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::RadioTv,
            Self::Car,
            Self::FurnitureEquipment,
            Self::Business,
            Self::Education,
            Self::VacationOthers,
            Self::Repairs,
            Self::DomesticAppliances,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::RadioTv => "radio/TV",
            Self::Car => "car",
            Self::FurnitureEquipment => "furniture/equipment",
            Self::Business => "business",
            Self::Education => "education",
            Self::VacationOthers => "vacation/others",
            Self::Repairs => "repairs",
            Self::DomesticAppliances => "domestic appliances",
        }
    }
}

fn parse_option<T: Copy>(
    field: &'static str,
    raw: &str,
    options: &[T],
    label: fn(T) -> &'static str,
) -> Result<T, IntakeViolation> {
    let wanted = raw.trim();
    options
        .iter()
        .copied()
        .find(|option| label(*option).eq_ignore_ascii_case(wanted))
        .ok_or_else(|| IntakeViolation::UnknownOption {
            field,
            value: raw.to_string(),
        })
}

impl FromStr for Sex {
    type Err = IntakeViolation;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_option(columns::SEX, raw, &Self::ordered(), Self::label)
    }
}

impl FromStr for Housing {
    type Err = IntakeViolation;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_option(columns::HOUSING, raw, &Self::ordered(), Self::label)
    }
}

impl FromStr for SavingAccounts {
    type Err = IntakeViolation;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_option(columns::SAVING_ACCOUNTS, raw, &Self::ordered(), Self::label)
    }
}

impl FromStr for CheckingAccount {
    type Err = IntakeViolation;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_option(columns::CHECKING_ACCOUNT, raw, &Self::ordered(), Self::label)
    }
}

impl FromStr for Purpose {
    type Err = IntakeViolation;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        parse_option(columns::PURPOSE, raw, &Self::ordered(), Self::label)
    }
}

/// Payloads go through the same case-insensitive parsing as the CLI.
macro_rules! parse_from_string {
    ($($option:ty),+ $(,)?) => {
        $(
            impl TryFrom<String> for $option {
                type Error = IntakeViolation;

                fn try_from(raw: String) -> Result<Self, Self::Error> {
                    raw.parse()
                }
            }
        )+
    };
}

parse_from_string!(Sex, Housing, SavingAccounts, CheckingAccount, Purpose);

/// Raw form payload. Numbers are unchecked until intake validates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantSubmission {
    pub age: i64,
    pub sex: Sex,
    pub job: i64,
    pub housing: Housing,
    pub saving_accounts: SavingAccounts,
    pub checking_account: CheckingAccount,
    pub credit_amount: i64,
    pub duration: i64,
    pub purpose: Purpose,
}

impl Default for ApplicantSubmission {
    /// The pre-filled form values.
    fn default() -> Self {
        Self {
            age: 35,
            sex: Sex::Male,
            job: 2,
            housing: Housing::Own,
            saving_accounts: SavingAccounts::Little,
            checking_account: CheckingAccount::Moderate,
            credit_amount: 2000,
            duration: 12,
            purpose: Purpose::RadioTv,
        }
    }
}

/// A single cell of the assembled record as the preprocessing stage reads it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnValue {
    Numeric(f64),
    Categorical(&'static str),
}

impl fmt::Display for ColumnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnValue::Numeric(value) => write!(f, "{value}"),
            ColumnValue::Categorical(label) => f.write_str(label),
        }
    }
}

/// Validated applicant row with its derived bins. Only intake builds these,
/// and nothing mutates one afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicantRecord {
    #[serde(rename = "Age")]
    age: u8,
    #[serde(rename = "Sex")]
    sex: Sex,
    #[serde(rename = "Job")]
    job: u8,
    #[serde(rename = "Housing")]
    housing: Housing,
    #[serde(rename = "Saving accounts")]
    saving_accounts: SavingAccounts,
    #[serde(rename = "Checking account")]
    checking_account: CheckingAccount,
    #[serde(rename = "Credit amount")]
    credit_amount: u32,
    #[serde(rename = "Duration")]
    duration: u8,
    #[serde(rename = "Purpose")]
    purpose: Purpose,
    #[serde(rename = "age_bin")]
    age_bin: AgeBand,
    #[serde(rename = "credit_bin")]
    credit_bin: CreditBand,
    #[serde(rename = "duration_bin")]
    duration_bin: DurationBand,
}

impl ApplicantRecord {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        age: u8,
        sex: Sex,
        job: u8,
        housing: Housing,
        saving_accounts: SavingAccounts,
        checking_account: CheckingAccount,
        credit_amount: u32,
        duration: u8,
        purpose: Purpose,
        bins: FeatureBins,
    ) -> Self {
        Self {
            age,
            sex,
            job,
            housing,
            saving_accounts,
            checking_account,
            credit_amount,
            duration,
            purpose,
            age_bin: bins.age,
            credit_bin: bins.credit,
            duration_bin: bins.duration,
        }
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn job(&self) -> u8 {
        self.job
    }

    pub fn housing(&self) -> Housing {
        self.housing
    }

    pub fn saving_accounts(&self) -> SavingAccounts {
        self.saving_accounts
    }

    pub fn checking_account(&self) -> CheckingAccount {
        self.checking_account
    }

    pub fn credit_amount(&self) -> u32 {
        self.credit_amount
    }

    pub fn duration(&self) -> u8 {
        self.duration
    }

    pub fn purpose(&self) -> Purpose {
        self.purpose
    }

    pub fn bins(&self) -> FeatureBins {
        FeatureBins {
            age: self.age_bin,
            credit: self.credit_bin,
            duration: self.duration_bin,
        }
    }

    /// Looks up a column by its training-time name.
    pub fn column(&self, name: &str) -> Option<ColumnValue> {
        let value = match name {
            columns::AGE => ColumnValue::Numeric(f64::from(self.age)),
            columns::SEX => ColumnValue::Categorical(self.sex.label()),
            columns::JOB => ColumnValue::Numeric(f64::from(self.job)),
            columns::HOUSING => ColumnValue::Categorical(self.housing.label()),
            columns::SAVING_ACCOUNTS => ColumnValue::Categorical(self.saving_accounts.label()),
            columns::CHECKING_ACCOUNT => ColumnValue::Categorical(self.checking_account.label()),
            columns::CREDIT_AMOUNT => ColumnValue::Numeric(f64::from(self.credit_amount)),
            columns::DURATION => ColumnValue::Numeric(f64::from(self.duration)),
            columns::PURPOSE => ColumnValue::Categorical(self.purpose.label()),
            columns::AGE_BIN => ColumnValue::Categorical(self.age_bin.label()),
            columns::CREDIT_BIN => ColumnValue::Categorical(self.credit_bin.label()),
            columns::DURATION_BIN => ColumnValue::Categorical(self.duration_bin.label()),
            _ => return None,
        };
        Some(value)
    }

    /// Column/value pairs in training column order, for tabular display.
    pub fn cells(&self) -> Vec<(&'static str, ColumnValue)> {
        columns::ALL
            .iter()
            .filter_map(|name| self.column(name).map(|value| (*name, value)))
            .collect()
    }
}
