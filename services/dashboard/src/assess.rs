use crate::infra::{apply_model_override, load_service};
use crate::render::{render_dashboard, render_importances};
use clap::Args;
use credit_risk::config::AppConfig;
use credit_risk::error::AppError;
use credit_risk::scoring::{
    ApplicantSubmission, CheckingAccount, DashboardView, Housing, ImportanceSummary, Purpose,
    SavingAccounts, Sex, TOP_FEATURE_COUNT,
};
use credit_risk::telemetry::{self, LogSink};
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Applicant age in years (18-100)
    #[arg(long, default_value_t = 35, allow_negative_numbers = true)]
    pub(crate) age: i64,
    /// male or female
    #[arg(long, default_value = "male")]
    pub(crate) sex: Sex,
    /// Job skill level (0-3)
    #[arg(long, default_value_t = 2, allow_negative_numbers = true)]
    pub(crate) job: i64,
    /// own, rent or free
    #[arg(long, default_value = "own")]
    pub(crate) housing: Housing,
    /// Unknown, little, moderate, quite rich or rich
    #[arg(long, default_value = "little")]
    pub(crate) saving_accounts: SavingAccounts,
    /// Unknown, little, moderate or rich
    #[arg(long, default_value = "moderate")]
    pub(crate) checking_account: CheckingAccount,
    /// Requested amount (0-50000)
    #[arg(long, default_value_t = 2000, allow_negative_numbers = true)]
    pub(crate) credit_amount: i64,
    /// Loan duration in months (1-100)
    #[arg(long, default_value_t = 12, allow_negative_numbers = true)]
    pub(crate) duration: i64,
    /// Purpose of the loan, e.g. "radio/TV" or "car"
    #[arg(long, default_value = "radio/TV")]
    pub(crate) purpose: Purpose,
    /// Model artifact to score with (defaults to APP_MODEL_PATH)
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
    /// Print the dashboard payload as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

impl AssessArgs {
    fn submission(&self) -> ApplicantSubmission {
        ApplicantSubmission {
            age: self.age,
            sex: self.sex,
            job: self.job,
            housing: self.housing,
            saving_accounts: self.saving_accounts,
            checking_account: self.checking_account,
            credit_amount: self.credit_amount,
            duration: self.duration,
            purpose: self.purpose,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ImportancesArgs {
    /// Number of features to list
    #[arg(long, default_value_t = TOP_FEATURE_COUNT)]
    pub(crate) limit: usize,
    /// Write `feature,importance` CSV rows to stdout
    #[arg(long)]
    pub(crate) csv: bool,
    /// Model artifact to read importances from (defaults to APP_MODEL_PATH)
    #[arg(long)]
    pub(crate) model: Option<PathBuf>,
}

fn cli_config(model: Option<PathBuf>) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    apply_model_override(&mut config, model);
    telemetry::init(&config.telemetry, LogSink::Stderr)?;
    Ok(config)
}

pub(crate) fn run_assess(mut args: AssessArgs) -> Result<(), AppError> {
    let config = cli_config(args.model.take())?;
    let (service, _) = load_service(&config.model.artifact_path)?;

    let assessment = service.assess(&args.submission())?;
    let view = DashboardView::build(&assessment, service.feature_importances());

    if args.json {
        let payload = serde_json::to_string_pretty(&view)
            .map_err(|err| AppError::Io(io::Error::other(err)))?;
        println!("{payload}");
    } else {
        render_dashboard(&view);
    }

    Ok(())
}

pub(crate) fn run_importances(mut args: ImportancesArgs) -> Result<(), AppError> {
    let config = cli_config(args.model.take())?;
    let (service, _) = load_service(&config.model.artifact_path)?;
    let ranking = service.feature_importances();

    if args.csv {
        ranking.write_csv(io::stdout().lock(), args.limit)?;
    } else {
        render_importances(&ImportanceSummary::from_ranking(ranking, args.limit));
    }

    Ok(())
}
