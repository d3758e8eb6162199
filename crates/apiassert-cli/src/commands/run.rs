//! Run command
//!
//! Usage: apiassert run --config <FILE> --suite <NAME> --class <CLASS_NAME>
//!
//! Cases naming a custom `action` fail with a missing-handler error here;
//! handlers are registered by suites embedding the runner as a library.

use apiassert_core::logging_facility::{self, Profile};
use apiassert_core::ExError;
use apiassert_runner::{load_case, CaseRunner, ReqwestDispatcher, RunnerConfig};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Configuration file
    #[arg(short, long, default_value = "apiassert.toml")]
    pub config: PathBuf,

    /// Suite whose case file to use
    #[arg(short, long)]
    pub suite: String,

    /// Class name of the case record to run
    #[arg(long = "class")]
    pub class_name: String,
}

/// Execute run command
pub fn execute(args: RunArgs, profile: Option<Profile>) -> Result<(), Box<dyn std::error::Error>> {
    let config = RunnerConfig::load(&args.config).map_err(ExError::from)?;
    logging_facility::init(profile.unwrap_or(config.logging.profile));

    let case_path = config.case_path(&args.suite).map_err(ExError::from)?;
    let case = load_case(&case_path, &args.class_name).map_err(ExError::from)?;

    let dispatcher = ReqwestDispatcher::new(&config.http).map_err(ExError::from)?;
    let report = CaseRunner::new(dispatcher).run_case(&case);

    print!("{}", report);
    if report.passed() {
        Ok(())
    } else {
        Err(format!(
            "{} of {} entities failed",
            report.failure_count(),
            report.outcomes.len()
        )
        .into())
    }
}
