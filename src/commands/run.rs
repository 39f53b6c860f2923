//! Implementation of the `assetgen run` command.
//!
//! Resolves the project, gates on the credential, then runs the selected
//! jobs in order against one service client. A job abort is printed and the
//! next job still runs.

use crate::cli::RunArgs;
use crate::config::Config;
use crate::context::{Credential, ProjectContext};
use crate::error::{AssetgenError, Result};
use crate::generation::{GenerationError, GenerationService, OpenAiClient};
use crate::jobs::{JobError, JobKind, JobSummary, run_diagram_job, run_image_job};
use std::env;

/// Result of one job within a run.
#[derive(Debug)]
pub struct JobRun {
    pub job: JobKind,
    pub result: std::result::Result<JobSummary, JobError>,
}

impl JobRun {
    /// Status line for an aborted job, `None` if it finished.
    pub fn abort_line(&self) -> Option<String> {
        self.result
            .as_ref()
            .err()
            .map(|e| format!("Error: {} job aborted: {}", self.job, e))
    }
}

/// What a run did.
#[derive(Debug)]
pub enum RunReport {
    /// The credential variable was unset; nothing was attempted.
    NoCredential { var: String },
    /// The selected jobs ran, in order.
    Completed(Vec<JobRun>),
}

impl RunReport {
    /// Status line for a run skipped for lack of a credential.
    pub fn skip_line(&self) -> Option<String> {
        match self {
            RunReport::NoCredential { var } => {
                Some(format!("Skipping AI generation: No {} found.", var))
            }
            RunReport::Completed(_) => None,
        }
    }

    /// Failed items across all jobs.
    pub fn failed_items(&self) -> usize {
        self.job_runs()
            .iter()
            .filter_map(|run| run.result.as_ref().ok())
            .map(JobSummary::failed)
            .sum()
    }

    /// Jobs that aborted before finishing.
    pub fn aborted_jobs(&self) -> usize {
        self.job_runs()
            .iter()
            .filter(|run| run.result.is_err())
            .count()
    }

    fn job_runs(&self) -> &[JobRun] {
        match self {
            RunReport::NoCredential { .. } => &[],
            RunReport::Completed(runs) => runs,
        }
    }
}

/// Execute the `assetgen run` command.
pub fn cmd_run(args: RunArgs) -> Result<()> {
    let ctx = ProjectContext::resolve(args.project.root.as_deref(), args.project.config.as_deref())?;

    let report = execute_run(
        &ctx,
        &args.project.jobs(),
        |var| env::var(var).ok(),
        OpenAiClient::new,
    )?;

    if args.strict {
        let failed = report.failed_items();
        let aborted = report.aborted_jobs();
        if failed > 0 || aborted > 0 {
            return Err(AssetgenError::GenerationFailure(format!(
                "{} item(s) failed, {} job(s) aborted",
                failed, aborted
            )));
        }
    }

    Ok(())
}

/// Gate on the credential, build the service, and run `jobs` in order.
///
/// `connect` is only called once a credential is found, so a run without
/// one never constructs a client.
pub fn execute_run<L, F, S>(
    ctx: &ProjectContext,
    jobs: &[JobKind],
    lookup: L,
    connect: F,
) -> Result<RunReport>
where
    L: Fn(&str) -> Option<String>,
    F: FnOnce(&Config, Credential) -> std::result::Result<S, GenerationError>,
    S: GenerationService,
{
    let var = &ctx.config.credential_env;
    let Some(credential) = Credential::from_lookup(var, lookup) else {
        let report = RunReport::NoCredential { var: var.clone() };
        if let Some(line) = report.skip_line() {
            println!("{}", line);
        }
        return Ok(report);
    };

    let service = connect(&ctx.config, credential).map_err(|e| {
        AssetgenError::UserError(format!("failed to create generation client: {}", e))
    })?;

    let mut runs = Vec::with_capacity(jobs.len());
    for &job in jobs {
        let result = match job {
            JobKind::Diagrams => run_diagram_job(ctx, &service),
            JobKind::Images => run_image_job(ctx, &service),
        };
        let run = JobRun { job, result };

        if let Ok(summary) = &run.result {
            summary.print();
        }
        if let Some(line) = run.abort_line() {
            println!("{}", line);
        }
        println!();

        runs.push(run);
    }

    Ok(RunReport::Completed(runs))
}
