//! CLI argument parsing for assetgen.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::jobs::JobKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Assetgen: batch generation of diagram sources and images.
///
/// Two jobs run in order:
/// - drafts (`source/drafts/*.txt`) become mermaid files (`source/mermaid/*.mmd`)
/// - JSON specs (`source/generative`, `source/polished`) become images
///
/// An output that already exists is never regenerated.
#[derive(Parser, Debug)]
#[command(name = "assetgen")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Available commands for assetgen.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate every missing output.
    ///
    /// Requires the credential environment variable (default `AI_API_KEY`);
    /// without it nothing is generated and the command exits successfully.
    Run(RunArgs),

    /// Show what `run` would generate or skip, without calling the service.
    Plan(PlanArgs),
}

/// Project selection shared by all commands.
#[derive(Parser, Debug)]
pub struct ProjectArgs {
    /// Project root. Defaults to the current directory.
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Config file, relative to the root. Defaults to `assetgen.yaml` if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Run only one job.
    #[arg(long, value_enum)]
    pub only: Option<JobSelection>,
}

impl ProjectArgs {
    /// Jobs to run, in execution order.
    pub fn jobs(&self) -> Vec<JobKind> {
        match self.only {
            Some(JobSelection::Diagrams) => vec![JobKind::Diagrams],
            Some(JobSelection::Images) => vec![JobKind::Images],
            None => vec![JobKind::Diagrams, JobKind::Images],
        }
    }
}

/// Job selector for `--only`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum JobSelection {
    Diagrams,
    Images,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Exit non-zero if any item failed or a job aborted.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `plan` command.
#[derive(Parser, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["assetgen", "run"]).unwrap();
        match cli.command {
            Command::Run(args) => {
                assert!(!args.strict);
                assert!(args.project.root.is_none());
                assert_eq!(
                    args.project.jobs(),
                    vec![JobKind::Diagrams, JobKind::Images]
                );
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_run_only_images() {
        let cli =
            Cli::try_parse_from(["assetgen", "run", "--only", "images", "--strict"]).unwrap();
        match cli.command {
            Command::Run(args) => {
                assert!(args.strict);
                assert_eq!(args.project.jobs(), vec![JobKind::Images]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_plan_with_root() {
        let cli = Cli::try_parse_from(["assetgen", "plan", "--root", "/tmp/site"]).unwrap();
        match cli.command {
            Command::Plan(args) => {
                assert_eq!(args.project.root, Some(PathBuf::from("/tmp/site")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_job() {
        assert!(Cli::try_parse_from(["assetgen", "run", "--only", "videos"]).is_err());
    }
}
