//! The two batch jobs and their per-item bookkeeping.
//!
//! Each job walks its scanner in order and settles every candidate as
//! skipped, generated, or failed. An item failure is recorded and printed,
//! never propagated; only [`JobError`] stops a job, and it never stops the
//! other one.

pub mod diagrams;
pub mod images;


use crate::error::AssetgenError;
use crate::generation::GenerationError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use diagrams::{DraftItem, diagram_candidates, run_diagram_job};
pub use images::{SpecItem, resolve_prompt, run_image_job, spec_candidates};

/// Which batch job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    /// Drafts to diagram descriptions.
    Diagrams,
    /// JSON specs to images.
    Images,
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobKind::Diagrams => write!(f, "diagrams"),
            JobKind::Images => write!(f, "images"),
        }
    }
}

/// Error that aborts a whole job.
#[derive(Debug, Error)]
pub enum JobError {
    /// The diagram job's system-prompt template could not be read.
    #[error("{path} not found: {source}")]
    MissingTemplate {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The job's scanner could not be built.
    #[error(transparent)]
    Config(#[from] AssetgenError),
}

/// Why a single item failed.
#[derive(Debug, Error)]
pub enum ItemFailure {
    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("error decoding JSON: {0}")]
    InvalidSpec(#[source] serde_json::Error),

    #[error("spec has neither \"prompt\" nor \"source_logic\"")]
    EmptySpec,

    #[error("source logic file {path} not found: {source}")]
    MissingSourceLogic {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("API error: {0}")]
    Service(#[from] GenerationError),

    #[error("no ```mermaid block in response")]
    NoMermaidBlock,

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Terminal state of one item in one pass.
#[derive(Debug)]
pub enum ItemOutcome {
    /// Output already existed; nothing was requested.
    Skipped,
    /// Output was generated and written.
    Generated,
    /// The item failed; the batch moved on.
    Failed(ItemFailure),
}

/// One settled item.
#[derive(Debug)]
pub struct ItemReport {
    /// Draft base name or spec path.
    pub id: String,
    /// Resolved output path, when the item got far enough to have one.
    pub output: Option<PathBuf>,
    pub outcome: ItemOutcome,
}

impl ItemReport {
    /// Status line for a failed item, `None` otherwise.
    pub fn failure_line(&self, job: JobKind) -> Option<String> {
        match &self.outcome {
            ItemOutcome::Failed(failure) => {
                Some(format!("Failed {} item {}: {}", job, self.id, failure))
            }
            _ => None,
        }
    }
}

/// Everything a job did in one pass.
#[derive(Debug)]
pub struct JobSummary {
    pub job: JobKind,
    pub items: Vec<ItemReport>,
}

impl JobSummary {
    pub fn new(job: JobKind) -> Self {
        Self {
            job,
            items: Vec::new(),
        }
    }

    /// Record a settled item and print its status line.
    pub(crate) fn record(&mut self, report: ItemReport) {
        if let Some(line) = report.failure_line(self.job) {
            println!("{}", line);
        }
        self.items.push(report);
    }

    pub fn generated(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Generated))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.items.iter().filter(|r| pred(&r.outcome)).count()
    }

    /// Print the per-job summary block.
    pub fn print(&self) {
        println!();
        println!("Summary ({}):", self.job);
        println!("  Generated: {:>3}", self.generated());
        println!("  Skipped:   {:>3}", self.skipped());
        println!("  Failed:    {:>3}", self.failed());
    }
}
