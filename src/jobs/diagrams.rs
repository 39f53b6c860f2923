//! Drafts (`*.txt`) to diagram descriptions (`*.mmd`).

use super::{ItemFailure, ItemOutcome, ItemReport, JobError, JobKind, JobSummary};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::extract::extract_mermaid_block;
use crate::fs::write_output;
use crate::generation::GenerationService;
use crate::prompt::SystemPrompt;
use std::fs;
use std::path::{Path, PathBuf};

/// A discovered draft and the output it maps to.
#[derive(Debug, Clone)]
pub struct DraftItem {
    /// Draft file name without extension.
    pub base_name: String,
    pub draft_path: PathBuf,
    pub output_path: PathBuf,
}

impl DraftItem {
    /// True when the output already exists and the draft needs no work.
    pub fn is_done(&self) -> bool {
        self.output_path.exists()
    }
}

/// Lazily enumerate drafts with their output paths.
pub fn diagram_candidates(ctx: &ProjectContext) -> Result<impl Iterator<Item = DraftItem> + '_> {
    let scanner = ctx.drafts_scanner()?;
    Ok(scanner.into_scan().map(move |draft_path| {
        let base_name = draft_base_name(&draft_path);
        DraftItem {
            output_path: ctx.mermaid_output_path(&base_name),
            base_name,
            draft_path,
        }
    }))
}

/// Run the diagram job over every draft.
///
/// A missing system-prompt template aborts the job before any draft is read.
pub fn run_diagram_job(
    ctx: &ProjectContext,
    service: &dyn GenerationService,
) -> std::result::Result<JobSummary, JobError> {
    let template_path = ctx.system_prompt_path();
    let system_prompt =
        SystemPrompt::load(&template_path).map_err(|source| JobError::MissingTemplate {
            path: ctx.display_path(&template_path),
            source,
        })?;

    let mut summary = JobSummary::new(JobKind::Diagrams);

    for item in diagram_candidates(ctx)? {
        let outcome = if item.is_done() {
            println!("Skipping {} (Exists)", item.base_name);
            ItemOutcome::Skipped
        } else {
            println!("Generating Mermaid for: {}...", item.base_name);
            match generate_diagram(ctx, service, &system_prompt, &item) {
                Ok(()) => {
                    println!("Saved {}", ctx.display_path(&item.output_path));
                    ItemOutcome::Generated
                }
                Err(failure) => ItemOutcome::Failed(failure),
            }
        };

        summary.record(ItemReport {
            id: item.base_name,
            output: Some(item.output_path),
            outcome,
        });
    }

    Ok(summary)
}

fn generate_diagram(
    ctx: &ProjectContext,
    service: &dyn GenerationService,
    system_prompt: &SystemPrompt,
    item: &DraftItem,
) -> std::result::Result<(), ItemFailure> {
    let user_content =
        fs::read_to_string(&item.draft_path).map_err(|source| ItemFailure::ReadInput {
            path: ctx.display_path(&item.draft_path),
            source,
        })?;

    let response = service.generate_text(&system_prompt.text, &user_content)?;
    let diagram = extract_mermaid_block(&response).ok_or(ItemFailure::NoMermaidBlock)?;

    write_output(&item.output_path, diagram.as_bytes(), ctx.config.atomic_writes).map_err(
        |source| ItemFailure::Write {
            path: ctx.display_path(&item.output_path),
            source,
        },
    )
}

/// Draft file name with its extension stripped.
fn draft_base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
