//! JSON image specs to generated images.

use super::{ItemFailure, ItemOutcome, ItemReport, JobError, JobKind, JobSummary};
use crate::context::ProjectContext;
use crate::error::Result;
use crate::fs::write_output;
use crate::generation::GenerationService;
use crate::image_spec::{ImageSpec, PromptSource};
use crate::prompt::build_logic_prompt;
use std::fs;
use std::path::{Path, PathBuf};

/// A discovered spec file, parsed or not.
#[derive(Debug)]
pub struct SpecItem {
    /// Spec path relative to the project root.
    pub id: String,
    pub spec_path: PathBuf,
    /// The parsed spec, or why it could not be parsed.
    pub spec: std::result::Result<ImageSpec, ItemFailure>,
}

/// Lazily enumerate spec files, parsing each as it is reached.
pub fn spec_candidates(ctx: &ProjectContext) -> Result<impl Iterator<Item = SpecItem> + '_> {
    let scanner = ctx.specs_scanner()?;
    let default_dir = ctx.image_output_dir();

    Ok(scanner.into_scan().map(move |spec_path| {
        let spec = load_spec(ctx, &spec_path, &default_dir);
        SpecItem {
            id: ctx.display_path(&spec_path),
            spec_path,
            spec,
        }
    }))
}

fn load_spec(
    ctx: &ProjectContext,
    spec_path: &Path,
    default_dir: &Path,
) -> std::result::Result<ImageSpec, ItemFailure> {
    let json = fs::read_to_string(spec_path).map_err(|source| ItemFailure::ReadInput {
        path: ctx.display_path(spec_path),
        source,
    })?;

    ImageSpec::parse(spec_path, &json, &ctx.root, default_dir).map_err(ItemFailure::InvalidSpec)
}

/// Run the image job over every spec.
pub fn run_image_job(
    ctx: &ProjectContext,
    service: &dyn GenerationService,
) -> std::result::Result<JobSummary, JobError> {
    let mut summary = JobSummary::new(JobKind::Images);

    for item in spec_candidates(ctx)? {
        let spec = match item.spec {
            Ok(spec) => spec,
            Err(failure) => {
                summary.record(ItemReport {
                    id: item.id,
                    output: None,
                    outcome: ItemOutcome::Failed(failure),
                });
                continue;
            }
        };

        let output_display = ctx.display_path(&spec.output_path);
        let outcome = if spec.output_path.exists() {
            println!("Skipping Image {} (Exists)", output_display);
            ItemOutcome::Skipped
        } else {
            println!("Generating Image for: {}...", item.id);
            match generate_image(ctx, service, &spec) {
                Ok(()) => {
                    println!("Saved Image: {}", output_display);
                    ItemOutcome::Generated
                }
                Err(failure) => ItemOutcome::Failed(failure),
            }
        };

        summary.record(ItemReport {
            id: item.id,
            output: Some(spec.output_path),
            outcome,
        });
    }

    Ok(summary)
}

/// Assemble the final prompt text for a spec.
///
/// Reads the diagram description for logic-derived specs; a missing file
/// fails this item only.
pub fn resolve_prompt(
    ctx: &ProjectContext,
    source: &PromptSource,
) -> std::result::Result<String, ItemFailure> {
    match source {
        _ if source.is_empty() => Err(ItemFailure::EmptySpec),
        PromptSource::Plain(prompt) => Ok(prompt.clone()),
        PromptSource::LogicDerived {
            source_logic,
            style_prompt,
        } => {
            let logic = fs::read_to_string(source_logic).map_err(|source| {
                ItemFailure::MissingSourceLogic {
                    path: ctx.display_path(source_logic),
                    source,
                }
            })?;
            Ok(build_logic_prompt(&logic, style_prompt))
        }
    }
}

fn generate_image(
    ctx: &ProjectContext,
    service: &dyn GenerationService,
    spec: &ImageSpec,
) -> std::result::Result<(), ItemFailure> {
    let prompt = resolve_prompt(ctx, &spec.prompt)?;
    let image = service.generate_image(&prompt)?;

    write_output(&spec.output_path, &image, ctx.config.atomic_writes).map_err(|source| {
        ItemFailure::Write {
            path: ctx.display_path(&spec.output_path),
            source,
        }
    })
}
