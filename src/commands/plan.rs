//! Implementation of the `assetgen plan` command.
//!
//! Applies the same scan, spec parsing and existence checks as `run`, but
//! never reads the credential and never calls the service.

use crate::cli::PlanArgs;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::jobs::{JobKind, diagram_candidates, resolve_prompt, spec_candidates};
use std::path::PathBuf;

/// What `run` would do with one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    Generate,
    Skip,
    /// The item would fail before any request is made.
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub id: String,
    pub output: Option<PathBuf>,
    pub action: PlanAction,
}

/// Plan for one job.
#[derive(Debug)]
pub struct JobPlan {
    pub job: JobKind,
    /// Set when the job would abort before processing any item.
    pub blocked: Option<String>,
    pub entries: Vec<PlanEntry>,
}

impl JobPlan {
    pub fn count(&self, action: &PlanAction) -> usize {
        self.entries
            .iter()
            .filter(|e| std::mem::discriminant(&e.action) == std::mem::discriminant(action))
            .count()
    }
}

/// Execute the `assetgen plan` command.
pub fn cmd_plan(args: PlanArgs) -> Result<()> {
    let ctx = ProjectContext::resolve(args.project.root.as_deref(), args.project.config.as_deref())?;

    for job in args.project.jobs() {
        let plan = plan_job(&ctx, job)?;
        print_plan(&ctx, &plan);
    }

    Ok(())
}

/// Build the plan for `job` without touching the network.
pub fn plan_job(ctx: &ProjectContext, job: JobKind) -> Result<JobPlan> {
    match job {
        JobKind::Diagrams => plan_diagrams(ctx),
        JobKind::Images => plan_images(ctx),
    }
}

fn plan_diagrams(ctx: &ProjectContext) -> Result<JobPlan> {
    let template = ctx.system_prompt_path();
    let blocked = (!template.is_file())
        .then(|| format!("{} not found", ctx.display_path(&template)));

    let entries = diagram_candidates(ctx)?
        .map(|item| PlanEntry {
            action: if item.is_done() {
                PlanAction::Skip
            } else {
                PlanAction::Generate
            },
            id: item.base_name,
            output: Some(item.output_path),
        })
        .collect();

    Ok(JobPlan {
        job: JobKind::Diagrams,
        blocked,
        entries,
    })
}

fn plan_images(ctx: &ProjectContext) -> Result<JobPlan> {
    let entries = spec_candidates(ctx)?
        .map(|item| match item.spec {
            Err(failure) => PlanEntry {
                id: item.id,
                output: None,
                action: PlanAction::Invalid(failure.to_string()),
            },
            Ok(spec) => {
                let action = if spec.output_path.exists() {
                    PlanAction::Skip
                } else {
                    match resolve_prompt(ctx, &spec.prompt) {
                        Ok(_) => PlanAction::Generate,
                        Err(failure) => PlanAction::Invalid(failure.to_string()),
                    }
                };
                PlanEntry {
                    id: item.id,
                    output: Some(spec.output_path),
                    action,
                }
            }
        })
        .collect();

    Ok(JobPlan {
        job: JobKind::Images,
        blocked: None,
        entries,
    })
}

fn print_plan(ctx: &ProjectContext, plan: &JobPlan) {
    println!("Plan ({}):", plan.job);

    if let Some(reason) = &plan.blocked {
        println!("  Job would abort: {}", reason);
    }

    if plan.entries.is_empty() {
        println!("  No inputs found.");
    }

    for entry in &plan.entries {
        let output = entry
            .output
            .as_ref()
            .map(|p| format!(" -> {}", ctx.display_path(p)))
            .unwrap_or_default();
        match &entry.action {
            PlanAction::Generate => println!("  generate  {}{}", entry.id, output),
            PlanAction::Skip => println!("  skip      {}{}", entry.id, output),
            PlanAction::Invalid(reason) => println!("  invalid   {}: {}", entry.id, reason),
        }
    }

    println!(
        "  ({} to generate, {} existing, {} invalid)",
        plan.count(&PlanAction::Generate),
        plan.count(&PlanAction::Skip),
        plan.count(&PlanAction::Invalid(String::new()))
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::{ItemFailure, ItemOutcome, run_image_job};
    use crate::test_support::{FakeService, create_test_project, test_context, write_file};

    #[test]
    fn test_plan_diagrams() {
        let project = create_test_project();
        let root = project.path();
        write_file(root, "source/drafts/new.txt", "draft");
        write_file(root, "source/drafts/old.txt", "draft");
        write_file(root, "source/mermaid/old.mmd", "graph TD");

        let plan = plan_job(&test_context(root), JobKind::Diagrams).unwrap();

        assert!(plan.blocked.is_none());
        assert_eq!(plan.entries[0].id, "new");
        assert_eq!(plan.entries[0].action, PlanAction::Generate);
        assert_eq!(plan.entries[1].id, "old");
        assert_eq!(plan.entries[1].action, PlanAction::Skip);
    }

    #[test]
    fn test_plan_diagrams_blocked_without_template() {
        let project = create_test_project();
        let root = project.path();
        std::fs::remove_file(root.join("prompts/mermaid-generator.md")).unwrap();

        let plan = plan_job(&test_context(root), JobKind::Diagrams).unwrap();
        assert!(plan.blocked.unwrap().contains("prompts/mermaid-generator.md"));
    }

    #[test]
    fn test_plan_images() {
        let project = create_test_project();
        let root = project.path();
        write_file(root, "source/generative/a.json", r#"{"prompt": "x"}"#);
        write_file(root, "source/generative/b.json", "{ broken");
        write_file(root, "source/generative/c.json", "{}");
        write_file(root, "source/polished/d.json", r#"{"source_logic": "missing.mmd"}"#);
        write_file(root, "source/polished/e.json", r#"{"prompt": "x"}"#);
        write_file(root, "assets/diagrams-generated/e.png", "png");

        let plan = plan_job(&test_context(root), JobKind::Images).unwrap();
        let actions: Vec<&PlanAction> = plan.entries.iter().map(|e| &e.action).collect();

        assert_eq!(actions[0], &PlanAction::Generate);
        assert!(matches!(actions[1], PlanAction::Invalid(r) if r.contains("JSON")));
        assert_eq!(
            actions[2],
            &PlanAction::Invalid(ItemFailure::EmptySpec.to_string())
        );
        assert!(matches!(actions[3], PlanAction::Invalid(r) if r.contains("missing.mmd")));
        assert_eq!(actions[4], &PlanAction::Skip);

        assert_eq!(plan.count(&PlanAction::Generate), 1);
        assert_eq!(plan.count(&PlanAction::Skip), 1);
        assert_eq!(plan.count(&PlanAction::Invalid(String::new())), 3);
    }

    #[test]
    fn test_plan_reports_same_failure_as_run() {
        let project = create_test_project();
        let root = project.path();
        write_file(root, "source/polished/d.json", r#"{"source_logic": "missing.mmd"}"#);
        let ctx = test_context(root);

        let plan = plan_job(&ctx, JobKind::Images).unwrap();
        let summary = run_image_job(&ctx, &FakeService::replying("")).unwrap();

        let run_reason = match &summary.items[0].outcome {
            ItemOutcome::Failed(failure) => failure.to_string(),
            other => panic!("unexpected outcome: {:?}", other),
        };
        assert_eq!(plan.entries[0].action, PlanAction::Invalid(run_reason));
    }
}
