//! Interactive submission wizard (`clitpl`, `clitpl submit`).
//!
//! Collects an [`AnswerSet`] with dialoguer prompts, hands it to the
//! submission service, and renders the outcome.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};

use clitpl_core::service::proposal;
use clitpl_core::service::submission::{
    ManualReason, ProposalOutcome, Submission, SubmissionOutcome,
};
use clitpl_types::answers::{AnswerSet, parse_tags};
use clitpl_types::config::CatalogConfig;
use clitpl_types::entry::{Category, is_git_url, is_valid_handle, is_valid_name};
use clitpl_types::validation::ValidationOutcome;

use crate::state::AppState;

/// Run the wizard end to end. Returns whether the run counts as a success.
pub async fn run(state: &AppState) -> Result<bool> {
    print_banner(&state.config);

    let answers = prompt_answers()?;

    let spinner = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(template);
    }
    spinner.set_message("Saving your template entry...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = state.submission_service.submit(&answers).await;
    spinner.finish_and_clear();

    let outcome = result?;
    render_outcome(state, &outcome);
    Ok(outcome.is_success())
}

fn print_banner(config: &CatalogConfig) {
    println!();
    println!(
        "  {} {}",
        style("⚡").bold(),
        style("CLI-Templates submission").cyan().bold()
    );
    println!(
        "  {}",
        style(format!(
            "Adds your template to {} and prepares a pull request.",
            config.upstream()
        ))
        .dim()
    );
    println!();
}

fn prompt_answers() -> Result<AnswerSet> {
    let labels: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
    let selection = Select::new()
        .with_prompt("Template category")
        .items(&labels)
        .default(0)
        .interact()?;
    let category = Category::ALL[selection];

    let repo_url: String = Input::new()
        .with_prompt("Git repository URL (https://... or git@....git)")
        .validate_with(|input: &String| -> Result<(), &str> {
            if is_git_url(input.trim()) {
                Ok(())
            } else {
                Err("Enter an https:// or git@ URL ending in .git")
            }
        })
        .interact_text()?;

    let branch: String = Input::new()
        .with_prompt("Branch or tag (optional)")
        .allow_empty(true)
        .interact_text()?;

    let handle: String = Input::new()
        .with_prompt("Your handle (e.g. @lightspeed_coin)")
        .validate_with(|input: &String| -> Result<(), &str> {
            if is_valid_handle(input.trim()) {
                Ok(())
            } else {
                Err("Letters, digits, '_' and '.' only, optionally starting with '@'")
            }
        })
        .interact_text()?;

    let name: String = Input::new()
        .with_prompt("Template name")
        .validate_with(|input: &String| -> Result<(), &str> {
            if is_valid_name(input) {
                Ok(())
            } else {
                Err("Name must be at least 2 characters")
            }
        })
        .interact_text()?;

    let description: String = Input::new()
        .with_prompt("Short description (optional)")
        .allow_empty(true)
        .interact_text()?;

    let tags: String = Input::new()
        .with_prompt("Tags, comma-separated (optional)")
        .allow_empty(true)
        .interact_text()?;

    let confirm_license = Confirm::new()
        .with_prompt("Is the template licensed under GPL v3?")
        .default(true)
        .interact()?;
    let confirm_original = confirm_license
        && Confirm::new()
            .with_prompt("Is this your own work (not copied from someone else)?")
            .default(true)
            .interact()?;

    let mut answers = AnswerSet {
        category,
        repo_url,
        branch,
        handle,
        name,
        description,
        tags: parse_tags(&tags),
        confirm_license,
        confirm_original,
        confirm_review: false,
        submit_pr: false,
    };

    // A refused confirmation is reported by the service; no point reviewing.
    if !(confirm_license && confirm_original) {
        return Ok(answers);
    }

    print_review(&answers);
    answers.confirm_review = Confirm::new()
        .with_prompt("Submit this template?")
        .default(true)
        .interact()?;
    if answers.confirm_review {
        answers.submit_pr = Confirm::new()
            .with_prompt("Open a pull request now?")
            .default(true)
            .interact()?;
    }

    Ok(answers)
}

fn print_review(answers: &AnswerSet) {
    let optional = |value: &str| {
        if value.trim().is_empty() {
            style("(none)".to_string()).dim()
        } else {
            style(value.trim().to_string())
        }
    };

    println!();
    println!("  {}", style("Review your submission").bold());
    println!("  {}  {}", style("Name:").bold(), style(answers.name.trim()).cyan());
    println!("  {}  {}", style("Category:").bold(), answers.category);
    println!("  {}  {}", style("Repository:").bold(), answers.repo_url.trim());
    println!("  {}  {}", style("Branch:").bold(), optional(&answers.branch));
    println!("  {}  {}", style("Handle:").bold(), answers.handle.trim());
    println!("  {}  {}", style("Description:").bold(), optional(&answers.description));
    println!("  {}  {}", style("Tags:").bold(), optional(&answers.tags.join(", ")));
    println!();
}

fn render_outcome(state: &AppState, outcome: &SubmissionOutcome) {
    let submission = match outcome {
        SubmissionOutcome::Cancelled => {
            println!();
            println!("  Submission cancelled. Nothing was written.");
            println!();
            return;
        }
        SubmissionOutcome::Submitted(submission) => submission,
    };

    println!();
    println!(
        "  {} Saved {}",
        style("✓").green().bold(),
        style(state.layout.relative(&submission.path).display()).cyan()
    );

    render_validation(&submission.validation);

    println!(
        "  {} Committed on branch {}",
        style("✓").green().bold(),
        style(&submission.branch).cyan()
    );

    render_proposal(&state.config, submission);

    println!();
    println!("  Thanks for contributing to CLI-Templates!");
    println!();
}

fn render_validation(validation: &ValidationOutcome) {
    match validation {
        ValidationOutcome::Passed => {
            println!("  {} Entry matches the catalog schema", style("✓").green().bold());
        }
        ValidationOutcome::Failed(violations) => {
            println!(
                "  {} Entry failed schema validation (it was still saved):",
                style("✗").red().bold()
            );
            for violation in violations {
                println!("    {} {}", style("•").dim(), violation);
            }
        }
        ValidationOutcome::Skipped(reason) => {
            println!(
                "  {} Local validation skipped ({}); CI will validate the entry",
                style("!").yellow().bold(),
                reason
            );
        }
    }
}

fn render_proposal(config: &CatalogConfig, submission: &Submission) {
    let branch = &submission.branch;
    match &submission.proposal {
        ProposalOutcome::Deferred => {
            println!();
            println!("  When you're ready, push your branch:");
            println!("    {}", style(proposal::push_command(config, branch)).yellow());
        }
        ProposalOutcome::Opened { url, .. } => {
            if submission.proposal.push_failed() {
                print_push_warning();
            }
            match url {
                Some(url) => println!(
                    "  {} Pull request opened: {}",
                    style("✓").green().bold(),
                    style(url).cyan()
                ),
                None => println!("  {} Pull request opened", style("✓").green().bold()),
            }
        }
        ProposalOutcome::Manual { reason, .. } => {
            if submission.proposal.push_failed() {
                print_push_warning();
            }
            let why = match reason {
                ManualReason::CliUnavailable => "GitHub CLI (gh) not detected".to_string(),
                ManualReason::ProposalFailed(err) => format!("gh could not create the PR: {err}"),
            };
            println!("  {} {}. Open the PR manually:", style("!").yellow().bold(), why);
            for (i, step) in proposal::manual_instructions(config, branch).iter().enumerate() {
                println!("    {}. {}", i + 1, step);
            }
        }
    }
}

fn print_push_warning() {
    println!(
        "  {} Pushing the branch failed; you may need to push it yourself",
        style("!").yellow().bold()
    );
}
