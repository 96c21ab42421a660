//! Branch, commit, and pull-request text for a submission.

use clitpl_types::config::CatalogConfig;
use clitpl_types::entry::Entry;

/// Branch carrying one submission: `add-template/<slug>-<epoch millis>`.
///
/// The timestamp keeps repeated submissions of the same slug apart.
pub fn branch_name(slug: &str, epoch_millis: i64) -> String {
    format!("add-template/{slug}-{epoch_millis}")
}

pub fn commit_message(slug: &str) -> String {
    format!("feat(templates): add {slug} template")
}

pub fn pr_title(entry: &Entry) -> String {
    format!("Add template: {} ({})", entry.name, entry.slug)
}

pub fn pr_body(entry: &Entry) -> String {
    let repository = match &entry.repository.branch {
        Some(branch) => format!("{} (branch: {branch})", entry.repository.url),
        None => entry.repository.url.clone(),
    };

    [
        "If you have completed your template and it is properly licensed under GPL v3, submit your pull request to be listed.".to_string(),
        String::new(),
        "Note: Do not submit pull requests directly copying other peoples' work. Direct plagiarism will not be accepted.".to_string(),
        String::new(),
        format!("Category: {}", entry.category),
        format!("Repository: {repository}"),
        format!("Handle: {}", entry.handle),
    ]
    .join("\n")
}

/// The push command a contributor can run by hand.
pub fn push_command(config: &CatalogConfig, branch: &str) -> String {
    format!("git push --set-upstream {} {branch}", config.remote)
}

/// Steps for opening the pull request manually.
pub fn manual_instructions(config: &CatalogConfig, branch: &str) -> Vec<String> {
    vec![
        "Fork this repo on GitHub".to_string(),
        format!("Push your branch: {}", push_command(config, branch)),
        format!(
            "Open a PR against {} with base={}",
            config.upstream(),
            config.base_branch
        ),
    ]
}
