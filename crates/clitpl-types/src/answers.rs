//! The wizard's answer set.
//!
//! Produced by the interactive prompts and consumed once by the submission
//! pipeline. Key names follow the wizard's prompt names so a recorded answer
//! set can be replayed from JSON.

use serde::{Deserialize, Serialize};

use crate::entry::Category;

/// Raw answers collected from the contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSet {
    pub category: Category,
    pub repo_url: String,
    /// Optional branch or tag; empty when not given.
    #[serde(default)]
    pub branch: String,
    pub handle: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Template repository is GPL-3.0 licensed.
    #[serde(rename = "confirmGPL")]
    pub confirm_license: bool,
    /// Submission is the contributor's original work.
    #[serde(rename = "noPlagiarism")]
    pub confirm_original: bool,
    /// Contributor reviewed the answers and wants to continue.
    pub confirm_review: bool,
    /// Open a pull request right away.
    pub submit_pr: bool,
}

/// Split a comma-separated tag list into trimmed, non-empty, ordered-unique tags.
///
/// # Examples
///
/// ```
/// use clitpl_types::answers::parse_tags;
///
/// assert_eq!(parse_tags(" ai, bot,,ai , game"), vec!["ai", "bot", "game"]);
/// assert!(parse_tags("  ").is_empty());
/// ```
pub fn parse_tags(input: &str) -> Vec<String> {
    normalize_tags(input.split(','))
}

/// Trim, drop empties, and dedupe tags keeping first occurrence order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut result: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim();
        if !tag.is_empty() && !result.iter().any(|t| t == tag) {
            result.push(tag.to_string());
        }
    }
    result
}
