//! Tool configuration types.
//!
//! `CatalogConfig` represents the optional `clitpl.toml` at the catalog root
//! that names the upstream repository, the base line, and the external tools.

use serde::{Deserialize, Serialize};

/// Configuration for submissions against one catalog checkout.
///
/// All fields have defaults matching the upstream CLI-Templates catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Owner of the upstream catalog repository.
    #[serde(default = "default_repo_owner")]
    pub repo_owner: String,

    /// Name of the upstream catalog repository.
    #[serde(default = "default_repo_name")]
    pub repo_name: String,

    /// Base line that submission branches start from and PRs target.
    #[serde(default = "default_base_branch")]
    pub base_branch: String,

    /// Remote that submission branches are pushed to.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Version-control executable.
    #[serde(default = "default_git_program")]
    pub git_program: String,

    /// Hosting CLI executable.
    #[serde(default = "default_gh_program")]
    pub gh_program: String,
}

fn default_repo_owner() -> String {
    "lightspeedfoundation".to_string()
}

fn default_repo_name() -> String {
    "CLI-Templates".to_string()
}

fn default_base_branch() -> String {
    "main".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_git_program() -> String {
    "git".to_string()
}

fn default_gh_program() -> String {
    "gh".to_string()
}

impl CatalogConfig {
    /// `owner/name` of the upstream repository.
    pub fn upstream(&self) -> String {
        format!("{}/{}", self.repo_owner, self.repo_name)
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            repo_owner: default_repo_owner(),
            repo_name: default_repo_name(),
            base_branch: default_base_branch(),
            remote: default_remote(),
            git_program: default_git_program(),
            gh_program: default_gh_program(),
        }
    }
}
