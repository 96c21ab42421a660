//! GitHub CLI adapter for [`HostingGateway`].
//!
//! Pushing goes through `git`; pull requests through `gh pr create`.

use std::path::PathBuf;

use clitpl_core::gateway::{HostingGateway, ProposalRequest};
use clitpl_types::error::GatewayError;

use crate::process;

#[derive(Debug, Clone)]
pub struct GhCli {
    gh_program: String,
    git_program: String,
    workdir: PathBuf,
}

impl GhCli {
    pub fn new(
        gh_program: impl Into<String>,
        git_program: impl Into<String>,
        workdir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            gh_program: gh_program.into(),
            git_program: git_program.into(),
            workdir: workdir.into(),
        }
    }
}

impl HostingGateway for GhCli {
    async fn is_available(&self) -> bool {
        match process::run(&self.gh_program, &["--version"], &self.workdir).await {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(program = %self.gh_program, "hosting CLI unavailable: {err}");
                false
            }
        }
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<(), GatewayError> {
        process::run(
            &self.git_program,
            &["push", "--set-upstream", remote, branch],
            &self.workdir,
        )
        .await
        .map(drop)
    }

    async fn create_proposal(&self, request: &ProposalRequest) -> Result<Option<String>, GatewayError> {
        let stdout = process::run(
            &self.gh_program,
            &[
                "pr",
                "create",
                "--title",
                &request.title,
                "--body",
                &request.body,
                "--base",
                &request.base,
                "--head",
                &request.head,
            ],
            &self.workdir,
        )
        .await?;

        // gh prints the new PR's URL as its last line.
        Ok(stdout
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(str::to_string))
    }
}
