//! `git` command-line adapter for [`VcsGateway`].

use std::path::{Path, PathBuf};

use clitpl_core::gateway::VcsGateway;
use clitpl_types::error::GatewayError;

use crate::process;

/// Runs `git` inside the catalog working tree.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(program: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            workdir: workdir.into(),
        }
    }

    async fn git(&self, args: &[&str]) -> Result<String, GatewayError> {
        process::run(&self.program, args, &self.workdir).await
    }

    /// Path relative to the working tree. Paths outside it are passed
    /// through; git rejects them.
    fn pathspec<'a>(&self, path: &'a Path) -> std::borrow::Cow<'a, str> {
        path.strip_prefix(&self.workdir).unwrap_or(path).to_string_lossy()
    }
}

impl VcsGateway for GitCli {
    async fn checkout(&self, reference: &str) -> Result<(), GatewayError> {
        self.git(&["checkout", reference]).await.map(drop)
    }

    async fn create_branch(&self, name: &str) -> Result<(), GatewayError> {
        self.git(&["checkout", "-b", name]).await.map(drop)
    }

    async fn stage(&self, path: &Path) -> Result<(), GatewayError> {
        let spec = self.pathspec(path);
        self.git(&["add", "--", spec.as_ref()]).await.map(drop)
    }

    async fn commit(&self, message: &str, path: &Path) -> Result<(), GatewayError> {
        let spec = self.pathspec(path);
        self.git(&["commit", "-m", message, "--", spec.as_ref()])
            .await
            .map(drop)
    }
}
