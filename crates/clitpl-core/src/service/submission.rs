//! Template submission pipeline.
//!
//! Drives one submission from a collected answer set to a committed branch
//! and, when asked, a pull request:
//!
//! ```text
//! Prompting -> Reviewing -> Persisting -> Validating -> Branching -> Proposing -> Done
//!     |            |
//!     +-> error    +-> Aborted (cancelled, exit 0)
//! ```
//!
//! Persisting is the durability point: once the entry file is written, later
//! stages may fail without losing the submission. Schema validation is
//! reported separately from the rest of the pipeline so "accepted locally"
//! and "schema-valid" are independent results.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use clitpl_types::answers::{AnswerSet, normalize_tags};
use clitpl_types::catalog::CatalogLayout;
use clitpl_types::config::CatalogConfig;
use clitpl_types::entry::{Entry, Repository, truncate_to_millis};
use clitpl_types::error::{GatewayError, SubmissionError};
use clitpl_types::slug::{fallback_token, try_slugify};
use clitpl_types::validation::ValidationOutcome;

use crate::gateway::{HostingGateway, ProposalRequest, VcsGateway};
use crate::repository::entry::EntryRepository;
use crate::service::catalog::load_schema;
use crate::service::fs::FileSystem;
use crate::service::proposal;

/// Pipeline stages, used for logging and error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStage {
    Prompting,
    Reviewing,
    Persisting,
    Validating,
    Branching,
    Proposing,
    Done,
    Aborted,
}

impl fmt::Display for SubmissionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionStage::Prompting => "prompting",
            SubmissionStage::Reviewing => "reviewing",
            SubmissionStage::Persisting => "persisting",
            SubmissionStage::Validating => "validating",
            SubmissionStage::Branching => "branching",
            SubmissionStage::Proposing => "proposing",
            SubmissionStage::Done => "done",
            SubmissionStage::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Why a pull request has to be opened by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualReason {
    /// The hosting CLI is not installed or not runnable.
    CliUnavailable,
    /// The hosting CLI refused to create the pull request.
    ProposalFailed(String),
}

/// What happened in the Proposing stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalOutcome {
    /// The contributor chose to open the pull request later.
    Deferred,
    /// A pull request was opened.
    Opened { url: Option<String>, pushed: bool },
    /// Automatic creation was not possible; manual instructions apply.
    Manual { reason: ManualReason, pushed: bool },
}

impl ProposalOutcome {
    /// Whether a push was attempted and failed. No push is attempted when
    /// the pull request is deferred or the hosting CLI is missing.
    pub fn push_failed(&self) -> bool {
        match self {
            ProposalOutcome::Deferred => false,
            ProposalOutcome::Manual {
                reason: ManualReason::CliUnavailable,
                ..
            } => false,
            ProposalOutcome::Opened { pushed, .. } | ProposalOutcome::Manual { pushed, .. } => !pushed,
        }
    }
}

/// A submission that reached the Done stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub entry: Entry,
    pub path: PathBuf,
    pub validation: ValidationOutcome,
    pub branch: String,
    pub proposal: ProposalOutcome,
}

/// Final result of a pipeline run that did not error.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// The reviewer declined; nothing was written.
    Cancelled,
    Submitted(Submission),
}

impl SubmissionOutcome {
    /// Exit-status policy: success unless the local schema validation failed.
    pub fn is_success(&self) -> bool {
        match self {
            SubmissionOutcome::Cancelled => true,
            SubmissionOutcome::Submitted(submission) => !submission.validation.is_failed(),
        }
    }
}

/// Build the entry for an answer set, created at `created_at`.
///
/// The slug comes from the name, then the handle, then a random token.
/// Empty optional answers are left out of the entry entirely.
pub fn build_entry(answers: &AnswerSet, created_at: DateTime<Utc>) -> Entry {
    let name = answers.name.trim().to_string();
    let handle = answers.handle.trim().to_string();
    let slug = try_slugify(&name)
        .or_else(|| try_slugify(&handle))
        .unwrap_or_else(fallback_token);
    let tags = normalize_tags(&answers.tags);

    Entry {
        name,
        slug,
        category: answers.category,
        repository: Repository {
            url: answers.repo_url.trim().to_string(),
            branch: non_empty(&answers.branch),
        },
        handle,
        description: non_empty(&answers.description),
        tags: if tags.is_empty() { None } else { Some(tags) },
        created_at: truncate_to_millis(created_at),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Service running the submission pipeline.
///
/// Generic over the repository, filesystem, and gateway traits so the whole
/// pipeline runs against in-memory fakes in tests.
pub struct SubmissionService<R, F, V, H>
where
    R: EntryRepository,
    F: FileSystem,
    V: VcsGateway,
    H: HostingGateway,
{
    repo: R,
    fs: F,
    vcs: V,
    hosting: H,
    layout: CatalogLayout,
    config: CatalogConfig,
}

impl<R, F, V, H> SubmissionService<R, F, V, H>
where
    R: EntryRepository,
    F: FileSystem,
    V: VcsGateway,
    H: HostingGateway,
{
    pub fn new(
        repo: R,
        fs: F,
        vcs: V,
        hosting: H,
        layout: CatalogLayout,
        config: CatalogConfig,
    ) -> Self {
        Self {
            repo,
            fs,
            vcs,
            hosting,
            layout,
            config,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn layout(&self) -> &CatalogLayout {
        &self.layout
    }

    /// Run the pipeline for `answers`, stamping the entry with the current time.
    pub async fn submit(&self, answers: &AnswerSet) -> Result<SubmissionOutcome, SubmissionError> {
        self.submit_at(answers, Utc::now()).await
    }

    /// Run the pipeline for `answers` with an explicit creation instant.
    ///
    /// # Errors
    ///
    /// - [`SubmissionError::InputRejected`] when the license or originality
    ///   confirmation is missing (nothing is written).
    /// - [`SubmissionError::Catalog`] when the entry cannot be written,
    ///   including a duplicate slug.
    /// - [`SubmissionError::Vcs`] when branching, staging, or committing
    ///   fails; the entry file stays on disk.
    #[tracing::instrument(
        name = "submit",
        skip(self, answers),
        fields(name = %answers.name, category = %answers.category)
    )]
    pub async fn submit_at(
        &self,
        answers: &AnswerSet,
        created_at: DateTime<Utc>,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        tracing::debug!(stage = %SubmissionStage::Prompting, "checking confirmations");
        check_confirmations(answers)?;

        tracing::debug!(stage = %SubmissionStage::Reviewing, "checking review");
        if !answers.confirm_review {
            tracing::info!(stage = %SubmissionStage::Aborted, "submission cancelled by reviewer");
            return Ok(SubmissionOutcome::Cancelled);
        }

        let entry = build_entry(answers, created_at);
        let path = self.repo.write(&entry).await?;
        tracing::info!(
            stage = %SubmissionStage::Persisting,
            slug = %entry.slug,
            path = %path.display(),
            "entry written"
        );

        let validation = self.validate_entry(&entry).await;

        let branch = self.commit_entry(&entry, &path).await?;

        let proposal = if answers.submit_pr {
            self.propose(&entry, &branch).await
        } else {
            ProposalOutcome::Deferred
        };

        tracing::info!(stage = %SubmissionStage::Done, branch = %branch, "submission complete");
        Ok(SubmissionOutcome::Submitted(Submission {
            entry,
            path,
            validation,
            branch,
            proposal,
        }))
    }

    /// Best-effort schema check of the freshly written entry.
    async fn validate_entry(&self, entry: &Entry) -> ValidationOutcome {
        let stage = SubmissionStage::Validating;

        let validator = match load_schema(&self.fs, &self.layout).await {
            Ok(validator) => validator,
            Err(err) => {
                tracing::warn!(stage = %stage, error = %err, "local validation skipped");
                return ValidationOutcome::Skipped(err.to_string());
            }
        };

        let document = match serde_json::to_value(entry) {
            Ok(document) => document,
            Err(err) => return ValidationOutcome::Skipped(err.to_string()),
        };

        let outcome = ValidationOutcome::from_violations(validator.validate(&document));
        if let ValidationOutcome::Failed(violations) = &outcome {
            tracing::warn!(stage = %stage, violations = violations.len(), "entry failed schema validation");
        } else {
            tracing::info!(stage = %stage, "entry passed schema validation");
        }
        outcome
    }

    /// Create the submission branch and commit exactly the entry file.
    async fn commit_entry(&self, entry: &Entry, path: &Path) -> Result<String, SubmissionError> {
        let stage = SubmissionStage::Branching;
        let base = &self.config.base_branch;

        // The base may not exist locally; branching from the current HEAD is fine.
        if let Err(err) = self.vcs.checkout(base).await {
            tracing::warn!(stage = %stage, base = %base, error = %err, "could not switch to base");
        }

        let branch = proposal::branch_name(&entry.slug, entry.created_at.timestamp_millis());
        let vcs_error = |step: &'static str| {
            move |source: GatewayError| SubmissionError::Vcs {
                step,
                entry_path: path.to_path_buf(),
                source,
            }
        };

        self.vcs
            .create_branch(&branch)
            .await
            .map_err(vcs_error("creating the branch"))?;
        self.vcs.stage(path).await.map_err(vcs_error("staging the entry"))?;
        self.vcs
            .commit(&proposal::commit_message(&entry.slug), path)
            .await
            .map_err(vcs_error("committing"))?;

        tracing::info!(stage = %stage, branch = %branch, "branch created");
        Ok(branch)
    }

    /// Push and open the pull request, degrading to manual instructions.
    async fn propose(&self, entry: &Entry, branch: &str) -> ProposalOutcome {
        let stage = SubmissionStage::Proposing;

        if !self.hosting.is_available().await {
            tracing::warn!(stage = %stage, "hosting CLI not detected; skipping automatic PR creation");
            return ProposalOutcome::Manual {
                reason: ManualReason::CliUnavailable,
                pushed: false,
            };
        }

        // Contributors working from a fork may lack push rights on the remote.
        let pushed = match self.hosting.push(&self.config.remote, branch).await {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(stage = %stage, remote = %self.config.remote, error = %err, "push failed");
                false
            }
        };

        let request = ProposalRequest {
            title: proposal::pr_title(entry),
            body: proposal::pr_body(entry),
            base: self.config.base_branch.clone(),
            head: branch.to_string(),
        };

        match self.hosting.create_proposal(&request).await {
            Ok(url) => {
                tracing::info!(stage = %stage, url = ?url, "pull request opened");
                ProposalOutcome::Opened { url, pushed }
            }
            Err(err) => {
                tracing::warn!(stage = %stage, error = %err, "automatic PR creation failed");
                ProposalOutcome::Manual {
                    reason: ManualReason::ProposalFailed(err.to_string()),
                    pushed,
                }
            }
        }
    }
}

/// License and originality confirmations are mandatory.
fn check_confirmations(answers: &AnswerSet) -> Result<(), SubmissionError> {
    if !answers.confirm_license {
        return Err(SubmissionError::InputRejected(
            "submission must be GPL-3.0 licensed".to_string(),
        ));
    }
    if !answers.confirm_original {
        return Err(SubmissionError::InputRejected(
            "submission must be original (no plagiarism)".to_string(),
        ));
    }
    Ok(())
}
