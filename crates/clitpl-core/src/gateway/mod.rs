//! External tool gateways (ports).
//!
//! The submission pipeline never spawns processes itself. Version control
//! and the code-hosting CLI are reached through these traits; clitpl-infra
//! implements them by shelling out to `git` and `gh`.

use std::future::Future;
use std::path::Path;

use clitpl_types::error::GatewayError;

/// Branch, stage, and commit operations on the catalog working tree.
pub trait VcsGateway: Send + Sync {
    /// Switch to an existing branch or tag.
    fn checkout(&self, reference: &str) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Create a new branch at the current commit and switch to it.
    fn create_branch(&self, name: &str) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Stage exactly one path.
    fn stage(&self, path: &Path) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Commit `path` alone; anything else already staged stays uncommitted.
    fn commit(
        &self,
        message: &str,
        path: &Path,
    ) -> impl Future<Output = Result<(), GatewayError>> + Send;
}

/// A pull request to open against the upstream catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalRequest {
    pub title: String,
    pub body: String,
    /// Branch the proposal targets.
    pub base: String,
    /// Branch carrying the submission.
    pub head: String,
}

/// Push and pull-request operations on the code host.
pub trait HostingGateway: Send + Sync {
    /// Whether the hosting CLI can be invoked at all.
    fn is_available(&self) -> impl Future<Output = bool> + Send;

    /// Push `branch` to `remote` with upstream tracking.
    fn push(&self, remote: &str, branch: &str) -> impl Future<Output = Result<(), GatewayError>> + Send;

    /// Open a pull request. Returns its URL when the host reports one.
    fn create_proposal(
        &self,
        request: &ProposalRequest,
    ) -> impl Future<Output = Result<Option<String>, GatewayError>> + Send;
}
