//! Application state wiring all services together.
//!
//! Services are generic over repository/filesystem/gateway traits; AppState
//! pins them to the concrete infra implementations for one catalog root.

use anyhow::Context;

use clitpl_core::service::catalog::CatalogService;
use clitpl_core::service::submission::SubmissionService;
use clitpl_infra::catalog::JsonEntryRepository;
use clitpl_infra::config::load_catalog_config;
use clitpl_infra::filesystem::{LocalFileSystem, resolve_catalog_root};
use clitpl_infra::gh::GhCli;
use clitpl_infra::git::GitCli;
use clitpl_types::catalog::CatalogLayout;
use clitpl_types::config::CatalogConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteSubmissionService =
    SubmissionService<JsonEntryRepository, LocalFileSystem, GitCli, GhCli>;

pub type ConcreteCatalogService = CatalogService<JsonEntryRepository, LocalFileSystem>;

pub struct AppState {
    pub layout: CatalogLayout,
    pub config: CatalogConfig,
    pub submission_service: ConcreteSubmissionService,
    pub catalog_service: ConcreteCatalogService,
}

impl AppState {
    /// Resolve the catalog root, load its config, and wire the services.
    pub async fn init() -> anyhow::Result<Self> {
        let root = resolve_catalog_root().context("could not determine the catalog root")?;
        let layout = CatalogLayout::new(root);
        let config = load_catalog_config(&layout).await;

        tracing::debug!(
            root = %layout.root().display(),
            upstream = %config.upstream(),
            base = %config.base_branch,
            "catalog resolved"
        );

        let repo = JsonEntryRepository::new(layout.clone());
        let git = GitCli::new(config.git_program.clone(), layout.root());
        let gh = GhCli::new(
            config.gh_program.clone(),
            config.git_program.clone(),
            layout.root(),
        );

        let submission_service = SubmissionService::new(
            repo.clone(),
            LocalFileSystem::new(),
            git,
            gh,
            layout.clone(),
            config.clone(),
        );
        let catalog_service = CatalogService::new(repo, LocalFileSystem::new(), layout.clone());

        Ok(Self {
            layout,
            config,
            submission_service,
            catalog_service,
        })
    }
}
