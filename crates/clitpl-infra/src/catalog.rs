//! JSON-file entry repository.
//!
//! Implements the `EntryRepository` trait from `clitpl-core` with one
//! pretty-printed JSON file per entry:
//!
//! ```text
//! {root}/templates/entries/
//!   my-bot.json
//!   community/
//!     another.json      nested directories are scanned too
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use futures_util::Stream;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use clitpl_core::repository::entry::{EntryRepository, StoredDocument};
use clitpl_types::catalog::CatalogLayout;
use clitpl_types::entry::Entry;
use clitpl_types::error::CatalogError;

/// Filesystem-backed entry repository rooted at a catalog checkout.
#[derive(Debug, Clone)]
pub struct JsonEntryRepository {
    layout: CatalogLayout,
}

impl JsonEntryRepository {
    pub fn new(layout: CatalogLayout) -> Self {
        Self { layout }
    }

    fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CatalogError + '_ {
        move |source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Write `body` into a freshly created `file` at `path`.
///
/// If the write fails the file is removed again, so a retry with the same
/// slug is not refused as a duplicate and scans never see a truncated entry.
async fn fill_or_remove<W>(path: &Path, mut file: W, body: &[u8]) -> Result<(), CatalogError>
where
    W: AsyncWrite + Unpin,
{
    let written = match file.write_all(body).await {
        Ok(()) => file.flush().await,
        Err(err) => Err(err),
    };
    drop(file);

    if let Err(source) = written {
        if let Err(err) = tokio::fs::remove_file(path).await {
            tracing::warn!(path = %path.display(), "could not remove partial entry file: {err}");
        }
        return Err(CatalogError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

/// Serialize an entry as its on-disk body (pretty JSON + trailing newline).
pub fn render_entry(entry: &Entry) -> Result<String, CatalogError> {
    let mut body =
        serde_json::to_string_pretty(entry).map_err(|e| CatalogError::Serialize(e.to_string()))?;
    body.push('\n');
    Ok(body)
}

impl EntryRepository for JsonEntryRepository {
    async fn write(&self, entry: &Entry) -> Result<PathBuf, CatalogError> {
        let dir = self.layout.entries_dir();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(Self::io_error(&dir))?;

        let path = self.layout.entry_path(&entry.slug);
        let body = render_entry(entry)?;

        // create_new: an existing file for this slug is never replaced.
        let file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(CatalogError::DuplicateSlug {
                    slug: entry.slug.clone(),
                    path,
                });
            }
            Err(err) => return Err(Self::io_error(&path)(err)),
        };

        fill_or_remove(&path, file, body.as_bytes()).await?;

        tracing::debug!(path = %path.display(), bytes = body.len(), "entry file written");
        Ok(path)
    }

    fn scan_documents(&self) -> impl Stream<Item = Result<StoredDocument, CatalogError>> + Send + '_ {
        let root = self.layout.entries_dir();

        async_stream::try_stream! {
            let exists = tokio::fs::try_exists(&root).await.map_err(Self::io_error(&root))?;
            let mut pending = if exists { vec![root] } else { Vec::new() };
            while let Some(dir) = pending.pop() {
                let mut listing = tokio::fs::read_dir(&dir).await.map_err(Self::io_error(&dir))?;
                while let Some(item) = listing.next_entry().await.map_err(Self::io_error(&dir))? {
                    let path = item.path();
                    let file_type = item.file_type().await.map_err(Self::io_error(&path))?;

                    if file_type.is_dir() {
                        pending.push(path);
                        continue;
                    }
                    if !file_type.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                        continue;
                    }

                    let raw = tokio::fs::read_to_string(&path).await.map_err(Self::io_error(&path))?;
                    let value: serde_json::Value = serde_json::from_str(&raw).map_err(|e| CatalogError::CorruptEntry {
                        path: path.clone(),
                        reason: e.to_string(),
                    })?;
                    yield StoredDocument { path, value };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use clitpl_core::gateway::{HostingGateway, ProposalRequest, VcsGateway};
    use clitpl_core::service::submission::{ProposalOutcome, SubmissionOutcome, SubmissionService};
    use clitpl_types::answers::AnswerSet;
    use clitpl_types::config::CatalogConfig;
    use clitpl_types::entry::{Category, Repository};
    use clitpl_types::error::GatewayError;
    use clitpl_types::validation::ValidationOutcome;
    use futures_util::StreamExt;
    use tempfile::TempDir;

    use crate::filesystem::LocalFileSystem;

    fn entry(name: &str, slug: &str) -> Entry {
        Entry {
            name: name.to_string(),
            slug: slug.to_string(),
            category: Category::Game,
            repository: Repository {
                url: "git@github.com:x/y.git".to_string(),
                branch: Some("main".to_string()),
            },
            handle: "@someone".to_string(),
            description: Some("Dungeon crawler starter".to_string()),
            tags: Some(vec!["rpg".to_string(), "cli".to_string()]),
            created_at: Utc.timestamp_millis_opt(1_760_433_000_123).unwrap(),
        }
    }

    async fn collect(repo: &JsonEntryRepository) -> Result<Vec<Entry>, CatalogError> {
        let mut scan = std::pin::pin!(repo.scan_all());
        let mut out = Vec::new();
        while let Some(item) = scan.next().await {
            out.push(item?);
        }
        Ok(out)
    }

    #[tokio::test]
    async fn test_write_then_scan_round_trips() {
        let tmp = TempDir::new().unwrap();
        let repo = JsonEntryRepository::new(CatalogLayout::new(tmp.path()));
        let original = entry("Dungeon", "dungeon");

        let path = repo.write(&original).await.unwrap();
        assert_eq!(path, tmp.path().join("templates/entries/dungeon.json"));

        let scanned = collect(&repo).await.unwrap();
        assert_eq!(scanned, vec![original]);
    }

    #[tokio::test]
    async fn test_written_file_is_pretty_with_trailing_newline() {
        let tmp = TempDir::new().unwrap();
        let repo = JsonEntryRepository::new(CatalogLayout::new(tmp.path()));
        let path = repo.write(&entry("Dungeon", "dungeon")).await.unwrap();

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(raw.starts_with("{\n  \"name\": \"Dungeon\",\n  \"slug\": \"dungeon\","));
        assert!(raw.ends_with("}\n"));
        assert!(raw.contains("\"createdAt\": \"2025-10-14T09:10:00.123Z\""));
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected_and_original_kept() {
        let tmp = TempDir::new().unwrap();
        let repo = JsonEntryRepository::new(CatalogLayout::new(tmp.path()));
        let path = repo.write(&entry("First", "same")).await.unwrap();
        let before = tokio::fs::read_to_string(&path).await.unwrap();

        let err = repo.write(&entry("Second", "same")).await.unwrap_err();
        match err {
            CatalogError::DuplicateSlug { slug, path: dup } => {
                assert_eq!(slug, "same");
                assert_eq!(dup, path);
            }
            other => panic!("expected DuplicateSlug, got {other:?}"),
        }
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), before);
    }

    /// Writer that fails every write, like a full disk.
    struct FullDisk;

    impl AsyncWrite for FullDisk {
        fn poll_write(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            _buf: &[u8],
        ) -> std::task::Poll<std::io::Result<usize>> {
            std::task::Poll::Ready(Err(std::io::Error::other("no space left on device")))
        }

        fn poll_flush(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }

        fn poll_shutdown(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_failed_write_removes_file_and_slug_can_be_retried() {
        let tmp = TempDir::new().unwrap();
        let layout = CatalogLayout::new(tmp.path());
        tokio::fs::create_dir_all(layout.entries_dir()).await.unwrap();
        let path = layout.entry_path("dungeon");
        // The file exists, as it does right after create_new.
        tokio::fs::write(&path, "{ \"name\"").await.unwrap();

        let err = fill_or_remove(&path, FullDisk, b"{}\n").await.unwrap_err();
        match err {
            CatalogError::Io { path: failed, source } => {
                assert_eq!(failed, path);
                assert_eq!(source.to_string(), "no space left on device");
            }
            other => panic!("expected Io, got {other:?}"),
        }
        assert!(!path.exists());

        let repo = JsonEntryRepository::new(layout);
        assert!(collect(&repo).await.unwrap().is_empty());
        let original = entry("Dungeon", "dungeon");
        assert_eq!(repo.write(&original).await.unwrap(), path);
        assert_eq!(collect(&repo).await.unwrap(), vec![original]);
    }

    #[tokio::test]
    async fn test_scan_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let repo = JsonEntryRepository::new(CatalogLayout::new(tmp.path()));
        assert!(collect(&repo).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_scan_recurses_and_skips_non_json() {
        let tmp = TempDir::new().unwrap();
        let layout = CatalogLayout::new(tmp.path());
        let repo = JsonEntryRepository::new(layout.clone());
        repo.write(&entry("Top", "top")).await.unwrap();

        let nested = layout.entries_dir().join("community");
        tokio::fs::create_dir_all(&nested).await.unwrap();
        let body = render_entry(&entry("Nested", "nested")).unwrap();
        tokio::fs::write(nested.join("nested.json"), body).await.unwrap();
        tokio::fs::write(layout.entries_dir().join(".gitkeep"), "").await.unwrap();
        tokio::fs::write(layout.entries_dir().join("README.md"), "# notes").await.unwrap();

        let mut names: Vec<String> = collect(&repo).await.unwrap().into_iter().map(|e| e.name).collect();
        names.sort();
        assert_eq!(names, vec!["Nested", "Top"]);
    }

    #[tokio::test]
    async fn test_scan_fails_on_corrupt_file_naming_it() {
        let tmp = TempDir::new().unwrap();
        let layout = CatalogLayout::new(tmp.path());
        tokio::fs::create_dir_all(layout.entries_dir()).await.unwrap();
        let bad = layout.entries_dir().join("bad.json");
        tokio::fs::write(&bad, "{ \"name\": ").await.unwrap();

        let repo = JsonEntryRepository::new(layout);
        match collect(&repo).await.unwrap_err() {
            CatalogError::CorruptEntry { path, .. } => assert_eq!(path, bad),
            other => panic!("expected CorruptEntry, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scan_documents_keeps_schema_invalid_records() {
        let tmp = TempDir::new().unwrap();
        let layout = CatalogLayout::new(tmp.path());
        tokio::fs::create_dir_all(layout.entries_dir()).await.unwrap();
        tokio::fs::write(layout.entry_path("partial"), "{ \"name\": \"Partial\" }\n")
            .await
            .unwrap();

        let repo = JsonEntryRepository::new(layout);
        let mut docs = std::pin::pin!(repo.scan_documents());
        let doc = docs.next().await.unwrap().unwrap();
        assert_eq!(doc.value["name"], "Partial");
        assert!(docs.next().await.is_none());

        assert!(matches!(collect(&repo).await, Err(CatalogError::CorruptEntry { .. })));
    }

    /// Records git calls instead of running them.
    #[derive(Clone, Default)]
    struct RecordingVcs {
        calls: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
    }

    impl RecordingVcs {
        fn record(&self, call: String) -> Result<(), GatewayError> {
            self.calls.lock().unwrap().push(call);
            Ok(())
        }
    }

    impl VcsGateway for RecordingVcs {
        async fn checkout(&self, reference: &str) -> Result<(), GatewayError> {
            self.record(format!("checkout {reference}"))
        }

        async fn create_branch(&self, name: &str) -> Result<(), GatewayError> {
            self.record(format!("branch {name}"))
        }

        async fn stage(&self, path: &Path) -> Result<(), GatewayError> {
            self.record(format!("stage {}", path.display()))
        }

        async fn commit(&self, message: &str, path: &Path) -> Result<(), GatewayError> {
            self.record(format!("commit {message} -- {}", path.display()))
        }
    }

    struct NoHosting;

    impl HostingGateway for NoHosting {
        async fn is_available(&self) -> bool {
            false
        }

        async fn push(&self, _remote: &str, _branch: &str) -> Result<(), GatewayError> {
            panic!("push must not run for a deferred pull request");
        }

        async fn create_proposal(&self, _request: &ProposalRequest) -> Result<Option<String>, GatewayError> {
            panic!("create_proposal must not run for a deferred pull request");
        }
    }

    #[tokio::test]
    async fn test_submission_with_json_repository() {
        let tmp = TempDir::new().unwrap();
        let layout = CatalogLayout::new(tmp.path());
        tokio::fs::create_dir_all(layout.templates_dir()).await.unwrap();
        tokio::fs::write(
            layout.schema_path(),
            include_str!("../../../templates/schema.json"),
        )
        .await
        .unwrap();

        let vcs = RecordingVcs::default();
        let service = SubmissionService::new(
            JsonEntryRepository::new(layout.clone()),
            LocalFileSystem::new(),
            vcs.clone(),
            NoHosting,
            layout.clone(),
            CatalogConfig::default(),
        );
        let answers = AnswerSet {
            category: Category::Bot,
            repo_url: "https://github.com/x/y.git".to_string(),
            branch: "  ".to_string(),
            handle: "@lightspeed_coin".to_string(),
            name: "My Bot".to_string(),
            description: String::new(),
            tags: Vec::new(),
            confirm_license: true,
            confirm_original: true,
            confirm_review: true,
            submit_pr: false,
        };
        let created_at = Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap();

        let outcome = service.submit_at(&answers, created_at).await.unwrap();
        assert!(outcome.is_success());
        let SubmissionOutcome::Submitted(submission) = outcome else {
            panic!("expected a submission");
        };
        let path = layout.entry_path("my-bot");
        assert_eq!(submission.path, path);
        assert_eq!(submission.validation, ValidationOutcome::Passed);
        assert_eq!(submission.proposal, ProposalOutcome::Deferred);

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(raw.ends_with("}\n"));
        let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            stored,
            serde_json::json!({
                "name": "My Bot",
                "slug": "my-bot",
                "category": "Bot",
                "repository": { "url": "https://github.com/x/y.git" },
                "handle": "@lightspeed_coin",
                "createdAt": "2026-10-14T09:30:00.000Z",
            })
        );
        for absent in ["branch", "description", "tags"] {
            assert!(!raw.contains(&format!("\"{absent}\"")), "{absent} should be omitted");
        }

        let calls = vcs.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], "checkout main");
        assert!(calls[1].starts_with("branch add-template/my-bot-"));
        assert_eq!(calls[2], format!("stage {}", path.display()));
        assert_eq!(
            calls[3],
            format!("commit feat(templates): add my-bot template -- {}", path.display())
        );
    }
}
