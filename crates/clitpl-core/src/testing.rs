//! In-memory port implementations shared by the service tests.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{TimeZone, Utc};
use futures_util::Stream;
use serde_json::{Value, json};

use clitpl_types::catalog::CatalogLayout;
use clitpl_types::entry::{Category, Entry, Repository};
use clitpl_types::error::{CatalogError, GatewayError};
use clitpl_types::slug::slugify;

use crate::gateway::{HostingGateway, ProposalRequest, VcsGateway};
use crate::repository::entry::{EntryRepository, StoredDocument};
use crate::service::fs::FileSystem;

pub const CATALOG_SCHEMA: &str = include_str!("../../../templates/schema.json");

pub fn entry_named(name: &str) -> Entry {
    Entry {
        name: name.to_string(),
        slug: slugify(name),
        category: Category::Bot,
        repository: Repository {
            url: "https://github.com/x/y.git".to_string(),
            branch: None,
        },
        handle: "@lightspeed_coin".to_string(),
        description: None,
        tags: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
    }
}

pub fn conforming_entry_json() -> Value {
    json!({
        "name": "My Bot",
        "slug": "my-bot",
        "category": "Bot",
        "repository": { "url": "https://github.com/x/y.git" },
        "handle": "@lightspeed_coin",
        "createdAt": "2026-10-14T09:30:00.000Z"
    })
}

// --- Filesystem ---

#[derive(Clone, Default)]
pub struct MemoryFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: PathBuf, content: &str) {
        self.files.lock().unwrap().insert(path, content.to_string());
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

impl FileSystem for MemoryFileSystem {
    async fn write_file(&self, path: &Path, content: &str) -> Result<(), std::io::Error> {
        self.insert(path.to_path_buf(), content);
        Ok(())
    }

    async fn read_file(&self, path: &Path) -> Result<String, std::io::Error> {
        self.get(path)
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"))
    }
}

// --- Entry repository ---

#[derive(Clone)]
pub struct MemoryEntryRepository {
    layout: CatalogLayout,
    documents: Arc<Mutex<BTreeMap<PathBuf, Value>>>,
}

impl MemoryEntryRepository {
    pub fn new(layout: CatalogLayout) -> Self {
        Self {
            layout,
            documents: Arc::default(),
        }
    }

    pub fn seed(&self, entry: Entry) {
        let path = self.layout.entry_path(&entry.slug);
        self.seed_raw(path, serde_json::to_value(entry).unwrap());
    }

    pub fn seed_raw(&self, path: PathBuf, value: Value) {
        self.documents.lock().unwrap().insert(path, value);
    }

    pub fn document(&self, path: &Path) -> Option<Value> {
        self.documents.lock().unwrap().get(path).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.lock().unwrap().is_empty()
    }
}

impl EntryRepository for MemoryEntryRepository {
    async fn write(&self, entry: &Entry) -> Result<PathBuf, CatalogError> {
        let path = self.layout.entry_path(&entry.slug);
        let mut documents = self.documents.lock().unwrap();
        if documents.contains_key(&path) {
            return Err(CatalogError::DuplicateSlug {
                slug: entry.slug.clone(),
                path,
            });
        }
        let value = serde_json::to_value(entry).map_err(|e| CatalogError::Serialize(e.to_string()))?;
        documents.insert(path.clone(), value);
        Ok(path)
    }

    fn scan_documents(&self) -> impl Stream<Item = Result<StoredDocument, CatalogError>> + Send + '_ {
        let snapshot: Vec<Result<StoredDocument, CatalogError>> = self
            .documents
            .lock()
            .unwrap()
            .iter()
            .map(|(path, value)| {
                Ok(StoredDocument {
                    path: path.clone(),
                    value: value.clone(),
                })
            })
            .collect();
        futures_util::stream::iter(snapshot)
    }
}

// --- Version control ---

#[derive(Clone, Default)]
pub struct MockVcs {
    fail_at: Option<&'static str>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockVcs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the operation named `op` ("checkout", "branch", "stage", "commit").
    pub fn failing_at(op: &'static str) -> Self {
        Self {
            fail_at: Some(op),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &'static str, arg: String) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(format!("{op} {arg}"));
        if self.fail_at == Some(op) {
            return Err(GatewayError::Failed {
                command: format!("git {op}"),
                status: "exit status: 1".to_string(),
                stderr: format!("{op} refused"),
            });
        }
        Ok(())
    }
}

impl VcsGateway for MockVcs {
    async fn checkout(&self, reference: &str) -> Result<(), GatewayError> {
        self.record("checkout", reference.to_string())
    }

    async fn create_branch(&self, name: &str) -> Result<(), GatewayError> {
        self.record("branch", name.to_string())
    }

    async fn stage(&self, path: &Path) -> Result<(), GatewayError> {
        self.record("stage", path.display().to_string())
    }

    async fn commit(&self, message: &str, _path: &Path) -> Result<(), GatewayError> {
        self.record("commit", message.to_string())
    }
}

// --- Hosting CLI ---

#[derive(Clone, Default)]
pub struct MockHosting {
    pub available: bool,
    pub fail_push: bool,
    pub fail_proposal: bool,
    calls: Arc<Mutex<Vec<String>>>,
    last_request: Arc<Mutex<Option<ProposalRequest>>>,
}

impl MockHosting {
    pub fn available() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<ProposalRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl HostingGateway for MockHosting {
    async fn is_available(&self) -> bool {
        self.available
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<(), GatewayError> {
        self.calls.lock().unwrap().push(format!("push {remote} {branch}"));
        if self.fail_push {
            return Err(GatewayError::Failed {
                command: format!("git push --set-upstream {remote} {branch}"),
                status: "exit status: 128".to_string(),
                stderr: "permission denied".to_string(),
            });
        }
        Ok(())
    }

    async fn create_proposal(&self, request: &ProposalRequest) -> Result<Option<String>, GatewayError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("pr {} -> {}", request.title, request.base));
        *self.last_request.lock().unwrap() = Some(request.clone());
        if self.fail_proposal {
            return Err(GatewayError::Failed {
                command: "gh pr create".to_string(),
                status: "exit status: 1".to_string(),
                stderr: "not authenticated".to_string(),
            });
        }
        Ok(Some(
            "https://github.com/lightspeedfoundation/CLI-Templates/pull/1".to_string(),
        ))
    }
}
