//! Catalog configuration loader.
//!
//! `clitpl.toml` at the catalog root is optional. Every key falls back to
//! the upstream catalog's value, and a file that cannot be used at all is
//! ignored with a warning so a fork with a broken config can still submit.

use clitpl_types::catalog::CatalogLayout;
use clitpl_types::config::CatalogConfig;

/// Keys understood in `clitpl.toml`.
pub const CONFIG_KEYS: [&str; 6] = [
    "repo_owner",
    "repo_name",
    "base_branch",
    "remote",
    "git_program",
    "gh_program",
];

/// How a parsed `clitpl.toml` table lines up with [`CONFIG_KEYS`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct KeyReport {
    /// Known keys the file leaves out; they keep the upstream value.
    pub defaulted: Vec<&'static str>,
    /// Keys the tool does not know, most likely typos.
    pub unknown: Vec<String>,
}

pub fn key_report(table: &toml::Table) -> KeyReport {
    KeyReport {
        defaulted: CONFIG_KEYS
            .iter()
            .copied()
            .filter(|key| !table.contains_key(*key))
            .collect(),
        unknown: table
            .keys()
            .filter(|key| !CONFIG_KEYS.contains(&key.as_str()))
            .cloned()
            .collect(),
    }
}

/// Load the submission settings for `layout`'s catalog.
///
/// A missing file means the upstream catalog. An unreadable file or one
/// that is not a valid settings table is logged and replaced by the upstream
/// defaults as a whole; keys are never mixed from a half-valid file.
pub async fn load_catalog_config(layout: &CatalogLayout) -> CatalogConfig {
    let path = layout.config_path();

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no catalog config, submitting to the upstream catalog");
            return CatalogConfig::default();
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "catalog config unreadable ({err}); submitting to the upstream catalog");
            return CatalogConfig::default();
        }
    };

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(err) => {
            tracing::warn!(path = %path.display(), "catalog config is not valid TOML ({err}); submitting to the upstream catalog");
            return CatalogConfig::default();
        }
    };

    let report = key_report(&table);
    if !report.unknown.is_empty() {
        tracing::warn!(
            path = %path.display(),
            "ignoring unknown catalog config keys: {}",
            report.unknown.join(", ")
        );
    }

    match toml::Value::Table(table).try_into::<CatalogConfig>() {
        Ok(config) => {
            if !report.defaulted.is_empty() {
                tracing::debug!(
                    path = %path.display(),
                    "catalog config leaves out {}; using upstream values",
                    report.defaulted.join(", ")
                );
            }
            tracing::debug!(upstream = %config.upstream(), base = %config.base_branch, "catalog config loaded");
            config
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "catalog config rejected ({err}); submitting to the upstream catalog");
            CatalogConfig::default()
        }
    }
}
