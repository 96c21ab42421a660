use chrono::{DateTime, SubsecRound, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static GIT_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(https?://|git@).+\.git$").expect("static regex"));

static HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@?[A-Za-z0-9_.]+$").expect("static regex"));

/// Whether `url` looks like a clonable git URL (`https://...git` or `git@...git`).
pub fn is_git_url(url: &str) -> bool {
    GIT_URL.is_match(url)
}

/// Whether `handle` is a simple social handle like `@lightspeed_coin`.
pub fn is_valid_handle(handle: &str) -> bool {
    HANDLE.is_match(handle)
}

/// Whether `name` is acceptable as an entry display name.
pub fn is_valid_name(name: &str) -> bool {
    name.trim().chars().count() > 1
}

/// Catalog categories a template can be listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "AI")]
    Ai,
    App,
    Bot,
    Game,
}

impl Category {
    /// All categories in wizard display order.
    pub const ALL: [Category; 4] = [Category::Ai, Category::App, Category::Bot, Category::Game];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ai => "AI",
            Category::App => "App",
            Category::Bot => "Bot",
            Category::Game => "Game",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ai" => Ok(Category::Ai),
            "app" => Ok(Category::App),
            "bot" => Ok(Category::Bot),
            "game" => Ok(Category::Game),
            other => Err(format!("invalid category: '{other}'")),
        }
    }
}

/// Where the template's source lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub url: String,
    /// Default branch or tag to clone; omitted when not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

/// One catalog submission, stored as `templates/entries/<slug>.json`.
///
/// Entries are written once and never updated by the tool. Field order here
/// is the on-disk key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Display name ("My Bot").
    pub name: String,
    /// Filename-safe key derived from the name ("my-bot").
    pub slug: String,
    pub category: Category,
    pub repository: Repository,
    /// Contributor handle, e.g. `@lightspeed_coin`.
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ordered-unique tags; omitted entirely when empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Filename of this entry inside the entries directory.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.slug)
    }
}

/// Truncate an instant to the millisecond precision stored in `createdAt`.
pub fn truncate_to_millis(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.trunc_subsecs(3)
}

/// `createdAt` serde format: RFC 3339 UTC with milliseconds and a `Z` suffix.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
