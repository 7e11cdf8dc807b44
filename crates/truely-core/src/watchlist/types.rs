use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::config::TruelyConfig;
use crate::hashing::HashDigest;
use crate::process::Pid;

/// Compiled watchlist: lowercase name fragments, exact paths and digests.
#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    names: Vec<String>,
    paths: HashSet<String>,
    hashes: HashSet<HashDigest>,
}

impl Watchlist {
    pub fn new(
        names: impl IntoIterator<Item = String>,
        paths: impl IntoIterator<Item = String>,
        hashes: impl IntoIterator<Item = HashDigest>,
    ) -> Self {
        Self {
            names: names
                .into_iter()
                .map(|name| name.trim().to_lowercase())
                .filter(|name| !name.is_empty())
                .collect(),
            paths: paths.into_iter().collect(),
            hashes: hashes.into_iter().collect(),
        }
    }

    /// Build from a validated config. Malformed digests are dropped.
    pub fn from_config(config: &TruelyConfig) -> Self {
        Self::new(
            config.watch_names(),
            config.watchlist.paths.iter().cloned(),
            config
                .watchlist
                .hashes
                .iter()
                .filter_map(|hash| HashDigest::parse(hash)),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.paths.is_empty() && self.hashes.is_empty()
    }

    /// First configured fragment contained in the lowercased `name`.
    pub fn matching_name(&self, name: &str) -> Option<&str> {
        let name = name.to_lowercase();
        self.names
            .iter()
            .find(|fragment| name.contains(fragment.as_str()))
            .map(String::as_str)
    }

    pub fn contains_path(&self, path: &str) -> bool {
        !path.is_empty() && self.paths.contains(path)
    }

    pub fn contains_hash(&self, digest: &HashDigest) -> bool {
        self.hashes.contains(digest)
    }

    pub fn has_hashes(&self) -> bool {
        !self.hashes.is_empty()
    }
}

/// Which watchlist rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HitKind {
    Name,
    Path,
    Hash,
}

impl fmt::Display for HitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HitKind::Name => write!(f, "NAME"),
            HitKind::Path => write!(f, "PATH"),
            HitKind::Hash => write!(f, "HASH"),
        }
    }
}

/// One rule matching one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchlistHit {
    pub pid: Pid,
    pub name: String,
    pub kind: HitKind,
    /// Matched fragment, path or digest
    pub detail: String,
}
