use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::hashing::{self, HashDigest};
use crate::process::ProcessRecord;
use crate::watchlist::types::{HitKind, Watchlist, WatchlistHit};

/// Match enumerated processes against the watchlist.
///
/// A process can produce one hit per rule kind. Executables are hashed only
/// when the watchlist carries digests, and each distinct path is hashed once.
/// Executables that cannot be hashed are skipped.
pub fn scan(records: &[ProcessRecord], watchlist: &Watchlist) -> Vec<WatchlistHit> {
    info!(event = "core.watchlist.scan_started", processes = records.len());

    let mut hits = Vec::new();
    let mut digests: HashMap<&str, Option<HashDigest>> = HashMap::new();

    for record in records {
        let hit = |kind, detail: &str| WatchlistHit {
            pid: record.pid(),
            name: record.name().to_string(),
            kind,
            detail: detail.to_string(),
        };

        if let Some(fragment) = watchlist.matching_name(record.name()) {
            hits.push(hit(HitKind::Name, fragment));
        }

        let path = record.path();
        if path.is_empty() {
            continue;
        }

        if watchlist.contains_path(path) {
            hits.push(hit(HitKind::Path, path));
        }

        if watchlist.has_hashes() {
            let digest = digests.entry(path).or_insert_with(|| digest_of(path));
            if let Some(digest) = digest
                && watchlist.contains_hash(digest)
            {
                hits.push(hit(HitKind::Hash, digest.as_str()));
            }
        }
    }

    info!(
        event = "core.watchlist.scan_completed",
        hits = hits.len(),
        hashed = digests.len()
    );

    hits
}

fn digest_of(path: &str) -> Option<HashDigest> {
    match hashing::hash_file(Path::new(path)) {
        Ok(digest) => Some(digest),
        Err(e) => {
            debug!(
                event = "core.watchlist.hash_skipped",
                path = path,
                error = %e
            );
            None
        }
    }
}
