use std::fs::File;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::hashing::errors::HashError;
use crate::hashing::types::HashDigest;

/// Bytes fed to the digest per read
pub const CHUNK_SIZE: usize = 4096;

/// SHA-256 of a file's bytes.
///
/// The file must be seekable; it is probed by seeking to the end and back
/// before any byte is hashed. No digest is produced if any step fails.
pub fn hash_file(path: &Path) -> Result<HashDigest, HashError> {
    if path.as_os_str().is_empty() {
        return Err(HashError::EmptyPath);
    }

    debug!(event = "core.hashing.file_started", path = %path.display());

    let file = File::open(path).map_err(|source| HashError::OpenFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let digest = hash_stream(file, path)?;

    info!(
        event = "core.hashing.file_completed",
        path = %path.display(),
        digest = %digest
    );
    Ok(digest)
}

/// SHA-256 of a seekable byte stream, read in [`CHUNK_SIZE`] chunks.
///
/// `path` is only used to label errors.
pub fn hash_stream<R: Read + Seek>(mut reader: R, path: &Path) -> Result<HashDigest, HashError> {
    let seek_failed = |source| HashError::SeekFailed {
        path: path.to_path_buf(),
        source,
    };
    let size = reader.seek(SeekFrom::End(0)).map_err(seek_failed)?;
    reader.seek(SeekFrom::Start(0)).map_err(seek_failed)?;

    let mut hasher = Sha256::new();
    let mut chunk = [0u8; CHUNK_SIZE];
    let mut total: u64 = 0;

    loop {
        match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => {
                hasher.update(&chunk[..n]);
                total += n as u64;
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(HashError::ReadFailed {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }

    if total != size {
        debug!(
            event = "core.hashing.size_changed",
            path = %path.display(),
            expected = size,
            hashed = total
        );
    }

    Ok(HashDigest::from_digest(hasher.finalize()))
}
