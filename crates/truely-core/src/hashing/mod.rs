pub mod errors;
pub mod operations;
pub mod types;

pub use errors::HashError;
pub use operations::{CHUNK_SIZE, hash_file, hash_stream};
pub use types::{DIGEST_BUFFER_CAPACITY, DIGEST_HEX_LEN, HashDigest};
