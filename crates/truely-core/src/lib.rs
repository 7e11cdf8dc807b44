//! truely-core: Host introspection engine for the Truely integrity client
//!
//! This library enumerates running processes, inspects window server metadata
//! for capture-evasion patterns and hashes files for integrity checks. It is
//! used by the `truely` CLI and by host applications embedding the bridge.
//!
//! # Main Entry Points
//!
//! - [`bridge`] - Serialized enumerate + enrich passes and the status-code surface
//! - [`process`] - Process table snapshots and name/path resolution
//! - [`window`] - Window server queries
//! - [`heuristics`] - Screen evasion and elevated layer classification
//! - [`hashing`] - Streaming SHA-256 file digests
//! - [`watchlist`] - Name, path and hash matching against configured lists
//! - [`config`] - Configuration management

pub mod bridge;
pub mod config;
pub mod errors;
pub mod events;
pub mod hashing;
pub mod heuristics;
pub mod logging;
pub mod process;
pub mod watchlist;
pub mod window;

// Re-export commonly used types at crate root for convenience
pub use bridge::{Bridge, BridgeError, ProcessList, Status};
pub use config::TruelyConfig;
pub use errors::{ErrorClass, TruelyError};
pub use hashing::HashDigest;
pub use heuristics::{HeuristicThresholds, WindowProperties};
pub use process::{Pid, ProcessRecord, ProcessTable};
pub use watchlist::{Watchlist, WatchlistHit};
pub use window::{SharingState, WindowBounds, WindowRecord, WindowScope, WindowServer};

// Re-export logging initialization
pub use logging::init_logging;
