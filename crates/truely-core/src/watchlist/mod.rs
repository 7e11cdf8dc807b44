//! Name, path and executable digest matching over enumerated processes.

pub mod operations;
pub mod types;

pub use operations::scan;
pub use types::{HitKind, Watchlist, WatchlistHit};
