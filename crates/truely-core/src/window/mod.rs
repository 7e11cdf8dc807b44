#[cfg(target_os = "macos")]
pub mod macos;
pub mod operations;
pub mod server;
pub mod types;

pub use operations::{window_count, windows_owned_by};
pub use server::{
    HeadlessWindowServer, StaticWindowServer, WindowServer, Windows, platform_window_server,
};
pub use types::{SharingState, WindowBounds, WindowRecord, WindowScope};
