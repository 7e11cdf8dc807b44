pub mod errors;
#[cfg(target_os = "macos")]
pub mod libproc;
pub mod operations;
pub mod probe;
pub mod table;
pub mod types;

pub use errors::ProcessError;
pub use operations::{enumerate, resolve_name, resolve_path, try_resolve_path};
pub use table::{
    ProcessTable, StaticProcess, StaticProcessTable, SysinfoProcessTable, platform_table,
};
pub use types::{PATH_CAPACITY, Pid, ProcessRecord, RawProcess, truncate_to_capacity};
