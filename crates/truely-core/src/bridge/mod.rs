pub mod errors;
pub mod handler;
pub mod types;

pub use crate::errors::Status;
pub use errors::BridgeError;
pub use handler::Bridge;
pub use types::ProcessList;
