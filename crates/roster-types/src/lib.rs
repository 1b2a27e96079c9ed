mod info;
mod report;
mod role;
mod status;

pub use info::*;
pub use report::*;
pub use role::*;
pub use status::*;

/// Capacity used by containers that are not given one explicitly.
pub const MAX_USERS: usize = 100;

/// Name given to users constructed without one.
pub const DEFAULT_NAME: &str = "Unknown";
