//! In-memory user registry model: identities, users and administrators,
//! shared handles over them, and a bounded container to hold them.

mod admin;
mod container;
mod error;
mod ids;
mod shared;
mod user;
mod util;

pub use admin::*;
pub use container::*;
pub use error::*;
pub use ids::*;
pub use shared::*;
pub use user::*;
pub use util::*;

pub use roster_types::{Status, UserId, UserInfo, UserRecord, UserRole, DEFAULT_NAME, MAX_USERS};
