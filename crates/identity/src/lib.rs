//! `freshmart-identity`: the user directory behind authorization decisions.
//!
//! Users are plain documents in the store; this crate gives them a typed
//! surface (email, role) and the handful of operations the API needs.

pub mod directory;
pub mod user;

pub use directory::{DirectoryError, Registration, UserDirectory, USERS_COLLECTION};
pub use user::{Role, UserRecord};
