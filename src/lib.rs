//! An in-memory key-value store whose entries carry per-key read/write
//! permission metadata, enforced at access time.

pub mod error;
pub mod permissions;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use permissions::Permission;
pub use store::{Entry, PermissionedStore, WriteOutcome};
