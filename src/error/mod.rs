//! Error types for permissioned store operations.
//!
//! Access violations are the only runtime failures the store produces: a read
//! or write that a key's permission tag denies. Both are raised at the point
//! of violation and propagate to the caller; the store never recovers or
//! retries internally. Reading a key that does not exist is NOT an error --
//! it yields absence instead (see `PermissionedStore::read`).

use thiserror::Error;

/// Errors produced by [`PermissionedStore`](crate::store::PermissionedStore)
/// operations and permission-tag parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The key exists and its permission tag denies reading.
    #[error("No read access: {0}")]
    NoReadAccess(String),

    /// The key exists and its permission tag denies writing.
    #[error("No write access: {0}")]
    NoWriteAccess(String),

    /// A textual permission tag was not one of `r`, `w`, `rw`, `none`.
    #[error("Invalid permission tag: {0}")]
    InvalidPermission(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
