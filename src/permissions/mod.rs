// permissions module

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Per-key access permission, fixed when the entry is created.
///
/// The textual tags (`"rw"`, `"r"`, `"w"`, `"none"`) are the wire form used by
/// serde and [`FromStr`]. Read and write are independent axes: `ReadOnly`
/// denies writes even though the entry exists, and `WriteOnly` keys hold
/// values that can never be observed through `read`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Permission {
    /// Tag `"rw"`: both read and write permitted.
    #[default]
    #[serde(rename = "rw")]
    ReadWrite,
    /// Tag `"r"`: read permitted, write denied.
    #[serde(rename = "r")]
    ReadOnly,
    /// Tag `"w"`: write permitted, read denied.
    #[serde(rename = "w")]
    WriteOnly,
    /// Tag `"none"`: all access denied.
    #[serde(rename = "none")]
    None,
}

impl Permission {
    /// Whether a key with this tag may be read.
    #[must_use]
    pub fn allows_read(self) -> bool {
        matches!(self, Permission::ReadWrite | Permission::ReadOnly)
    }

    /// Whether a key with this tag may be written.
    #[must_use]
    pub fn allows_write(self) -> bool {
        matches!(self, Permission::ReadWrite | Permission::WriteOnly)
    }

    /// The textual tag form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::ReadWrite => "rw",
            Permission::ReadOnly => "r",
            Permission::WriteOnly => "w",
            Permission::None => "none",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rw" => Ok(Permission::ReadWrite),
            "r" => Ok(Permission::ReadOnly),
            "w" => Ok(Permission::WriteOnly),
            "none" => Ok(Permission::None),
            other => Err(StoreError::InvalidPermission(other.to_string())),
        }
    }
}
