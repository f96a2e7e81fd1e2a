//! Permission-gated in-memory key-value store.
//!
//! Every entry carries a [`Permission`] tag resolved once at creation time and
//! immutable afterwards. `read` and `write` consult the tag before touching
//! the value; `write_entries` is the uncontrolled bulk path that bypasses the
//! checks. Keys are enumerated in insertion order.

use std::collections::HashMap;

use log::{debug, info, warn};
use serde_json::{json, Map, Value};

use crate::error::{StoreError, StoreResult};
use crate::permissions::Permission;

/// A stored value together with the permission tag fixed at its creation.
///
/// The tag is private so it cannot change after the entry exists; the value is
/// only mutated through the store's gated operations.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    value: Value,
    permission: Permission,
}

impl Entry {
    #[must_use]
    pub fn new(value: Value, permission: Permission) -> Self {
        Self { value, permission }
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[must_use]
    pub fn permission(&self) -> Permission {
        self.permission
    }
}

/// Result of a successful [`PermissionedStore::write`].
///
/// Distinguishes "a new entry was created" from "an existing value was
/// replaced", mirroring the two return shapes of the write operation: creation
/// hands back no value, replacement hands back the freshly written one.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    /// The key was unknown; an entry was created under the store's default
    /// policy.
    Created,
    /// The key existed and was writable; its value is now the contained one.
    Replaced(Value),
}

/// An insertion-ordered mapping from string keys to permission-tagged JSON
/// values.
///
/// Entries come into existence two ways: declared up front with an explicit
/// tag via [`declare`](Self::declare), or created dynamically by
/// [`write`](Self::write) on an unknown key, in which case they receive the
/// store's default policy. There is no delete operation; entries are only
/// created and mutated in place.
///
/// Reading a key that does not exist is absence, not denial: `read` returns
/// `Ok(None)` and `allowed_to_read` answers true. Writing a key that does not
/// exist always succeeds by creating it. Only an existing tag can deny access.
#[derive(Debug, Clone, Default)]
pub struct PermissionedStore {
    entries: HashMap<String, Entry>,
    // Insertion order of keys, for enumeration.
    order: Vec<String>,
    default_policy: Permission,
}

impl PermissionedStore {
    /// Creates an empty store with the default policy of `rw`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose dynamically created keys receive `policy`
    /// instead of `rw`.
    #[must_use]
    pub fn with_default_policy(policy: Permission) -> Self {
        Self {
            default_policy: policy,
            ..Self::default()
        }
    }

    /// The tag applied to keys created through `write` or `write_entries`.
    #[must_use]
    pub fn default_policy(&self) -> Permission {
        self.default_policy
    }

    /// Declares `key` with an initial `value` and an explicit `permission`
    /// tag, fixed for the lifetime of the entry.
    ///
    /// Declaration is setup-time API: it is not gated and redeclaring an
    /// existing key replaces its entry wholesale, tag included, keeping the
    /// key's position in enumeration order.
    pub fn declare(&mut self, key: impl Into<String>, value: Value, permission: Permission) {
        let key = key.into();
        info!("Declaring key '{}' with permission '{}'", key, permission);
        if self.entries.insert(key.clone(), Entry::new(value, permission)).is_none() {
            self.order.push(key);
        }
    }

    /// Whether `key` may currently be read.
    ///
    /// Unknown keys answer true: reading them yields absence rather than a
    /// denial, so only an existing tag can refuse.
    #[must_use]
    pub fn allowed_to_read(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map_or(true, |entry| entry.permission().allows_read())
    }

    /// Whether `key` may currently be written.
    ///
    /// Unknown keys answer true, since writing them creates the entry. A key
    /// declared `r` refuses even though the entry exists.
    #[must_use]
    pub fn allowed_to_write(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map_or(true, |entry| entry.permission().allows_write())
    }

    /// Reads the value stored under `key`.
    ///
    /// Returns `Err(NoReadAccess)` when the key's tag denies reading,
    /// `Ok(None)` when the key does not exist, and `Ok(Some(value))`
    /// otherwise.
    pub fn read(&self, key: &str) -> StoreResult<Option<&Value>> {
        if !self.allowed_to_read(key) {
            warn!("Read access denied for key '{}'", key);
            return Err(StoreError::NoReadAccess(key.to_string()));
        }
        debug!("Reading key '{}'", key);
        Ok(self.entries.get(key).map(Entry::value))
    }

    /// Writes `value` under `key`.
    ///
    /// Returns `Err(NoWriteAccess)` when the key's tag denies writing. An
    /// unknown key is created through the bulk-import path under the store's
    /// default policy and reported as [`WriteOutcome::Created`]; a known
    /// writable key has its value replaced in place and reported as
    /// [`WriteOutcome::Replaced`] carrying the new value.
    pub fn write(&mut self, key: &str, value: Value) -> StoreResult<WriteOutcome> {
        if !self.allowed_to_write(key) {
            warn!("Write access denied for key '{}'", key);
            return Err(StoreError::NoWriteAccess(key.to_string()));
        }

        if !self.entries.contains_key(key) {
            let mut batch = Map::new();
            batch.insert(key.to_string(), value);
            self.write_entries(batch);
            return Ok(WriteOutcome::Created);
        }

        debug!("Replacing value of key '{}'", key);
        // Checked writable and present above.
        if let Some(entry) = self.entries.get_mut(key) {
            entry.value = value.clone();
        }
        Ok(WriteOutcome::Replaced(value))
    }

    /// Merges a mapping of key to value into the store without any permission
    /// check.
    ///
    /// Existing keys have their value overwritten and keep their original
    /// tag; new keys are appended in the map's iteration order under the
    /// store's default policy.
    pub fn write_entries(&mut self, entries: Map<String, Value>) {
        for (key, value) in entries {
            match self.entries.get_mut(&key) {
                Some(entry) => {
                    debug!("Bulk overwrite of key '{}'", key);
                    entry.value = value;
                }
                None => {
                    info!(
                        "Creating key '{}' with default policy '{}'",
                        key, self.default_policy
                    );
                    self.entries
                        .insert(key.clone(), Entry::new(value, self.default_policy));
                    self.order.push(key);
                }
            }
        }
    }

    /// Enumerates every key on the store, in insertion order, as
    /// `{"entries": [{key: value}, ...]}` with one single-key object per
    /// entry.
    ///
    /// Keys whose tag denies reading surface JSON `null` in place of their
    /// value; they are never omitted, so the listing's shape is stable across
    /// tags and repeated calls.
    #[must_use]
    pub fn entries(&self) -> Value {
        let listing: Vec<Value> = self
            .order
            .iter()
            .map(|key| {
                let entry = &self.entries[key];
                let exposed = if entry.permission().allows_read() {
                    entry.value().clone()
                } else {
                    Value::Null
                };
                let mut item = Map::new();
                item.insert(key.clone(), exposed);
                Value::Object(item)
            })
            .collect();
        json!({ "entries": listing })
    }

    /// The tag of `key`, if the key exists.
    #[must_use]
    pub fn permission_of(&self, key: &str) -> Option<Permission> {
        self.entries.get(key).map(Entry::permission)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
