//! Session snapshot storage.
//!
//! The edit-form pipeline keeps one piece of cross-request state: the
//! original field values shown to the user on GET, read back on POST to
//! detect no-op submissions. The store is injected capability-style so the
//! controller never touches ambient/global session state and tests can
//! supply an in-memory fake.
//!
//! Concurrent requests from the same session can race on a snapshot
//! (two tabs editing the same case); the accepted behaviour is
//! last-GET-wins, with no locking or versioning.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::application::FormConfig;
use crate::domain::CaseReference;

/// Per-user key-value storage of JSON-serialisable snapshots.
pub trait SessionStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    fn read(&self, key: &str) -> Option<Value>;

    /// Writes `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: Value);

    /// Deletes the value stored under `key`; deleting an absent key is a
    /// no-op.
    fn delete(&self, key: &str);
}

/// The session key a form's snapshot lives under for one case.
#[must_use]
pub fn snapshot_key(case_reference: &CaseReference, form: &FormConfig) -> String {
    format!("{}:{}", case_reference.as_str(), form.snapshot_name())
}

/// In-memory session store.
///
/// Production deployments sit behind an external session middleware; this
/// implementation backs local runs and the test suite.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn read(&self, key: &str) -> Option<Value> {
        self.entries
            .read()
            .expect("session store lock poisoned")
            .get(key)
            .cloned()
    }

    fn write(&self, key: &str, value: Value) {
        self.entries
            .write()
            .expect("session store lock poisoned")
            .insert(key.to_string(), value);
    }

    fn delete(&self, key: &str) {
        self.entries
            .write()
            .expect("session store lock poisoned")
            .remove(key);
    }
}
