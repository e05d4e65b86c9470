#![forbid(unsafe_code)]

//! Persistence of selection state across component lifecycles.
//!
//! Two layers are provided:
//!
//! - [`Stateful`]: typed save/restore of a component's user-facing state,
//!   addressed by a [`StateKey`].
//! - [`StateBlob`]: an opaque string-keyed bag of JSON values that a host
//!   hands to components on save and gives back on restore. Hosts that keep
//!   state as text use [`StateBlob::to_json`] / [`StateBlob::from_json`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifies a piece of persisted component state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey {
    /// Component kind, e.g. `"Selection"`.
    pub widget_type: &'static str,
    /// Instance id, `"default"` when the component has none.
    pub instance_id: String,
}

impl StateKey {
    #[must_use]
    pub fn new(widget_type: &'static str, instance_id: impl Into<String>) -> Self {
        Self {
            widget_type,
            instance_id: instance_id.into(),
        }
    }

    /// Flattened `type::id` form, used as a blob key.
    #[must_use]
    pub fn to_key_string(&self) -> String {
        format!("{}::{}", self.widget_type, self.instance_id)
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.widget_type, self.instance_id)
    }
}

/// A component whose user-facing state can be saved and restored.
pub trait Stateful {
    type State;

    fn state_key(&self) -> StateKey;

    fn save_state(&self) -> Self::State;

    fn restore_state(&mut self, state: Self::State);
}

/// Persistable state for a selection store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionPersistState {
    /// Selected item indices in ascending order.
    pub selected: Vec<usize>,
}

/// Opaque key-value container for persisted component state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateBlob {
    entries: BTreeMap<String, Value>,
}

impl StateBlob {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store a [`Stateful`] component's state under its flattened key.
    pub fn save<S>(&mut self, component: &S) -> serde_json::Result<()>
    where
        S: Stateful,
        S::State: Serialize,
    {
        let value = serde_json::to_value(component.save_state())?;
        self.put(component.state_key().to_key_string(), value);
        Ok(())
    }

    /// Restore a [`Stateful`] component from its flattened key.
    ///
    /// Returns `Ok(false)` when the blob has no entry for the component.
    pub fn restore<S>(&self, component: &mut S) -> serde_json::Result<bool>
    where
        S: Stateful,
        S::State: for<'de> Deserialize<'de>,
    {
        let Some(value) = self.get(&component.state_key().to_key_string()) else {
            return Ok(false);
        };
        let state = S::State::deserialize(value)?;
        component.restore_state(state);
        Ok(true)
    }

    /// Serialize the whole blob to a JSON string.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a blob previously produced by [`StateBlob::to_json`].
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}
